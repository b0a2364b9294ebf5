//! Bootstrap an app, mount it, and drive it through the shared store.
//!
//! Run with `RUST_LOG=debug` to see commits and renders.

use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use shared_state::{Action, App, BootstrapConfig, MemoryHost, SharedStore, View};

struct Profile;

impl View for Profile {
    fn render(&self, store: &SharedStore) -> String {
        let data = store.shared_data();
        match data.get("user").and_then(|u| u.as_str()) {
            Some(user) => format!("<p>Signed in as {user}</p>"),
            None => format!("<pre>{data}</pre>"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shared Data Example ===\n");

    let config = BootstrapConfig::load("bootstrap.toml")?;
    let host = Arc::new(MemoryHost::new().with_element("app"));

    println!("1. Mounting at {}", config.mount_point);
    let app = App::new(Profile)
        .use_store(SharedStore::new())
        .mount_with_config(host.clone(), &config)?;

    let show = |label: &str| {
        println!(
            "   {label}: {} -> {}",
            app.store().shared_data(),
            host.content(app.element_id()).unwrap_or_default()
        );
    };
    show("initial");

    println!("\n2. Dispatching updateData({{ user: \"alice\" }})");
    app.store()
        .dispatch(Action::UpdateData(json!({ "user": "alice" })))?;
    show("after");

    println!("\n3. Dispatching updateData({{ count: 5 }})");
    app.store()
        .dispatch(Action::UpdateData(json!({ "count": 5 })))?;
    show("after");

    println!("\n4. Renders: {}", app.render_count());
    let _store = app.unmount();

    println!("\n✓ Example complete!");
    Ok(())
}
