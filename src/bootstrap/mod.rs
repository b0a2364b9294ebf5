//! Application bootstrap: build the root, install the store, mount.
//!
//! ```
//! use std::sync::Arc;
//! use shared_state::bootstrap::{App, MemoryHost};
//! use shared_state::SharedStore;
//!
//! let host = Arc::new(MemoryHost::new().with_element("app"));
//! let app = App::new(|store: &SharedStore| store.shared_data().to_string())
//!     .use_store(SharedStore::new())
//!     .mount(host.clone(), "#app")
//!     .unwrap();
//!
//! app.store().update_data(serde_json::json!({ "user": "alice" })).unwrap();
//! assert_eq!(host.content("app").as_deref(), Some(r#"{"user":"alice"}"#));
//! ```

mod app;
mod config;
mod host;

pub use app::{App, MountedApp, View};
pub use config::BootstrapConfig;
pub use host::{Host, MemoryHost};
