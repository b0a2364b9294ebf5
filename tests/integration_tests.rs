//! Integration tests for shared-state

use serde_json::json;
use shared_state::{
    Action, App, BootstrapConfig, BootstrapError, MemoryHost, SharedStore, Store, View,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

#[test]
fn scenario_full_replacement() {
    let store = SharedStore::new();

    assert_eq!(store.shared_data(), json!({}));

    store
        .dispatch(Action::UpdateData(json!({ "user": "alice" })))
        .unwrap();
    assert_eq!(store.shared_data(), json!({ "user": "alice" }));

    store.dispatch(Action::UpdateData(json!({ "count": 5 }))).unwrap();
    // `user` is gone
    assert_eq!(store.shared_data(), json!({ "count": 5 }));
}

#[test]
fn store_subscription() {
    let store = Store::new(0);
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let _sub = store.subscribe(move |_| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(counter.load(Ordering::SeqCst), 0);

    store.set(1).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    store.set(2).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn every_subscriber_notified_once_per_update() {
    let store = SharedStore::new();
    let counters: Vec<Arc<AtomicUsize>> = (0..4).map(|_| Arc::new(AtomicUsize::new(0))).collect();

    let _subs: Vec<_> = counters
        .iter()
        .map(|counter| {
            let counter = counter.clone();
            store.subscribe(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    store.update_data(json!({ "a": 1 })).unwrap();
    store.update_data(json!({ "b": 2 })).unwrap();
    store.update_data(json!({ "b": 2 })).unwrap();

    for counter in &counters {
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}

#[test]
fn subscriber_never_sees_old_value() {
    let store = SharedStore::new();
    let observed = Arc::new(Mutex::new(Vec::new()));

    let weak = store.downgrade();
    let observed_clone = observed.clone();
    let _sub = store.subscribe(move |state| {
        let live = weak.upgrade().map(|s| s.shared_data());
        observed_clone
            .lock()
            .unwrap()
            .push((state.shared_data.clone(), live));
    });

    store.update_data(json!({ "n": 1 })).unwrap();
    store.update_data(json!({ "n": 2 })).unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 2);
    for (argument, live) in observed.iter() {
        assert_eq!(Some(argument), live.as_ref());
    }
}

#[test]
fn nested_commit_hands_later_subscribers_the_final_state() {
    let store = SharedStore::new();

    let weak = store.downgrade();
    let _stepper = store.subscribe(move |state| {
        if state.shared_data == json!({ "step": 1 }) {
            if let Some(store) = weak.upgrade() {
                store.update_data(json!({ "step": 2 })).unwrap();
            }
        }
    });

    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_clone = observed.clone();
    let _watcher = store.subscribe(move |state| {
        observed_clone
            .lock()
            .unwrap()
            .push(state.shared_data.clone());
    });

    store.update_data(json!({ "step": 1 })).unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 2);
    assert_eq!(observed.last(), Some(&store.shared_data()));
    assert!(observed.iter().all(|v| *v == json!({ "step": 2 })));
}

#[test]
fn rejected_update_leaves_state_alone() {
    let store = SharedStore::strict();
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    let _sub = store.subscribe(move |_| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert!(store.update_data(json!("not an object")).is_err());
    assert_eq!(store.shared_data(), json!({}));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

struct Header;

impl View for Header {
    fn render(&self, store: &SharedStore) -> String {
        let user = store.shared_data()["user"].as_str().unwrap_or("guest").to_string();
        format!("<header>{user}</header>")
    }
}

struct Counter;

impl View for Counter {
    fn render(&self, store: &SharedStore) -> String {
        let count = store.shared_data()["count"].as_i64().unwrap_or(0);
        format!("<span>{count}</span>")
    }
}

struct Layout {
    children: Vec<Box<dyn View>>,
}

impl View for Layout {
    fn render(&self, store: &SharedStore) -> String {
        let inner: String = self.children.iter().map(|c| c.render(store)).collect();
        format!("<main>{inner}</main>")
    }
}

#[test]
fn mounted_tree_reacts_to_dispatch() {
    let host = Arc::new(MemoryHost::new().with_element("app"));
    let root = Layout {
        children: vec![Box::new(Header), Box::new(Counter)],
    };

    let app = App::new(root)
        .use_store(SharedStore::new())
        .mount_with_config(host.clone(), &BootstrapConfig::default())
        .unwrap();

    assert_eq!(
        host.content("app").as_deref(),
        Some("<main><header>guest</header><span>0</span></main>")
    );

    app.store()
        .update_data(json!({ "user": "alice", "count": 5 }))
        .unwrap();
    assert_eq!(
        host.content("app").as_deref(),
        Some("<main><header>alice</header><span>5</span></main>")
    );

    app.store().update_data(json!({ "count": 6 })).unwrap();
    assert_eq!(
        host.content("app").as_deref(),
        Some("<main><header>guest</header><span>6</span></main>")
    );
    assert_eq!(app.render_count(), 3);
}

#[test]
fn mount_point_from_config() {
    let host = Arc::new(MemoryHost::new().with_element("root"));
    let config = BootstrapConfig::from_toml_str(r##"mount_point = "#root""##).unwrap();

    let app = App::new(Header)
        .use_store(SharedStore::new())
        .mount_with_config(host.clone(), &config)
        .unwrap();

    assert_eq!(app.element_id(), "root");
    assert_eq!(host.content("root").as_deref(), Some("<header>guest</header>"));
}

#[test]
fn mount_fails_without_host_element() {
    let host = Arc::new(MemoryHost::new());
    let result = App::new(Header)
        .use_store(SharedStore::new())
        .mount(host, "#app");

    assert!(matches!(
        result,
        Err(BootstrapError::MissingHostElement { ref id }) if id == "app"
    ));
}
