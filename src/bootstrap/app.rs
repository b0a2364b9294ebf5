use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::config::{element_id, BootstrapConfig};
use super::host::Host;
use crate::error::BootstrapError;
use crate::state::SharedStore;
use crate::store::Subscription;

/// A node of the UI tree.
///
/// The installed store is handed to every render call; composite views pass
/// it on to their children.
pub trait View: Send + Sync {
    /// Render this node, and its children, to markup.
    fn render(&self, store: &SharedStore) -> String;
}

impl<F> View for F
where
    F: Fn(&SharedStore) -> String + Send + Sync,
{
    fn render(&self, store: &SharedStore) -> String {
        self(store)
    }
}

/// An unmounted application: a root view plus its store.
pub struct App {
    root: Arc<dyn View>,
    store: Option<SharedStore>,
}

impl App {
    /// Wrap `root` as the top of the UI tree.
    pub fn new(root: impl View + 'static) -> Self {
        Self {
            root: Arc::new(root),
            store: None,
        }
    }

    /// Install the store the view tree reads from and dispatches to.
    pub fn use_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Mount at the element named by `config.mount_point`.
    pub fn mount_with_config(
        self,
        host: Arc<dyn Host>,
        config: &BootstrapConfig,
    ) -> Result<MountedApp, BootstrapError> {
        config.validate()?;
        self.mount(host, &config.mount_point)
    }

    /// Render the root into `selector` and re-render on every commit.
    ///
    /// # Errors
    /// - [`BootstrapError::StoreNotInstalled`] if [`App::use_store`] was never called
    /// - [`BootstrapError::InvalidMountPoint`] if `selector` is not an element id
    /// - [`BootstrapError::MissingHostElement`] if the host has no such element
    pub fn mount(self, host: Arc<dyn Host>, selector: &str) -> Result<MountedApp, BootstrapError> {
        let store = self.store.ok_or(BootstrapError::StoreNotInstalled)?;
        let id = element_id(selector)
            .ok_or_else(|| BootstrapError::InvalidMountPoint {
                selector: selector.to_string(),
            })?
            .to_string();

        if !host.contains(&id) {
            return Err(BootstrapError::MissingHostElement { id });
        }

        let renders = Arc::new(AtomicUsize::new(0));
        let initial_error = Arc::new(Mutex::new(None::<BootstrapError>));

        // The initial render runs under the store's commit lock, so no commit
        // can land between it and the subscription.
        let subscription = {
            let root = Arc::clone(&self.root);
            let host = Arc::clone(&host);
            let id = id.clone();
            let renders = Arc::clone(&renders);
            let initial_error = Arc::clone(&initial_error);
            let weak = store.downgrade();
            store.watch(move |_| {
                let Some(store) = weak.upgrade() else {
                    return;
                };
                match host.render(&id, root.render(&store)) {
                    Ok(()) => {
                        renders.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(err) if renders.load(Ordering::SeqCst) == 0 => {
                        *initial_error.lock() = Some(err);
                    }
                    Err(err) => tracing::warn!(element = %id, %err, "Re-render failed"),
                }
            })
        };

        if let Some(err) = initial_error.lock().take() {
            return Err(err);
        }

        tracing::info!(element = %id, "App mounted");

        Ok(MountedApp {
            store,
            element_id: id,
            renders,
            subscription,
        })
    }
}

/// An app rendered into a host element.
///
/// Dropping it, or calling [`MountedApp::unmount`], stops re-rendering.
pub struct MountedApp {
    store: SharedStore,
    element_id: String,
    renders: Arc<AtomicUsize>,
    subscription: Subscription,
}

impl MountedApp {
    /// The installed store.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Id of the host element the app renders into.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Renders so far, including the initial one.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Stop reacting to store commits. Host content is left as-is.
    pub fn unmount(self) -> SharedStore {
        self.subscription.unsubscribe();
        tracing::info!(element = %self.element_id, "App unmounted");
        self.store
    }
}
