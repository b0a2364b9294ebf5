use parking_lot::{ReentrantMutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use super::subscription::{Registry, Subscription};
use crate::error::StoreError;

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Validation hook run against every value passed to [`Store::set`].
pub type Validator<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

struct Inner<T> {
    state: RwLock<Arc<T>>,
    // Registration order is notification order.
    subscribers: RwLock<Vec<(u64, Subscriber<T>)>>,
    // Held across replace + notify so commits never interleave.
    commit: ReentrantMutex<()>,
    next_id: AtomicU64,
    validator: Option<Validator<T>>,
}

impl<T: Send + Sync> Registry for Inner<T> {
    fn remove(&self, id: u64) {
        self.subscribers.write().retain(|(sub_id, _)| *sub_id != id);
    }
}

/// A thread-safe, observable store holding a single value.
///
/// Every write is a full replacement. Readers see either the previous value
/// or the new one, never a mix of both. Subscribers are notified
/// synchronously, in registration order, after the new value is committed
/// and before [`Store::set`] returns.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T: Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self::build(initial, None)
    }

    /// Create a store whose writes are checked by `validator`.
    ///
    /// The initial value is trusted and not validated.
    pub fn with_validator<F>(initial: T, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::build(initial, Some(Arc::new(validator)))
    }

    fn build(initial: T, validator: Option<Validator<T>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(initial)),
                subscribers: RwLock::new(Vec::new()),
                commit: ReentrantMutex::new(()),
                next_id: AtomicU64::new(0),
                validator,
            }),
        }
    }

    /// Shared pointer to the current state.
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.inner.state.read())
    }

    /// Read state through a closure without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.snapshot();
        f(&state)
    }

    /// Replace the state and notify subscribers.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] if the store has a validator and it
    /// rejects `new_state`. The store and its subscribers are left untouched.
    pub fn set(&self, new_state: T) -> Result<(), StoreError> {
        if let Some(validator) = &self.inner.validator {
            if let Err(message) = validator(&new_state) {
                tracing::warn!(%message, "Store update rejected");
                return Err(StoreError::Validation { message });
            }
        }

        let _commit = self.inner.commit.lock();
        *self.inner.state.write() = Arc::new(new_state);
        self.notify();
        Ok(())
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every successful [`Store::set`] until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.write().push((id, Arc::new(callback)));

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let registry: Weak<dyn Registry> = weak;
        Subscription::new(id, registry)
    }

    /// Subscribe and run the callback once with the current state.
    ///
    /// The first call and the registration happen under the commit lock, so
    /// no commit from another thread can slip in between them.
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _commit = self.inner.commit.lock();
        let callback = Arc::new(callback);
        let subscription = {
            let callback = Arc::clone(&callback);
            self.subscribe(move |state| callback(state))
        };
        callback(&*self.snapshot());
        subscription
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Weak handle that does not keep the store alive.
    ///
    /// Subscribers that need to reach the store they are registered on should
    /// hold one of these, otherwise the store would own itself.
    pub fn downgrade(&self) -> WeakStore<T> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn notify(&self) {
        // Snapshot so callbacks may subscribe or unsubscribe while running.
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .read()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        tracing::debug!(subscribers = subscribers.len(), "Store committed");
        // A subscriber may commit again; later ones get the newest state.
        for subscriber in subscribers {
            subscriber(&*self.snapshot());
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        T::clone(&self.inner.state.read())
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Non-owning handle to a [`Store`].
pub struct WeakStore<T> {
    inner: Weak<Inner<T>>,
}

impl<T> WeakStore<T> {
    /// Upgrade to a full store handle if the store is still alive.
    pub fn upgrade(&self) -> Option<Store<T>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<T> Clone for WeakStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}
