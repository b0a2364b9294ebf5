use std::sync::Weak;

/// Something a [`Subscription`] can remove itself from.
pub(crate) trait Registry: Send + Sync {
    fn remove(&self, id: u64);
}

/// RAII handle for a store subscriber.
///
/// Dropping the handle removes the callback. Use [`Subscription::detach`]
/// to keep the callback registered for as long as the store lives.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<dyn Registry>) -> Self {
        Self {
            id,
            registry: Some(registry),
        }
    }

    /// Identifier of this subscription within its store.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keep the callback registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.registry = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.registry.is_some())
            .finish()
    }
}
