use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::BootstrapError;

/// The document an app is mounted into.
pub trait Host: Send + Sync {
    /// Whether an element with `id` exists.
    fn contains(&self, id: &str) -> bool;

    /// Replace the content of element `id`.
    fn render(&self, id: &str, content: String) -> Result<(), BootstrapError>;
}

/// In-memory host document mapping element ids to their rendered content.
#[derive(Debug, Default)]
pub struct MemoryHost {
    elements: RwLock<HashMap<String, String>>,
}

impl MemoryHost {
    /// Empty document with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryHost::add_element`].
    pub fn with_element(self, id: impl Into<String>) -> Self {
        self.add_element(id);
        self
    }

    /// Add an empty element. Existing content is kept.
    pub fn add_element(&self, id: impl Into<String>) {
        self.elements.write().entry(id.into()).or_default();
    }

    /// Remove an element, returning its content.
    pub fn remove_element(&self, id: &str) -> Option<String> {
        self.elements.write().remove(id)
    }

    /// Current content of element `id`.
    pub fn content(&self, id: &str) -> Option<String> {
        self.elements.read().get(id).cloned()
    }
}

impl Host for MemoryHost {
    fn contains(&self, id: &str) -> bool {
        self.elements.read().contains_key(id)
    }

    fn render(&self, id: &str, content: String) -> Result<(), BootstrapError> {
        match self.elements.write().get_mut(id) {
            Some(slot) => {
                *slot = content;
                Ok(())
            }
            None => Err(BootstrapError::MissingHostElement { id: id.to_string() }),
        }
    }
}
