use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::store::{Store, Subscription, WeakStore};

/// The application's state tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedState {
    /// Opaque data blob, `{}` until the first update.
    pub shared_data: Value,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            shared_data: Value::Object(Map::new()),
        }
    }
}

/// Synchronous state transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Replace `sharedData` in its entirety.
    UpdateData(Value),
}

impl Mutation {
    /// Name the mutation is logged under.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::UpdateData(_) => "updateData",
        }
    }
}

/// Public entry points that commit mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Commits [`Mutation::UpdateData`] with the same value.
    UpdateData(Value),
}

/// Validator accepting only JSON objects as `sharedData`.
pub fn object_only(value: &Value) -> Result<(), String> {
    match value {
        Value::Object(_) => Ok(()),
        other => Err(format!("sharedData must be an object, got {}", kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The application store.
///
/// Cloning yields another handle to the same state. The store accepts any
/// value by default; use [`SharedStore::strict`] or
/// [`SharedStore::with_validator`] to reject malformed data.
#[derive(Clone)]
pub struct SharedStore {
    store: Store<SharedState>,
}

impl SharedStore {
    /// Permissive store with `sharedData = {}`.
    pub fn new() -> Self {
        Self {
            store: Store::new(SharedState::default()),
        }
    }

    /// Store that only accepts objects as `sharedData`.
    pub fn strict() -> Self {
        Self::with_validator(object_only)
    }

    /// Store whose `sharedData` updates are checked by `validator`.
    pub fn with_validator<F>(validator: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            store: Store::with_validator(SharedState::default(), move |state: &SharedState| {
                validator(&state.shared_data)
            }),
        }
    }

    /// Current value of `sharedData`.
    pub fn shared_data(&self) -> Value {
        self.store.read(|state| state.shared_data.clone())
    }

    /// Clone of the whole state tree.
    pub fn state(&self) -> SharedState {
        self.store.get()
    }

    /// Apply a mutation and notify subscribers.
    pub fn commit(&self, mutation: Mutation) -> Result<(), StoreError> {
        tracing::debug!(mutation = mutation.name(), "Committing mutation");
        match mutation {
            Mutation::UpdateData(shared_data) => self.store.set(SharedState { shared_data }),
        }
    }

    /// Run an action.
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        match action {
            Action::UpdateData(value) => self.commit(Mutation::UpdateData(value)),
        }
    }

    /// Shorthand for dispatching [`Action::UpdateData`].
    pub fn update_data(&self, value: Value) -> Result<(), StoreError> {
        self.dispatch(Action::UpdateData(value))
    }

    /// Subscribe to committed state changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SharedState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Subscribe and run the callback once with the current state.
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SharedState) + Send + Sync + 'static,
    {
        self.store.watch(callback)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }

    /// Non-owning handle, for subscribers that read back from the store.
    pub fn downgrade(&self) -> WeakSharedStore {
        WeakSharedStore {
            store: self.store.downgrade(),
        }
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak counterpart of [`SharedStore`].
#[derive(Clone)]
pub struct WeakSharedStore {
    store: WeakStore<SharedState>,
}

impl WeakSharedStore {
    /// Upgrade to a full handle if the store is still alive.
    pub fn upgrade(&self) -> Option<SharedStore> {
        self.store.upgrade().map(|store| SharedStore { store })
    }
}
