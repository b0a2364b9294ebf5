//! # shared-state
//!
//! A single-writer, observable state store and the bootstrap that wires it
//! into a UI tree.
//!
//! ## Store (generic core)
//!
//! - `Store<T>` - Thread-safe container replaced wholesale on every write
//! - Synchronous notification of subscribers, in registration order
//! - Optional validation hook for rejecting malformed values
//!
//! ## Shared state
//!
//! - `SharedStore` - The application store holding one `sharedData` blob
//! - `Mutation::UpdateData` / `Action::UpdateData` - the only transition
//!
//! ## Bootstrap
//!
//! - `App` - Root view plus installed store, mounted at a host element
//! - `BootstrapConfig` - Mount point, loadable from TOML

#![warn(missing_docs)]

pub mod bootstrap;
pub mod error;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use bootstrap::{App, BootstrapConfig, Host, MemoryHost, MountedApp, View};
pub use error::{BootstrapError, ConfigError, StoreError};
pub use state::{Action, Mutation, SharedState, SharedStore};
pub use store::{Store, Subscription};
