//! Application state: the shared data blob and its mutation/action pair.
//!
//! The state holds exactly one field, `sharedData`, of unconstrained shape.
//! It starts out as the empty object `{}` and is only ever replaced as a
//! whole through [`Mutation::UpdateData`], usually reached by dispatching
//! [`Action::UpdateData`].

mod shared;

pub use shared::{object_only, Action, Mutation, SharedState, SharedStore, WeakSharedStore};
