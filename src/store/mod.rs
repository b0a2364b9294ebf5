//! Observable single-value stores.
//!
//! A [`Store`] holds one value, replaced wholesale on every write, and
//! notifies its subscribers synchronously after each commit.

mod store;
mod subscription;

pub use store::{Store, Validator, WeakStore};
pub use subscription::Subscription;
