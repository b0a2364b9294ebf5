//! Error types for stores, configuration and mounting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned when committing a new value to a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store's validator rejected the value.
    #[error("Validation failed: {message}")]
    Validation {
        /// Reason given by the validator.
        message: String,
    },
}

/// Errors that can occur when loading bootstrap configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML for [`crate::BootstrapConfig`].
    #[error("Failed to parse config: {source}")]
    Parse {
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The config parsed but holds an unusable value.
    #[error("Config validation failed: {message}")]
    Validation {
        /// What is wrong with it.
        message: String,
    },
}

/// Errors that can occur while mounting an app into a host.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// `mount` was called before `use_store`.
    #[error("No store installed; call `use_store` before `mount`")]
    StoreNotInstalled,

    /// The selector does not name an element id.
    #[error("Invalid mount point '{selector}'")]
    InvalidMountPoint {
        /// Selector as given.
        selector: String,
    },

    /// The host has no element with this id.
    #[error("Host element '#{id}' not found")]
    MissingHostElement {
        /// Element id, without the leading `#`.
        id: String,
    },

    /// Bootstrap configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
