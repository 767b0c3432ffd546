//! Error types for multisort.

use thiserror::Error;

use crate::core::Key;

/// Errors that can occur while configuring or running a sort.
#[derive(Debug, Error)]
pub enum SortError {
    /// The configured accessor strategy is not one of the accepted names.
    #[error("invalid getter '{found}': expected one of {accepted}")]
    InvalidGetter {
        found: String,
        accepted: &'static str,
    },

    /// Two sort values have no ordering between them.
    #[error("cannot order {left} against {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// Item lookup found nothing under the key.
    #[error("record has no item '{key}'")]
    MissingItem { key: Key },

    /// The key cannot address items of this kind of record.
    #[error("{kind} items cannot be looked up by '{key}'")]
    InvalidItemKey { kind: &'static str, key: Key },

    /// The record does not support item lookup at all.
    #[error("{kind} does not support item lookup")]
    NotSubscriptable { kind: &'static str },

    /// Attribute lookup found nothing under the name.
    #[error("{kind} has no attribute '{name}'")]
    MissingAttribute { kind: &'static str, name: String },

    /// Attribute names must be strings.
    #[error("attribute name must be a string, got index {key}")]
    InvalidAttributeName { key: Key },

    /// A configuration document could not be parsed.
    #[error("invalid sort configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for multisort operations.
pub type Result<T> = std::result::Result<T, SortError>;
