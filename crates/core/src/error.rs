//! Error types for styling and serialization.

use thiserror::Error;

/// Errors raised while resolving styles or serializing a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The resolved graph `type` attribute was neither `graph` nor `digraph`.
    #[error("Invalid graph type {found:?}, expected \"graph\" or \"digraph\"")]
    InvalidGraphType { found: String },

    /// A color attribute held a value that is neither a string nor RGB/RGBA channels.
    #[error("Invalid color for attribute {attribute:?}: {reason}")]
    InvalidColor { attribute: String, reason: String },

    /// A markup node was built with an inconsistent shape.
    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),

    /// A `switch` selected a key with no case and no default.
    #[error("No case matches key {key} and no default was given")]
    Lookup { key: String },

    /// Any other malformed input.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// Check if this error came from a `switch` lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::Lookup { .. })
    }
}

/// Result alias used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
