//! Errors raised by the context channel.
//!
//! A lookup that finds nothing is not an error: it returns `Ok(None)` and the
//! caller falls back to its default behavior.

use thiserror::Error;

use crate::types::NodeId;

/// Misuse of the context channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The handle does not name a live component of this tree.
    ///
    /// Raised for ids that were never issued by the tree, ids of destroyed
    /// nodes, and ids belonging to another tree instance.
    #[error("no active component for context call: {node} is not live in this tree")]
    MissingContext { node: NodeId },

    /// The key is empty or malformed.
    #[error("invalid context key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Registration attempted after the node finished construction while the
    /// tree is configured to reject late registrations.
    #[error("component {node} finished construction, cannot register {key:?}")]
    RegistrationClosed { node: NodeId, key: String },

    /// A typed lookup resolved an entry holding another type.
    #[error("context value for {key:?} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    /// Creating the node would exceed the configured maximum depth.
    #[error("component depth {depth} exceeds configured maximum {max}")]
    DepthExceeded { depth: usize, max: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ContextError>;
