//! Error types for tola-mount.
//!
//! Contract violations are fatal to the render cycle that raised them. The only
//! recoverable condition is a failed surface lookup ([`SurfaceError::NotFound`]).

use thiserror::Error;

use crate::event::EventKind;
use crate::node::NodeId;

/// A reconciler/applier bug or a caller contract breach.
///
/// Every "should never happen" condition surfaces as one of these instead of a
/// panic. None of them are recoverable: the surface may already be inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A node that already has a live binding was materialized again
    #[error("node {node} is already mounted")]
    AlreadyMounted {
        /// The offending node
        node: NodeId,
    },

    /// A node without a live binding was used where one is required
    #[error("node {node} has no live binding")]
    Unmounted {
        /// The offending node
        node: NodeId,
    },

    /// A surplus old child to be removed has no live binding
    #[error("child {index} of node {parent} has no live binding")]
    UnmountedChild {
        /// The kept parent, in the new tree
        parent: NodeId,
        /// Child index in the old tree
        index: usize,
    },

    /// A child was attached to, replaced in or removed from an unmounted parent
    #[error("parent node {node} has no live binding")]
    UnmountedParent {
        /// The parent
        node: NodeId,
    },

    /// A declared handler has no native listener to remove or carry over
    #[error("{kind} handler on node {node} has no native listener")]
    MissingListener {
        /// Event kind of the handler
        kind: EventKind,
        /// The node declaring it
        node: NodeId,
    },

    /// A listener was added on top of one that is still registered
    #[error("{kind} listener on node {node} is already registered")]
    DuplicateListener {
        /// Event kind of the listener
        kind: EventKind,
        node: NodeId,
    },

    /// A listener was added for a kind the node does not declare
    #[error("{kind} listener added on node {node} without a declared handler")]
    UndeclaredHandler {
        /// Event kind of the listener
        kind: EventKind,
        node: NodeId,
    },

    /// An element-only change targeted a text node
    #[error("node {node} is not an element")]
    NotAnElement { node: NodeId },

    /// A change addressed a node the mounted tree does not have
    #[error("no node {node} in the mounted tree")]
    DanglingNode { node: NodeId },

    /// An element cannot be created without a tag
    #[error("element {node} has an empty tag")]
    EmptyTag { node: NodeId },
}

/// Errors reported by a surface adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Lookup of a live object failed (recoverable)
    #[error("surface lookup failed: {what} not found")]
    NotFound {
        /// Description of what was looked up
        what: String,
    },

    /// The adapter refused or failed an operation
    #[error("surface rejected {operation}: {reason}")]
    Rejected {
        /// Name of the surface operation
        operation: &'static str,
        /// Adapter-provided reason
        reason: String,
    },
}

impl SurfaceError {
    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a rejection error for an operation.
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }

    /// Check if this is the recoverable not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors returned by [`Mounter`](crate::mount::Mounter).
#[derive(Debug, Error)]
pub enum MountError {
    /// The Mounter lacks a root handle or a surface
    #[error("mount requires a bound {missing}")]
    Config {
        /// Name of the missing piece
        missing: &'static str,
    },

    /// Reconciliation or application broke an invariant
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// The surface adapter failed
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// An earlier render cycle failed and left the surface inconsistent
    #[error("mounter is poisoned by an earlier failed render")]
    Poisoned,
}

impl MountError {
    /// Check if this error is the recoverable surface not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Surface(err) if err.is_not_found())
    }
}

/// Errors from parsing a serialized style string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleParseError {
    /// A declaration without a `:` separator
    #[error("malformed style declaration: {0:?}")]
    Malformed(String),

    /// A property this crate does not model
    #[error("unknown style property: {0}")]
    UnknownProperty(String),

    /// A known property with an unparseable value
    #[error("invalid value for {property}: {value:?}")]
    InvalidValue {
        /// CSS property name
        property: String,
        /// The rejected value
        value: String,
    },
}

/// Errors from the render queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The consuming side of the queue was dropped
    #[error("render queue is closed")]
    Closed,
}

/// Result type alias for mount operations.
pub type MountResult<T> = Result<T, MountError>;

/// Result type alias for surface adapter operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;
