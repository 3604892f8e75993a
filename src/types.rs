//! Core types for the context channel.
//!
//! Identifiers, node phases and keys. Everything here is plain data; the
//! arena that gives these types meaning lives in [`crate::engine`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ContextError, Result};

// =============================================================================
// Identifiers
// =============================================================================

/// Process-wide counter for tree ids. Starts at 1 so 0 never names a tree.
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one Tree Instance.
///
/// Every [`Tree`](crate::engine::Tree) gets a fresh id, even when two trees are
/// built from identical components. Node ids carry their tree id, which is how
/// a handle from one tree is rejected by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(u64);

impl TreeId {
    /// Allocate the next unused tree id.
    pub(crate) fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Handle to one component node inside a tree.
///
/// `index` addresses the arena slot, `generation` is bumped every time the slot
/// is freed so ids of destroyed nodes never alias a later occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) tree: TreeId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// The tree this node belongs to.
    pub fn tree(&self) -> TreeId {
        self.tree
    }

    /// Arena slot index.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Slot generation at the time this id was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n{}v{}", self.tree, self.index, self.generation)
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Lifecycle phase of a component node with respect to context.
///
/// ```text
/// Uninitialized → Constructing → Active → Destroyed
/// ```
///
/// `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Free arena slot with no node in it.
    ///
    /// Never reported for an issued [`NodeId`]: nodes are created directly in
    /// `Constructing`, and ids of released slots report `Destroyed`.
    #[default]
    Uninitialized,
    /// Construction in progress; registrations are accepted.
    Constructing,
    /// Construction finished; lookups are accepted, registrations discouraged.
    Active,
    /// Entries discarded, node removed from every resolution chain.
    Destroyed,
}

impl Phase {
    /// Registrations are expected in this phase.
    pub fn accepts_registration(self) -> bool {
        matches!(self, Phase::Constructing)
    }

    /// Lookups are allowed in this phase.
    pub fn accepts_lookup(self) -> bool {
        matches!(self, Phase::Constructing | Phase::Active)
    }

    /// The node takes part in resolution chains.
    pub fn is_live(self) -> bool {
        self.accepts_lookup()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Constructing => "constructing",
            Phase::Active => "active",
            Phase::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Opaque payload stored under a key.
///
/// The channel never looks inside; consumers downcast to the type the
/// registering component agreed on.
pub type ContextValue = Rc<dyn Any>;

/// A validated context key.
///
/// Keys must be non-empty, carry no leading or trailing whitespace and contain
/// no control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(Rc<str>);

impl ContextKey {
    /// Validate `name` and wrap it as a key.
    pub fn new(name: &str) -> Result<Self> {
        validate_key(name)?;
        Ok(Self(Rc::from(name)))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ContextKey {
    type Error = ContextError;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

impl TryFrom<String> for ContextKey {
    type Error = ContextError;

    fn try_from(name: String) -> Result<Self> {
        Self::new(&name)
    }
}

impl AsRef<str> for ContextKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Check a raw key against the naming rules.
pub fn validate_key(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "key must not be empty"
    } else if name.trim() != name {
        "key must not have leading or trailing whitespace"
    } else if name.chars().any(char::is_control) {
        "key must not contain control characters"
    } else {
        return Ok(());
    };
    Err(ContextError::InvalidKey {
        key: name.to_string(),
        reason,
    })
}

/// Typed key: a name plus the value type stored under it.
///
/// Declare once as a constant and use it on both the providing and the
/// consuming side so the two agree on the payload type.
///
/// ```ignore
/// pub const THEME: Key<Theme> = Key::new("theme");
///
/// cx.provide(&THEME, Theme::dark())?;
/// let theme = cx.resolve(&THEME)?;
/// ```
pub struct Key<T: 'static> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Key<T> {
    /// Declare a typed key. The name is validated on first use.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The key name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Key<T> {}

impl<T: 'static> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_ids_are_unique() {
        let a = TreeId::next();
        let b = TreeId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_phase_transitions_flags() {
        assert!(!Phase::Uninitialized.accepts_lookup());
        assert!(Phase::Constructing.accepts_registration());
        assert!(Phase::Constructing.accepts_lookup());
        assert!(!Phase::Active.accepts_registration());
        assert!(Phase::Active.is_live());
        assert!(!Phase::Destroyed.is_live());
    }

    #[test]
    fn test_valid_keys() {
        assert!(ContextKey::new("renderCallback").is_ok());
        assert!(ContextKey::new("editor.theme").is_ok());
        assert!(ContextKey::new("a b").is_ok());
    }

    #[test]
    fn test_invalid_keys() {
        for bad in ["", " leading", "trailing ", "tab\tinside", "\n"] {
            let err = ContextKey::new(bad).unwrap_err();
            assert!(
                matches!(err, ContextError::InvalidKey { ref key, .. } if key == bad),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_typed_key_debug_names_type() {
        const COUNT: Key<u32> = Key::new("count");
        let debug = format!("{:?}", COUNT);
        assert!(debug.contains("count"));
        assert!(debug.contains("u32"));
    }
}
