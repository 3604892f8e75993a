//! ScopeRef - Read-only handle to a node.
//!
//! A component writes only through its own [`Scope`](super::Scope). For any
//! other node (an ancestor it wants to inspect, or any node of a mounted tree
//! during update and render phases) it gets a [`ScopeRef`], which can resolve
//! context but never register, destroy or build.
//!
//! ```compile_fail
//! use spark_context::{mount, Key, TreeConfig};
//!
//! const NAME: Key<&str> = Key::new("name");
//!
//! mount(TreeConfig::default(), |cx| {
//!     let root = cx.node();
//!     cx.child(|leaf| leaf.scope_for(root)?.provide(&NAME, "leaf"))?;
//!     Ok(())
//! })
//! .unwrap();
//! ```

use std::rc::Rc;

use crate::engine::Tree;
use crate::error::{ContextError, Result};
use crate::types::{ContextValue, Key, NodeId, Phase};

/// Anything that names a live node of a tree for lookups.
///
/// Implemented by [`Scope`](super::Scope) and [`ScopeRef`], so read-only
/// helpers accept either.
pub trait ReadScope {
    fn tree(&self) -> &Tree;

    fn node(&self) -> NodeId;
}

/// Lookup-only handle bound to one live node.
#[derive(Clone, Copy)]
pub struct ScopeRef<'t> {
    tree: &'t Tree,
    node: NodeId,
}

impl<'t> ScopeRef<'t> {
    /// Bind to `node`. Fails when the node is not live in `tree`.
    pub fn new(tree: &'t Tree, node: NodeId) -> Result<Self> {
        if !tree.is_live(node) {
            return Err(ContextError::MissingContext { node });
        }
        Ok(Self { tree, node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn phase(&self) -> Phase {
        self.tree.phase(self.node).unwrap_or(Phase::Destroyed)
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Nearest binding for `key` at or above this node.
    pub fn lookup(&self, key: &str) -> Result<Option<ContextValue>> {
        self.tree.lookup(self.node, key)
    }

    pub fn lookup_value<T: 'static>(&self, key: &str) -> Result<Option<Rc<T>>> {
        self.tree.lookup_value(self.node, key)
    }

    pub fn resolve<T: 'static>(&self, key: &Key<T>) -> Result<Option<Rc<T>>> {
        self.tree.resolve(self.node, key)
    }
}

impl ReadScope for ScopeRef<'_> {
    fn tree(&self) -> &Tree {
        self.tree
    }

    fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Debug for ScopeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRef")
            .field("tree", &self.tree.id())
            .field("node", &self.node)
            .finish()
    }
}
