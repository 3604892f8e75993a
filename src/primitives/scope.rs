//! Scope - The handle a component receives while it is built or updated.
//!
//! A [`Scope`] pairs the tree with the node the caller is acting as. Every
//! register and lookup goes through it, so the "current component" is always
//! explicit: there is no hidden global cursor to forget to set or to leak
//! between trees.
//!
//! # Construction order
//!
//! A node's construction phase ends when it creates its first child. All
//! registrations a component makes before building children are therefore
//! visible to those children during their own construction.
//!
//! ```ignore
//! tree_scope.child(|cx| {
//!     cx.provide(&THEME, Theme::dark())?;   // constructing
//!     cx.child(|leaf| {                     // parent is now active
//!         let theme = leaf.resolve(&THEME)?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//! ```

use std::rc::Rc;

use crate::engine::Tree;
use crate::error::{ContextError, Result};
use crate::types::{ContextValue, Key, NodeId, Phase};

use super::component::Component;
use super::view::{ReadScope, ScopeRef};

/// Tree handle bound to one live node.
pub struct Scope<'t> {
    tree: &'t mut Tree,
    node: NodeId,
}

impl<'t> Scope<'t> {
    /// Bind a scope to `node`. Fails when the node is not live in `tree`.
    pub fn new(tree: &'t mut Tree, node: NodeId) -> Result<Self> {
        if !tree.is_live(node) {
            return Err(ContextError::MissingContext { node });
        }
        Ok(Self { tree, node })
    }

    /// The node this scope acts as.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn phase(&self) -> Phase {
        self.tree.phase(self.node).unwrap_or(Phase::Destroyed)
    }

    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    // =========================================================================
    // Context
    // =========================================================================

    /// Bind `value` to `key` at this node.
    pub fn register(&mut self, key: &str, value: ContextValue) -> Result<()> {
        self.tree.register(self.node, key, value)
    }

    /// Bind a plain value to `key` at this node.
    pub fn register_value<T: 'static>(&mut self, key: &str, value: T) -> Result<()> {
        self.tree.register_value(self.node, key, value)
    }

    /// Bind a value under a typed key.
    pub fn provide<T: 'static>(&mut self, key: &Key<T>, value: T) -> Result<()> {
        self.tree.provide(self.node, key, value)
    }

    /// Nearest binding for `key` at or above this node.
    pub fn lookup(&self, key: &str) -> Result<Option<ContextValue>> {
        self.tree.lookup(self.node, key)
    }

    /// Nearest binding for `key`, downcast to `T`.
    pub fn lookup_value<T: 'static>(&self, key: &str) -> Result<Option<Rc<T>>> {
        self.tree.lookup_value(self.node, key)
    }

    /// Nearest binding for a typed key.
    pub fn resolve<T: 'static>(&self, key: &Key<T>) -> Result<Option<Rc<T>>> {
        self.tree.resolve(self.node, key)
    }

    /// Run `callback` when this node is destroyed.
    pub fn on_destroy(&mut self, callback: impl FnOnce() + 'static) -> Result<()> {
        self.tree.on_destroy(self.node, callback)
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Build a child node.
    ///
    /// Ends this node's construction phase, creates the child, runs `build`
    /// in the child's scope and then activates the child. If `build` fails the
    /// partially built child subtree is destroyed and the error is returned.
    pub fn child<F>(&mut self, build: F) -> Result<NodeId>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<()>,
    {
        self.tree.finish_construction(self.node)?;
        let child = self.tree.create_node(Some(self.node))?;

        let built = build(&mut Scope {
            tree: &mut *self.tree,
            node: child,
        });
        if let Err(err) = built {
            // `build` may already have destroyed the child itself
            if self.tree.is_live(child) {
                self.tree.destroy_subtree(child)?;
            }
            return Err(err);
        }

        self.tree.finish_construction(child)?;
        Ok(child)
    }

    /// Mount `component` as a child of this node.
    pub fn component<C: Component + ?Sized>(&mut self, component: &mut C) -> Result<NodeId> {
        self.child(|cx| component.setup(cx))
    }

    /// A lookup-only handle for another live node of the same tree.
    ///
    /// Only the owning component writes a node's entries, so this never
    /// hands out a writable scope.
    pub fn scope_for(&self, node: NodeId) -> Result<ScopeRef<'_>> {
        ScopeRef::new(&*self.tree, node)
    }
}

impl ReadScope for Scope<'_> {
    fn tree(&self) -> &Tree {
        &*self.tree
    }

    fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("tree", &self.tree.id())
            .field("node", &self.node)
            .finish()
    }
}
