//! Mount API - Tree instance lifecycle.
//!
//! This module provides the entry point for building a component tree. Each
//! call to [`mount`] creates a new tree instance with its own isolated context
//! namespace; nothing registered in one mounted tree is visible in another.
//!
//! # Example
//!
//! ```ignore
//! use spark_context::{mount, TreeConfig};
//!
//! let handle = mount(TreeConfig::new("editor"), |cx| {
//!     cx.register_value("readOnly", true)?;
//!     cx.child(|leaf| {
//!         let read_only = leaf.lookup_value::<bool>("readOnly")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! // Later, during an update, resolve from any live node
//! let leaf = handle.tree().children(handle.root())?[0];
//! let cx = handle.scope(leaf)?;
//! let read_only = cx.lookup_value::<bool>("readOnly")?;
//!
//! // Clean up
//! handle.unmount();
//! ```

use log::debug;

use crate::config::{Diagnostics, TreeConfig};
use crate::engine::Tree;
use crate::error::Result;
use crate::primitives::{Component, Scope, ScopeRef};
use crate::types::NodeId;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Owns the tree instance.
///
/// Dropping the handle destroys every node and runs their destroy callbacks.
pub struct MountHandle {
    tree: Tree,
    root: NodeId,
}

impl MountHandle {
    /// The root node built by `mount`.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Lookup-only handle for a live node, for update and render phases.
    pub fn scope(&self, node: NodeId) -> Result<ScopeRef<'_>> {
        ScopeRef::new(&self.tree, node)
    }

    /// Lookup-only handle for the root node.
    pub fn root_scope(&self) -> Result<ScopeRef<'_>> {
        self.scope(self.root)
    }

    /// True until the root has been destroyed.
    pub fn is_mounted(&self) -> bool {
        self.tree.is_live(self.root)
    }

    /// Destroy every node of the tree.
    pub fn unmount(mut self) {
        if self.tree.emits(Diagnostics::TRACE_LIFECYCLE) {
            debug!("[{}] unmount", self.tree.label());
        }
        self.tree.clear();
    }
}

impl std::fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountHandle")
            .field("tree", &self.tree)
            .field("root", &self.root)
            .finish()
    }
}

// =============================================================================
// Mount Functions
// =============================================================================

/// Build a new tree instance.
///
/// Creates the tree, runs `build` as the root's construction phase and then
/// activates the root. If `build` fails, the partially built tree is torn
/// down and the error returned.
pub fn mount<F>(config: TreeConfig, build: F) -> Result<MountHandle>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let mut tree = Tree::with_config(config);
    let root = tree.create_node(None)?;
    if tree.emits(Diagnostics::TRACE_LIFECYCLE) {
        debug!("[{}] mount {}", tree.label(), root);
    }

    build(&mut Scope::new(&mut tree, root)?)?;

    tree.finish_construction(root)?;
    Ok(MountHandle { tree, root })
}

/// Build a new tree instance whose root is `component`.
pub fn mount_component<C: Component + ?Sized>(
    config: TreeConfig,
    component: &mut C,
) -> Result<MountHandle> {
    mount(config, |cx| component.setup(cx))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ContextError;
    use crate::types::Phase;

    #[test]
    fn test_mount_activates_root() {
        let handle = mount(TreeConfig::default(), |_| Ok(())).unwrap();
        assert!(handle.is_mounted());
        assert_eq!(handle.tree().phase(handle.root()), Some(Phase::Active));
        assert_eq!(handle.tree().node_count(), 1);
    }

    #[test]
    fn test_mount_failure_tears_down() {
        let destroyed = Rc::new(Cell::new(false));
        let flag = destroyed.clone();

        let err = mount(TreeConfig::default(), move |cx| {
            cx.on_destroy(move || flag.set(true))?;
            cx.register_value("", 0u8)
        })
        .unwrap_err();

        assert!(matches!(err, ContextError::InvalidKey { .. }));
        assert!(destroyed.get());
    }

    #[test]
    fn test_update_phase_lookup() {
        let handle = mount(TreeConfig::default(), |cx| {
            cx.register_value("mode", "tree")?;
            cx.child(|_| Ok(()))?;
            Ok(())
        })
        .unwrap();

        let leaf = handle.tree().children(handle.root()).unwrap()[0];
        let cx = handle.scope(leaf).unwrap();
        assert_eq!(cx.phase(), Phase::Active);
        assert_eq!(
            cx.lookup_value::<&str>("mode").unwrap().as_deref(),
            Some(&"tree")
        );
    }

    #[test]
    fn test_unmount_runs_destroy_callbacks() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let handle = mount(TreeConfig::default(), move |cx| {
            let root_counter = counter.clone();
            cx.on_destroy(move || root_counter.set(root_counter.get() + 1))?;
            cx.child(|leaf| leaf.on_destroy(move || counter.set(counter.get() + 1)))?;
            Ok(())
        })
        .unwrap();

        handle.unmount();
        assert_eq!(count.get(), 2);
    }
}
