//! Tree Instance - arena owner and context store.
//!
//! A [`Tree`] owns every node of one mounted component tree together with the
//! context entries registered at those nodes. Lookups walk parent indices from
//! the requesting node to the root and return the nearest binding.
//!
//! Nothing here is global: two trees built from the same components share no
//! state, and a [`NodeId`] issued by one tree is rejected by every other tree.

use std::any::type_name;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::config::{Diagnostics, LateRegistration, TreeConfig};
use crate::error::{ContextError, Result};
use crate::types::{ContextKey, ContextValue, Key, NodeId, Phase, TreeId, validate_key};

use super::registry::Registry;

/// One tree instance with its isolated context namespace.
pub struct Tree {
    id: TreeId,
    label: String,
    config: TreeConfig,
    registry: Registry,
}

impl Tree {
    /// Create an empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree.
    pub fn with_config(config: TreeConfig) -> Self {
        let id = TreeId::next();
        let label = config.label.clone().unwrap_or_else(|| id.to_string());
        Self {
            id,
            label,
            config,
            registry: Registry::new(id),
        }
    }

    /// This tree's id.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Label used in log lines.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    // =========================================================================
    // Node lifecycle
    // =========================================================================

    /// Create a node under `parent` (or a new root when `None`).
    ///
    /// The node starts in [`Phase::Constructing`]. Its parent link is fixed for
    /// the node's lifetime except when an ancestor is destroyed and the node is
    /// spliced onto the next surviving ancestor.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> Result<NodeId> {
        let parent_index = parent.map(|p| self.live_index(p)).transpose()?;

        if let (Some(max), Some(parent_index)) = (self.config.max_depth, parent_index) {
            let depth = self.registry.depth(parent_index) + 1;
            if depth > max {
                return Err(ContextError::DepthExceeded { depth, max });
            }
        }

        let index = self.registry.allocate(parent_index);
        let node = self.registry.id_of(index);
        if self.emits(Diagnostics::TRACE_LIFECYCLE) {
            match parent {
                Some(parent) => debug!("[{}] created {} under {}", self.label, node, parent),
                None => debug!("[{}] created root {}", self.label, node),
            }
        }
        Ok(node)
    }

    /// End the construction phase of `node` (`Constructing → Active`).
    ///
    /// Calling this on an already active node is a no-op.
    pub fn finish_construction(&mut self, node: NodeId) -> Result<()> {
        let index = self.live_index(node)?;
        let slot = self.registry.slot_mut(index);
        if slot.phase == Phase::Constructing {
            slot.phase = Phase::Active;
            if self.emits(Diagnostics::TRACE_LIFECYCLE) {
                debug!("[{}] {} active", self.label, node);
            }
        }
        Ok(())
    }

    /// Register a callback to run when `node` is destroyed.
    pub fn on_destroy(&mut self, node: NodeId, callback: impl FnOnce() + 'static) -> Result<()> {
        let index = self.live_index(node)?;
        self.registry
            .slot_mut(index)
            .destroy_callbacks
            .push(Box::new(callback));
        Ok(())
    }

    /// Destroy a single node.
    ///
    /// Runs its destroy callbacks and discards its entries. Surviving children
    /// are re-linked to the destroyed node's parent, so later lookups from them
    /// fall back to the next-nearest ancestor binding. Values already resolved
    /// from the destroyed node are not retracted.
    pub fn destroy_node(&mut self, node: NodeId) -> Result<()> {
        let index = self.live_index(node)?;
        self.release(index);
        Ok(())
    }

    /// Destroy `node` and all its descendants, children first.
    pub fn destroy_subtree(&mut self, node: NodeId) -> Result<()> {
        let index = self.live_index(node)?;
        for index in self.registry.subtree_post_order(index) {
            self.release(index);
        }
        Ok(())
    }

    /// Destroy every node in the tree.
    pub fn clear(&mut self) {
        while let Some(&root) = self.registry.roots().first() {
            for index in self.registry.subtree_post_order(root) {
                self.release(index);
            }
        }
    }

    fn release(&mut self, index: u32) {
        let node = self.registry.id_of(index);
        let callbacks = self.registry.release(index);
        if self.emits(Diagnostics::TRACE_LIFECYCLE) {
            debug!("[{}] destroyed {}", self.label, node);
        }
        for callback in callbacks {
            callback();
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Bind `value` to `key` at `node`.
    ///
    /// Last write wins within a node. Registering on a node that already
    /// finished construction follows [`TreeConfig::late_registration`];
    /// descendants that resolved the key earlier keep their old value.
    pub fn register(&mut self, node: NodeId, key: &str, value: ContextValue) -> Result<()> {
        let index = self.live_index(node)?;
        let key = ContextKey::new(key)?;

        if self.registry.slot(index).phase == Phase::Active {
            match self.config.late_registration {
                LateRegistration::Allow => {}
                LateRegistration::Warn => warn!(
                    "[{}] {} registered {:?} after construction; earlier lookups keep their value",
                    self.label, node, key.as_str()
                ),
                LateRegistration::Reject => {
                    return Err(ContextError::RegistrationClosed {
                        node,
                        key: key.to_string(),
                    });
                }
            }
        }

        let replaced = self
            .registry
            .slot_mut(index)
            .entries
            .insert(key.clone(), value);
        if replaced && self.emits(Diagnostics::WARN_OVERWRITE) {
            warn!("[{}] {} overwrote its own binding for {:?}", self.label, node, key.as_str());
        }
        Ok(())
    }

    /// Register a plain value, wrapping it for shared access.
    pub fn register_value<T: 'static>(&mut self, node: NodeId, key: &str, value: T) -> Result<()> {
        self.register(node, key, Rc::new(value))
    }

    /// Register a value under a typed key.
    pub fn provide<T: 'static>(&mut self, node: NodeId, key: &Key<T>, value: T) -> Result<()> {
        self.register_value(node, key.name(), value)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve `key` for `node`: the binding at the nearest node on the chain
    /// from `node` to the root, or `None` when no node on the chain has one.
    pub fn lookup(&self, node: NodeId, key: &str) -> Result<Option<ContextValue>> {
        Ok(self.resolve_entry(node, key)?.map(|(_, value)| value.clone()))
    }

    /// Resolve `key` and downcast the value to `T`.
    ///
    /// Only the nearest binding is considered: a nearer binding of another type
    /// shadows a farther binding of type `T` and yields `TypeMismatch`.
    pub fn lookup_value<T: 'static>(&self, node: NodeId, key: &str) -> Result<Option<Rc<T>>> {
        let Some(value) = self.lookup(node, key)? else {
            return Ok(None);
        };
        value
            .downcast::<T>()
            .map(Some)
            .map_err(|_| ContextError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Resolve a typed key.
    pub fn resolve<T: 'static>(&self, node: NodeId, key: &Key<T>) -> Result<Option<Rc<T>>> {
        self.lookup_value(node, key.name())
    }

    /// The node whose binding answers `key` for `node`.
    pub fn resolving_node(&self, node: NodeId, key: &str) -> Result<Option<NodeId>> {
        Ok(self.resolve_entry(node, key)?.map(|(owner, _)| owner))
    }

    fn resolve_entry(&self, node: NodeId, key: &str) -> Result<Option<(NodeId, &ContextValue)>> {
        let index = self.live_index(node)?;
        validate_key(key)?;

        let found = self.registry.ancestors(index).find_map(|i| {
            self.registry
                .slot(i)
                .entries
                .get(key)
                .map(|value| (self.registry.id_of(i), value))
        });

        if self.emits(Diagnostics::TRACE_LOOKUPS) {
            match &found {
                Some((owner, _)) => trace!("[{}] {} resolved {:?} at {}", self.label, node, key, owner),
                None => trace!("[{}] {} found no binding for {:?}", self.label, node, key),
            }
        }
        Ok(found)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Whether `node` itself holds a binding for `key`.
    pub fn has_own(&self, node: NodeId, key: &str) -> Result<bool> {
        let index = self.live_index(node)?;
        validate_key(key)?;
        Ok(self.registry.slot(index).entries.contains(key))
    }

    /// Keys bound at `node` itself, in registration order.
    pub fn own_keys(&self, node: NodeId) -> Result<Vec<ContextKey>> {
        let index = self.live_index(node)?;
        Ok(self.registry.slot(index).entries.keys().cloned().collect())
    }

    /// Phase of `node`. Ids of destroyed nodes report [`Phase::Destroyed`];
    /// ids this tree never issued report `None`.
    pub fn phase(&self, node: NodeId) -> Option<Phase> {
        self.registry.phase(node)
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.registry.live_index(node).is_some()
    }

    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        let index = self.live_index(node)?;
        Ok(self.registry.slot(index).parent.map(|p| self.registry.id_of(p)))
    }

    pub fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let index = self.live_index(node)?;
        Ok(self
            .registry
            .slot(index)
            .children
            .iter()
            .map(|&c| self.registry.id_of(c))
            .collect())
    }

    /// Resolution chain of `node`: itself, its parent, and so on up to the root.
    pub fn chain(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let index = self.live_index(node)?;
        Ok(self
            .registry
            .ancestors(index)
            .map(|i| self.registry.id_of(i))
            .collect())
    }

    /// First root of the tree, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.registry.roots().first().map(|&r| self.registry.id_of(r))
    }

    /// All roots, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.registry
            .roots()
            .iter()
            .map(|&r| self.registry.id_of(r))
            .collect()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.registry.live_count()
    }

    /// Number of arena slots, live or free.
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn live_index(&self, node: NodeId) -> Result<u32> {
        self.registry
            .live_index(node)
            .ok_or(ContextError::MissingContext { node })
    }

    pub(crate) fn emits(&self, flag: Diagnostics) -> bool {
        self.config.diagnostics.contains(flag)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("nodes", &self.registry.live_count())
            .finish()
    }
}
