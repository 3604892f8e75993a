//! Node Registry - Slot allocation for the node arena.
//!
//! Manages the lifecycle of node slots:
//! - Free slot pool for O(1) reuse
//! - Generation counters so ids of released slots never alias new nodes
//! - Parent/children links used for resolution and teardown
//! - Destroy callbacks registered per slot

use crate::types::{NodeId, Phase, TreeId};

use super::store::Entries;

// =============================================================================
// Slot
// =============================================================================

/// One arena slot. A slot is either free (`Uninitialized`) or holds a live node.
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) phase: Phase,
    /// Parent slot index. Always points at a live slot while this slot is live.
    pub(crate) parent: Option<u32>,
    pub(crate) children: Vec<u32>,
    pub(crate) entries: Entries,
    pub(crate) destroy_callbacks: Vec<Box<dyn FnOnce()>>,
}

impl Slot {
    fn vacant() -> Self {
        Self {
            generation: 0,
            phase: Phase::Uninitialized,
            parent: None,
            children: Vec::new(),
            entries: Entries::default(),
            destroy_callbacks: Vec::new(),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Slot arena owned by a single tree.
pub(crate) struct Registry {
    tree: TreeId,
    slots: Vec<Slot>,
    /// Pool of freed slot indices for reuse.
    free: Vec<u32>,
    /// Root slot indices in creation order.
    roots: Vec<u32>,
    live: usize,
}

impl Registry {
    pub(crate) fn new(tree: TreeId) -> Self {
        Self {
            tree,
            slots: Vec::new(),
            free: Vec::new(),
            roots: Vec::new(),
            live: 0,
        }
    }

    // =========================================================================
    // Id mapping
    // =========================================================================

    /// Build the current id for a slot index.
    pub(crate) fn id_of(&self, index: u32) -> NodeId {
        NodeId {
            tree: self.tree,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Resolve an id to a live slot index.
    pub(crate) fn live_index(&self, node: NodeId) -> Option<u32> {
        if node.tree != self.tree {
            return None;
        }
        let slot = self.slots.get(node.index as usize)?;
        (slot.generation == node.generation && slot.phase.is_live()).then_some(node.index)
    }

    /// Phase for an id of this tree. Stale ids report `Destroyed`.
    pub(crate) fn phase(&self, node: NodeId) -> Option<Phase> {
        if node.tree != self.tree {
            return None;
        }
        let slot = self.slots.get(node.index as usize)?;
        if slot.generation == node.generation {
            Some(slot.phase)
        } else if node.generation < slot.generation {
            Some(Phase::Destroyed)
        } else {
            None
        }
    }

    pub(crate) fn slot(&self, index: u32) -> &Slot {
        &self.slots[index as usize]
    }

    pub(crate) fn slot_mut(&mut self, index: u32) -> &mut Slot {
        &mut self.slots[index as usize]
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate a slot for a new node under `parent` (already validated live).
    ///
    /// The node starts in `Constructing`.
    pub(crate) fn allocate(&mut self, parent: Option<u32>) -> u32 {
        // Reuse free slot or grow
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::vacant());
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.phase = Phase::Constructing;
        slot.parent = parent;

        match parent {
            Some(parent) => self.slots[parent as usize].children.push(index),
            None => self.roots.push(index),
        }
        self.live += 1;
        index
    }

    /// Release one slot back to the pool.
    ///
    /// Children of the released slot are spliced onto its parent (or promoted
    /// to roots) in place of the released slot, so they keep resolving through
    /// the rest of their chain. Returns the destroy callbacks for the caller to
    /// run once the registry is consistent again.
    pub(crate) fn release(&mut self, index: u32) -> Vec<Box<dyn FnOnce()>> {
        let slot = &mut self.slots[index as usize];
        let parent = slot.parent.take();
        let children = std::mem::take(&mut slot.children);
        let callbacks = std::mem::take(&mut slot.destroy_callbacks);
        slot.entries.clear();
        slot.phase = Phase::Uninitialized;
        slot.generation = slot.generation.wrapping_add(1);

        for &child in &children {
            self.slots[child as usize].parent = parent;
        }
        let siblings = match parent {
            Some(parent) => &mut self.slots[parent as usize].children,
            None => &mut self.roots,
        };
        if let Some(position) = siblings.iter().position(|&i| i == index) {
            siblings.splice(position..=position, children);
        }

        self.free.push(index);
        self.live -= 1;

        callbacks
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Walk from `index` up to its root, yielding slot indices.
    pub(crate) fn ancestors(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors(Some(index), move |&i| self.slots[i as usize].parent)
    }

    /// Number of edges between `index` and its root.
    pub(crate) fn depth(&self, index: u32) -> usize {
        self.ancestors(index).count() - 1
    }

    /// Post-order list of `index` and all its descendants.
    pub(crate) fn subtree_post_order(&self, index: u32) -> Vec<u32> {
        let mut order = Vec::new();
        let mut stack = vec![(index, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                order.push(current);
                continue;
            }
            stack.push((current, true));
            for &child in self.slots[current as usize].children.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    pub(crate) fn roots(&self) -> &[u32] {
        &self.roots
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}
