//! Context Engine - Node arena and context store.
//!
//! The engine manages the core data structures:
//! - Registry: Slot allocation, generations, parent/children links
//! - Store: Context entries registered at each node
//! - Tree: The tree instance tying both together (register, lookup, teardown)
//!
//! # Architecture
//!
//! Nodes are NOT objects holding pointers to their parents. They are slots in
//! an arena owned by the tree, linked by parent indices:
//!
//! ```text
//! Slot 0: root   (parent=-, entries={renderCallback: f1})
//! Slot 1: panel  (parent=0, entries={renderCallback: f2})
//! Slot 2: leaf   (parent=1, entries={})      lookup → f2
//! Slot 3: leaf   (parent=0, entries={})      lookup → f1
//! ```
//!
//! A lookup walks parent indices until it finds a slot holding the key.

mod registry;
mod store;
mod tree;

pub use tree::Tree;
