//! Component Primitives - Building nodes with context.
//!
//! This module provides the lifecycle binding between components and the
//! context store:
//! - [`Scope`] - Explicit handle to the current node, passed down the build
//! - [`Component`] - Trait for anything that can be mounted as a node
//! - [`ScopeRef`] - Lookup-only handle for nodes a component does not own
//!
//! # Architecture
//!
//! Each component, when mounted:
//! 1. Gets a fresh node under its parent, in the `Constructing` phase
//! 2. Registers its context values through its scope
//! 3. Builds its children (which ends its own construction phase)
//! 4. Becomes `Active`
//!
//! Closures `FnMut(&mut Scope) -> Result<()>` are components too.

mod component;
mod scope;
mod view;

pub use component::Component;
pub use scope::Scope;
pub use view::{ReadScope, ScopeRef};
