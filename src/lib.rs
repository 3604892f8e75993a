//! # spark-context
//!
//! Tree-scoped context channel for reactive UI component trees.
//!
//! An ancestor component registers a named value; any descendant resolves it
//! without the value being threaded through every component in between. The
//! nearest registration wins, trees never see each other's registrations, and
//! destroying a node removes it from every resolution chain.
//!
//! ## Architecture
//!
//! Components are slots in an arena owned by their [`Tree`], linked by parent
//! indices. The component being built or updated is always named explicitly
//! through a [`Scope`]; there is no global "current component".
//!
//! ```text
//! mount → Tree → root Scope → register / child → ... → lookup walks parents
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use spark_context::{mount, render_action, set_render_callback, RenderAction, RenderContext, TreeConfig};
//!
//! let handle = mount(TreeConfig::new("editor"), |cx| {
//!     set_render_callback(cx, |ctx: &RenderContext| {
//!         if ctx.value.is_null() { RenderAction::Hide } else { RenderAction::Default }
//!     })?;
//!     cx.child(|leaf| {
//!         let action = render_action(leaf, &RenderContext::new(["a"], serde_json::json!(null)))?;
//!         assert_eq!(action, RenderAction::Hide);
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids, phases, keys
//! - [`engine`] - Node arena and context store ([`Tree`])
//! - [`primitives`] - [`Scope`], [`ScopeRef`] and [`Component`]
//! - [`pipeline`] - [`mount`] and [`MountHandle`]
//! - [`render`] - The render hook carried under `"renderCallback"`

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod render;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{Diagnostics, LateRegistration, TreeConfig};

pub use error::{ContextError, Result};

pub use engine::Tree;

pub use primitives::{Component, ReadScope, Scope, ScopeRef};

pub use pipeline::{MountHandle, mount, mount_component};

pub use render::{
    PathSegment, RENDER_CALLBACK, RenderAction, RenderCallback, RenderContext, render_action,
    render_callback, set_render_callback,
};
