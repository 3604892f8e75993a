//! Render hook delivered through the context channel.
//!
//! The rendering subsystem owns the meaning of the hook; the channel only
//! carries it from the editor root to the renderers below it.

mod callback;
mod types;

pub use callback::{
    RENDER_CALLBACK, RenderCallback, render_action, render_callback, set_render_callback,
};
pub use types::{PathSegment, RenderAction, RenderContext};
