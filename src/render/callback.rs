//! Render callback - the hook an editor root hands to its renderers.
//!
//! The editor root calls [`set_render_callback`] while it is being built;
//! any renderer below it resolves the hook with [`render_callback`] or, more
//! commonly, asks for the action directly with [`render_action`].

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::primitives::{ReadScope, Scope};
use crate::types::Key;

use super::types::{RenderAction, RenderContext};

/// Context key the render hook is registered under.
pub const RENDER_CALLBACK: Key<RenderCallback> = Key::new("renderCallback");

/// Cloneable render hook.
#[derive(Clone)]
pub struct RenderCallback(Rc<dyn Fn(&RenderContext) -> RenderAction>);

impl RenderCallback {
    pub fn new(callback: impl Fn(&RenderContext) -> RenderAction + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invoke the hook.
    pub fn call(&self, ctx: &RenderContext) -> RenderAction {
        (self.0)(ctx)
    }

    /// Whether both handles point at the same hook.
    pub fn ptr_eq(&self, other: &RenderCallback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<F> From<F> for RenderCallback
where
    F: Fn(&RenderContext) -> RenderAction + 'static,
{
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl fmt::Debug for RenderCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RenderCallback").finish_non_exhaustive()
    }
}

/// Register `callback` for every renderer below the current component.
pub fn set_render_callback(cx: &mut Scope<'_>, callback: impl Into<RenderCallback>) -> Result<()> {
    cx.provide(&RENDER_CALLBACK, callback.into())
}

/// The nearest render hook above the current component, if any.
pub fn render_callback<S: ReadScope + ?Sized>(cx: &S) -> Result<Option<RenderCallback>> {
    Ok(cx
        .tree()
        .resolve(cx.node(), &RENDER_CALLBACK)?
        .map(|callback| (*callback).clone()))
}

/// Ask the nearest render hook what to do with `ctx`.
///
/// Without a registered hook the answer is [`RenderAction::Default`].
pub fn render_action<S: ReadScope + ?Sized>(cx: &S, ctx: &RenderContext) -> Result<RenderAction> {
    Ok(render_callback(cx)?
        .map(|callback| callback.call(ctx))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::engine::Tree;
    use crate::primitives::ScopeRef;

    #[test]
    fn test_missing_callback_renders_default() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let cx = Scope::new(&mut tree, root).unwrap();

        assert!(render_callback(&cx).unwrap().is_none());
        let ctx = RenderContext::new(["a"], json!(1));
        assert_eq!(render_action(&cx, &ctx).unwrap(), RenderAction::Default);
    }

    #[test]
    fn test_callback_from_closure() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let mut cx = Scope::new(&mut tree, root).unwrap();

        set_render_callback(&mut cx, |ctx: &RenderContext| {
            if ctx.value.is_null() {
                RenderAction::Hide
            } else {
                RenderAction::Replace(ctx.pointer())
            }
        })
        .unwrap();

        let hidden = RenderContext::new(["x"], json!(null));
        let shown = RenderContext::new(["x", "y"], json!(true));
        assert_eq!(render_action(&cx, &hidden).unwrap(), RenderAction::Hide);
        assert_eq!(
            render_action(&cx, &shown).unwrap(),
            RenderAction::Replace("/x/y".to_string())
        );
    }

    #[test]
    fn test_resolved_callback_is_same_hook() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let mut cx = Scope::new(&mut tree, root).unwrap();

        let hook = RenderCallback::new(|_| RenderAction::Default);
        set_render_callback(&mut cx, hook.clone()).unwrap();

        let resolved = render_callback(&cx).unwrap().unwrap();
        assert!(resolved.ptr_eq(&hook));
    }

    #[test]
    fn test_render_action_through_read_only_handle() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let leaf = tree.create_node(Some(root)).unwrap();
        let mut cx = Scope::new(&mut tree, root).unwrap();
        set_render_callback(&mut cx, |_: &RenderContext| RenderAction::Hide).unwrap();

        let view = ScopeRef::new(&tree, leaf).unwrap();
        let ctx = RenderContext::new(["a"], json!(1));
        assert_eq!(render_action(&view, &ctx).unwrap(), RenderAction::Hide);
    }
}
