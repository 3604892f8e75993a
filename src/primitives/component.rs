//! Component trait - Anything that can be mounted as a node.

use crate::error::Result;

use super::scope::Scope;

/// A component builds one node of the tree.
///
/// `setup` runs during the node's construction phase. Register context
/// values first, then build children through [`Scope::child`] or
/// [`Scope::component`].
pub trait Component {
    fn setup(&mut self, cx: &mut Scope<'_>) -> Result<()>;
}

impl<F> Component for F
where
    F: FnMut(&mut Scope<'_>) -> Result<()>,
{
    fn setup(&mut self, cx: &mut Scope<'_>) -> Result<()> {
        self(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Tree;
    use crate::types::Key;

    const LABEL: Key<String> = Key::new("label");

    struct Provider {
        label: &'static str,
    }

    impl Component for Provider {
        fn setup(&mut self, cx: &mut Scope<'_>) -> Result<()> {
            cx.provide(&LABEL, self.label.to_string())?;
            cx.component(&mut Reader)?;
            Ok(())
        }
    }

    struct Reader;

    impl Component for Reader {
        fn setup(&mut self, cx: &mut Scope<'_>) -> Result<()> {
            let label = cx.resolve(&LABEL)?;
            cx.register_value("seen", label.map(|l| l.to_string()))
        }
    }

    #[test]
    fn test_struct_components_mount() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let mut cx = Scope::new(&mut tree, root).unwrap();

        let provider = cx.component(&mut Provider { label: "main" }).unwrap();
        let reader = tree.children(provider).unwrap()[0];
        let seen = tree.lookup_value::<Option<String>>(reader, "seen").unwrap();
        assert_eq!(seen.as_deref(), Some(&Some("main".to_string())));
    }

    #[test]
    fn test_closure_component() {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        let mut cx = Scope::new(&mut tree, root).unwrap();

        let mut count = 0;
        let mut counter = |_: &mut Scope<'_>| -> Result<()> {
            count += 1;
            Ok(())
        };
        cx.component(&mut counter).unwrap();
        cx.component(&mut counter).unwrap();
        assert_eq!(count, 2);
        assert_eq!(tree.children(root).unwrap().len(), 2);
    }
}
