//! Render hook types.

use std::fmt;

use serde_json::Value;

// =============================================================================
// Path
// =============================================================================

/// One step of a path into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

// =============================================================================
// Render Context
// =============================================================================

/// What is about to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Location of the value inside the document.
    pub path: Vec<PathSegment>,
    /// The value at `path`.
    pub value: Value,
    /// Whether the editor is read-only.
    pub read_only: bool,
}

impl RenderContext {
    /// Create a context for `value` at `path`.
    pub fn new<P, S>(path: P, value: Value) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            value,
            read_only: false,
        }
    }

    /// Mark the context read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// The path as an RFC 6901 JSON pointer (`""` for the document root).
    pub fn pointer(&self) -> String {
        self.path
            .iter()
            .map(|segment| {
                let raw = segment.to_string();
                format!("/{}", raw.replace('~', "~0").replace('/', "~1"))
            })
            .collect()
    }
}

// =============================================================================
// Render Action
// =============================================================================

/// Instruction returned by a render hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderAction {
    /// Render the value the usual way.
    #[default]
    Default,
    /// Render this content instead of the value.
    Replace(String),
    /// Render nothing.
    Hide,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_pointer() {
        let ctx = RenderContext::new(["a", "b"], json!(1));
        assert_eq!(ctx.pointer(), "/a/b");

        let root = RenderContext::new(Vec::<PathSegment>::new(), json!({}));
        assert_eq!(root.pointer(), "");
    }

    #[test]
    fn test_pointer_escapes() {
        let ctx = RenderContext::new(
            vec![PathSegment::from("a/b"), PathSegment::from("m~n"), PathSegment::from(2usize)],
            json!(null),
        );
        assert_eq!(ctx.pointer(), "/a~1b/m~0n/2");
    }

    #[test]
    fn test_default_action() {
        assert_eq!(RenderAction::default(), RenderAction::Default);
    }
}
