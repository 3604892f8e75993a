//! Per-tree configuration.

use bitflags::bitflags;

// =============================================================================
// Diagnostics (bitflags)
// =============================================================================

bitflags! {
    /// Optional diagnostics emitted through the `log` facade.
    ///
    /// Combine with bitwise OR: `Diagnostics::WARN_OVERWRITE | Diagnostics::TRACE_LOOKUPS`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Diagnostics: u8 {
        /// Warn when a node registers a key it already holds.
        const WARN_OVERWRITE = 1 << 0;
        /// Trace every lookup and the node that answered it.
        const TRACE_LOOKUPS = 1 << 1;
        /// Debug-log node creation, activation and destruction.
        const TRACE_LIFECYCLE = 1 << 2;
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::WARN_OVERWRITE | Diagnostics::TRACE_LIFECYCLE
    }
}

// =============================================================================
// Late registration policy
// =============================================================================

/// What `register` does on a node that already finished construction.
///
/// Late registrations never notify descendants that resolved the key earlier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LateRegistration {
    /// Accept silently.
    Allow,
    /// Accept and log a warning.
    #[default]
    Warn,
    /// Fail with [`ContextError::RegistrationClosed`](crate::ContextError::RegistrationClosed).
    Reject,
}

// =============================================================================
// TreeConfig
// =============================================================================

/// Configuration for one tree instance.
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Name used in log lines. Falls back to the tree id.
    pub label: Option<String>,

    /// Policy for registrations on `Active` nodes.
    pub late_registration: LateRegistration,

    /// Diagnostics to emit.
    pub diagnostics: Diagnostics,

    /// Maximum depth of the tree (root is depth 0). None = unlimited.
    pub max_depth: Option<usize>,
}

impl TreeConfig {
    /// Create a config with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    /// Set the late registration policy.
    pub fn late_registration(mut self, policy: LateRegistration) -> Self {
        self.late_registration = policy;
        self
    }

    /// Replace the diagnostics set.
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Reject registrations after construction.
    pub fn strict(mut self) -> Self {
        self.late_registration = LateRegistration::Reject;
        self
    }

    /// Cap the tree depth.
    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert_eq!(config.label, None);
        assert_eq!(config.late_registration, LateRegistration::Warn);
        assert!(config.diagnostics.contains(Diagnostics::WARN_OVERWRITE));
        assert!(!config.diagnostics.contains(Diagnostics::TRACE_LOOKUPS));
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_builder() {
        let config = TreeConfig::new("editor")
            .strict()
            .diagnostics(Diagnostics::TRACE_LOOKUPS)
            .max_depth(8);
        assert_eq!(config.label.as_deref(), Some("editor"));
        assert_eq!(config.late_registration, LateRegistration::Reject);
        assert_eq!(config.diagnostics, Diagnostics::TRACE_LOOKUPS);
        assert_eq!(config.max_depth, Some(8));
    }
}
