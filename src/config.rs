//! Rendering configuration.

/// Label used in section headers when no environment or group is set.
pub const DEFAULT_PLACEHOLDER: &str = "Unassigned";

/// Settings that control how a hosts file is regenerated.
///
/// Only the section-header labels for unclassified records are
/// configurable; the record line format itself is fixed.
///
/// # Example
///
/// ```
/// use hosts_meta::HostsConfig;
///
/// let config = HostsConfig::new()
///     .with_environment_placeholder("none")
///     .with_group_placeholder("misc");
///
/// assert_eq!(config.environment_placeholder, "none");
/// assert_eq!(config.group_placeholder, "misc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsConfig {
    /// Header label for records with an empty environment.
    pub environment_placeholder: String,

    /// Header label for records with an empty group.
    pub group_placeholder: String,
}

impl HostsConfig {
    /// Creates a config with both placeholders set to `"Unassigned"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            environment_placeholder: DEFAULT_PLACEHOLDER.to_string(),
            group_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Overrides the empty-environment header label.
    #[must_use]
    pub fn with_environment_placeholder(mut self, label: impl Into<String>) -> Self {
        self.environment_placeholder = label.into();
        self
    }

    /// Overrides the empty-group header label.
    #[must_use]
    pub fn with_group_placeholder(mut self, label: impl Into<String>) -> Self {
        self.group_placeholder = label.into();
        self
    }
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self::new()
    }
}
