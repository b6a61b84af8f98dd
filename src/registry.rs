//! Environment and group name catalogs.
//!
//! Registries only feed selection lists. Records accept any environment or
//! group string whether or not a registry knows it.

/// Environments every registry starts with.
pub const DEFAULT_ENVIRONMENTS: [&str; 4] = ["local", "qa", "stage", "prod"];

/// Source of known environment and group names.
pub trait Registry {
    /// Known environment names, in display order.
    fn list_environment_names(&self) -> Vec<String>;

    /// Known group names, in display order.
    fn list_group_names(&self) -> Vec<String>;
}

/// In-memory registry.
///
/// # Example
///
/// ```
/// use hosts_meta::{NameRegistry, Registry};
///
/// let mut registry = NameRegistry::new();
/// registry.add_group("web");
///
/// assert_eq!(registry.list_environment_names(), ["local", "qa", "stage", "prod"]);
/// assert_eq!(registry.list_group_names(), ["web"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRegistry {
    environments: Vec<String>,
    groups: Vec<String>,
}

impl NameRegistry {
    /// Creates a registry with [`DEFAULT_ENVIRONMENTS`] and no groups.
    #[must_use]
    pub fn new() -> Self {
        Self {
            environments: DEFAULT_ENVIRONMENTS.map(String::from).to_vec(),
            groups: Vec::new(),
        }
    }

    /// Creates a registry from explicit lists. Blank and repeated names are
    /// dropped.
    #[must_use]
    pub fn with_names<E, G>(environments: E, groups: G) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        let mut registry = Self {
            environments: Vec::new(),
            groups: Vec::new(),
        };
        for name in environments {
            registry.add_environment(name);
        }
        for name in groups {
            registry.add_group(name);
        }
        registry
    }

    /// Adds an environment. Returns `false` for blank or known names.
    pub fn add_environment(&mut self, name: impl Into<String>) -> bool {
        insert_name(&mut self.environments, name.into())
    }

    /// Adds a group. Returns `false` for blank or known names.
    pub fn add_group(&mut self, name: impl Into<String>) -> bool {
        insert_name(&mut self.groups, name.into())
    }

    /// Returns `true` if the environment was present.
    pub fn remove_environment(&mut self, name: &str) -> bool {
        remove_name(&mut self.environments, name)
    }

    /// Returns `true` if the group was present.
    pub fn remove_group(&mut self, name: &str) -> bool {
        remove_name(&mut self.groups, name)
    }

    /// `true` for the built-in environment names.
    #[must_use]
    pub fn is_default_environment(name: &str) -> bool {
        DEFAULT_ENVIRONMENTS.contains(&name)
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for NameRegistry {
    fn list_environment_names(&self) -> Vec<String> {
        self.environments.clone()
    }

    fn list_group_names(&self) -> Vec<String> {
        self.groups.clone()
    }
}

fn insert_name(names: &mut Vec<String>, name: String) -> bool {
    if name.trim().is_empty() || names.contains(&name) {
        return false;
    }
    names.push(name);
    true
}

fn remove_name(names: &mut Vec<String>, name: &str) -> bool {
    let before = names.len();
    names.retain(|n| n != name);
    names.len() != before
}
