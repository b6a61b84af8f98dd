//! Host mapping records with dirty tracking.

use std::fmt;

/// Persisted fields of a record, used both as the live values and as the
/// clean baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostFields {
    /// IPv4 address as written in the file (not range-checked).
    pub ip_address: String,
    /// Host name token.
    pub host_name: String,
    /// Environment tag; empty means unclassified.
    pub environment: String,
    /// Group tag; empty means unclassified.
    pub group: String,
    /// Free-text description.
    pub description: String,
    /// `false` for commented-out entries.
    pub enabled: bool,
}

/// Enabled/disabled state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The entry is active.
    Enabled,
    /// The entry is commented out.
    Disabled,
}

impl Status {
    /// Returns `"Enabled"` or `"Disabled"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One IP-to-host mapping.
///
/// Fields are only writable through setters, each of which recomputes the
/// dirty flag. A record is dirty while it is new (never marked clean) or
/// while any field differs from the baseline captured by
/// [`mark_clean`](Self::mark_clean). Reverting a field restores the clean
/// state.
///
/// # Example
///
/// ```
/// use hosts_meta::HostRecord;
///
/// let mut record = HostRecord::new("127.0.0.1", "localhost");
/// assert!(record.is_new() && record.is_dirty());
///
/// record.mark_clean();
/// record.set_host_name("dev.local");
/// assert!(record.is_dirty());
///
/// record.set_host_name("localhost");
/// assert!(!record.is_dirty());
/// ```
#[derive(Debug, Clone)]
pub struct HostRecord {
    fields: HostFields,
    baseline: Option<HostFields>,
    source_line: Option<usize>,
    is_new: bool,
    dirty: bool,
}

impl HostRecord {
    /// Creates a new, enabled record that has never been saved.
    ///
    /// New records stay dirty until [`mark_clean`](Self::mark_clean).
    #[must_use]
    pub fn new(ip_address: impl Into<String>, host_name: impl Into<String>) -> Self {
        Self {
            fields: HostFields {
                ip_address: ip_address.into(),
                host_name: host_name.into(),
                enabled: true,
                ..HostFields::default()
            },
            baseline: None,
            source_line: None,
            is_new: true,
            dirty: true,
        }
    }

    /// Creates a clean record read from line `index` of a file.
    #[must_use]
    pub(crate) fn parsed(fields: HostFields, index: usize) -> Self {
        Self {
            baseline: Some(fields.clone()),
            fields,
            source_line: Some(index),
            is_new: false,
            dirty: false,
        }
    }

    /// Sets the environment tag (builder form).
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.set_environment(environment);
        self
    }

    /// Sets the group tag (builder form).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.set_group(group);
        self
    }

    /// Sets the description (builder form).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Sets the enabled flag (builder form).
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// IPv4 address as written; may be out of range.
    #[must_use]
    pub fn ip_address(&self) -> &str {
        &self.fields.ip_address
    }

    /// Host name token.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.fields.host_name
    }

    /// Environment tag; empty if unclassified.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.fields.environment
    }

    /// Group tag; empty if unclassified.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.fields.group
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.fields.description
    }

    /// `false` for commented-out entries.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.fields.enabled
    }

    /// Derived from [`is_enabled`](Self::is_enabled).
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.fields.enabled {
            Status::Enabled
        } else {
            Status::Disabled
        }
    }

    /// All persisted fields at once.
    #[must_use]
    pub const fn fields(&self) -> &HostFields {
        &self.fields
    }

    /// Zero-based line index in the file this record was loaded from.
    ///
    /// Informational only; saving never orders by it.
    #[must_use]
    pub const fn source_line(&self) -> Option<usize> {
        self.source_line
    }

    /// `true` until the record is first marked clean.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// `true` if the record is new or differs from its clean baseline.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the address.
    pub fn set_ip_address(&mut self, ip_address: impl Into<String>) {
        self.fields.ip_address = ip_address.into();
        self.refresh_dirty();
    }

    /// Replaces the host name.
    pub fn set_host_name(&mut self, host_name: impl Into<String>) {
        self.fields.host_name = host_name.into();
        self.refresh_dirty();
    }

    /// Replaces the environment tag.
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.fields.environment = environment.into();
        self.refresh_dirty();
    }

    /// Replaces the group tag.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.fields.group = group.into();
        self.refresh_dirty();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
        self.refresh_dirty();
    }

    /// Enables or disables the entry.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.fields.enabled = enabled;
        self.refresh_dirty();
    }

    /// Captures the current values as the clean baseline and clears the new
    /// and dirty flags.
    pub fn mark_clean(&mut self) {
        self.baseline = Some(self.fields.clone());
        self.is_new = false;
        self.dirty = false;
    }

    fn refresh_dirty(&mut self) {
        self.dirty = self.is_new || self.baseline.as_ref() != Some(&self.fields);
    }
}

impl From<HostFields> for HostRecord {
    /// Builds a new (dirty) record from raw field values.
    fn from(fields: HostFields) -> Self {
        Self {
            fields,
            baseline: None,
            source_line: None,
            is_new: true,
            dirty: true,
        }
    }
}
