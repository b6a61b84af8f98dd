//! In-memory record collection for an editing session.

use crate::error::Result;
use crate::record::HostRecord;
use crate::validate::validate_records;

/// Criteria for narrowing the visible records.
///
/// Every set criterion must match. Search text is matched case-insensitively
/// as a substring of the address or host name, including any surrounding
/// whitespace; blank text matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Required environment, compared exactly.
    pub environment: Option<String>,
    /// Required group, compared exactly.
    pub group: Option<String>,
    /// Substring to find in the address or host name.
    pub search: Option<String>,
}

impl RecordFilter {
    /// A filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires an exact environment match.
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Requires an exact group match.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Requires `text` in the address or host name, ignoring case.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Returns `true` if `record` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, record: &HostRecord) -> bool {
        if self.environment.as_deref().is_some_and(|e| e != record.environment()) {
            return false;
        }
        if self.group.as_deref().is_some_and(|g| g != record.group()) {
            return false;
        }

        match self.search.as_deref() {
            None => true,
            Some(text) if text.trim().is_empty() => true,
            Some(text) => {
                let needle = text.to_lowercase();
                record.ip_address().to_lowercase().contains(&needle)
                    || record.host_name().to_lowercase().contains(&needle)
            }
        }
    }
}

/// Ordered records owned by one editing session.
///
/// Bulk edits go through the records' setters, so dirty flags stay
/// accurate. Index arguments refer to positions in [`iter`](Self::iter)
/// order; out-of-range indices are ignored.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    records: Vec<HostRecord>,
}

impl HostTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, HostRecord> {
        self.records.iter()
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HostRecord> {
        self.records.get(index)
    }

    /// Mutable record at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut HostRecord> {
        self.records.get_mut(index)
    }

    /// Appends a record and returns its index.
    pub fn push(&mut self, record: HostRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Removes and returns the record at `index`.
    pub fn remove(&mut self, index: usize) -> Option<HostRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Removes every record at the given indices. Returns how many were
    /// removed.
    pub fn remove_many(&mut self, indices: &[usize]) -> usize {
        let before = self.records.len();
        let mut position = 0;
        self.records.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        before - self.records.len()
    }

    /// Indices of records matching `filter`, in table order.
    #[must_use]
    pub fn filter(&self, filter: &RecordFilter) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    /// Enables or disables the records at `indices`.
    pub fn set_enabled(&mut self, indices: &[usize], enabled: bool) {
        self.for_each_at(indices, |r| r.set_enabled(enabled));
    }

    /// Sets the environment of the records at `indices`.
    pub fn set_environment(&mut self, indices: &[usize], environment: &str) {
        self.for_each_at(indices, |r| r.set_environment(environment));
    }

    /// Sets the group of the records at `indices`.
    pub fn set_group(&mut self, indices: &[usize], group: &str) {
        self.for_each_at(indices, |r| r.set_group(group));
    }

    /// Resets the environment of records tagged with any of `removed`.
    /// Returns how many records changed.
    pub fn clear_environments(&mut self, removed: &[String]) -> usize {
        self.replace_where(
            |r| removed.iter().any(|e| e == r.environment()),
            |r| r.set_environment(""),
        )
    }

    /// Resets the group of records tagged with any of `removed`.
    /// Returns how many records changed.
    pub fn clear_groups(&mut self, removed: &[String]) -> usize {
        self.replace_where(
            |r| removed.iter().any(|g| g == r.group()),
            |r| r.set_group(""),
        )
    }

    /// Moves every record in group `old` to group `new`.
    /// Returns how many records changed.
    pub fn rename_group(&mut self, old: &str, new: &str) -> usize {
        self.replace_where(|r| r.group() == old, |r| r.set_group(new))
    }

    /// `true` if any record is new or modified.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.records.iter().any(HostRecord::is_dirty)
    }

    /// Marks every record clean.
    pub fn mark_all_clean(&mut self) {
        self.records.iter_mut().for_each(HostRecord::mark_clean);
    }

    /// Validates every record; see [`validate_records`].
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<()> {
        validate_records(&self.records)
    }

    fn for_each_at(&mut self, indices: &[usize], mut edit: impl FnMut(&mut HostRecord)) {
        for &index in indices {
            if let Some(record) = self.records.get_mut(index) {
                edit(record);
            }
        }
    }

    fn replace_where(
        &mut self,
        pred: impl Fn(&HostRecord) -> bool,
        mut edit: impl FnMut(&mut HostRecord),
    ) -> usize {
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| pred(&**r)) {
            edit(record);
            changed += 1;
        }
        changed
    }
}

impl From<Vec<HostRecord>> for HostTable {
    /// Takes ownership of loaded records and marks them clean.
    fn from(mut records: Vec<HostRecord>) -> Self {
        records.iter_mut().for_each(HostRecord::mark_clean);
        Self { records }
    }
}

impl<'a> IntoIterator for &'a HostTable {
    type Item = &'a HostRecord;
    type IntoIter = std::slice::Iter<'a, HostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HostTable {
        HostTable::from(vec![
            HostRecord::new("127.0.0.1", "localhost").with_environment("local"),
            HostRecord::new("10.0.0.1", "API.example.com")
                .with_environment("prod")
                .with_group("web"),
            HostRecord::new("10.0.0.2", "db.example.com")
                .with_environment("prod")
                .with_group("data"),
        ])
    }

    #[test]
    fn from_vec_marks_clean() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert!(!table.has_unsaved_changes());
        assert!(table.iter().all(|r| !r.is_new()));
    }

    #[test]
    fn push_new_record_is_unsaved() {
        let mut table = sample();
        let i = table.push(HostRecord::new("10.0.0.3", "cache"));
        assert_eq!(i, 3);
        assert!(table.has_unsaved_changes());

        table.mark_all_clean();
        assert!(!table.has_unsaved_changes());
    }

    #[test]
    fn remove_records() {
        let mut table = sample();
        assert_eq!(table.remove(7).map(|r| r.host_name().to_string()), None);
        let removed = table.remove(0).unwrap();
        assert_eq!(removed.host_name(), "localhost");
        assert_eq!(table.len(), 2);

        assert_eq!(table.remove_many(&[0, 1, 5]), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn filter_by_env_group_and_search() {
        let table = sample();
        assert_eq!(table.filter(&RecordFilter::new()), [0, 1, 2]);
        assert_eq!(table.filter(&RecordFilter::new().environment("prod")), [1, 2]);
        assert_eq!(
            table.filter(&RecordFilter::new().environment("prod").group("data")),
            [2]
        );
        assert_eq!(table.filter(&RecordFilter::new().search("api")), [1]);
        assert_eq!(table.filter(&RecordFilter::new().search("10.0.0")), [1, 2]);
        assert_eq!(table.filter(&RecordFilter::new().search("   ")), [0, 1, 2]);
        // Surrounding whitespace is part of the needle.
        assert!(table.filter(&RecordFilter::new().search(" api")).is_empty());
        assert_eq!(table.filter(&RecordFilter::new().search("API.")), [1]);
        assert!(table.filter(&RecordFilter::new().group("nope")).is_empty());
    }

    #[test]
    fn bulk_edits_track_dirty() {
        let mut table = sample();
        table.set_enabled(&[0, 2, 9], false);
        assert!(!table.get(0).unwrap().is_enabled());
        assert!(table.get(1).unwrap().is_enabled());
        assert!(table.get(2).unwrap().is_dirty());

        table.set_enabled(&[0, 2], true);
        assert!(!table.has_unsaved_changes());

        table.set_environment(&[0], "qa");
        table.set_group(&[1], "edge");
        assert_eq!(table.get(0).unwrap().environment(), "qa");
        assert_eq!(table.get(1).unwrap().group(), "edge");
        assert!(table.has_unsaved_changes());
    }

    #[test]
    fn registry_removals_clear_tags() {
        let mut table = sample();
        assert_eq!(table.clear_environments(&["prod".to_string()]), 2);
        assert_eq!(table.filter(&RecordFilter::new().environment("")), [1, 2]);

        assert_eq!(table.clear_groups(&["web".to_string(), "x".to_string()]), 1);
        assert_eq!(table.get(1).unwrap().group(), "");
        assert_eq!(table.get(2).unwrap().group(), "data");
    }

    #[test]
    fn rename_group_moves_members() {
        let mut table = sample();
        assert_eq!(table.rename_group("data", "storage"), 1);
        assert_eq!(table.get(2).unwrap().group(), "storage");
        assert_eq!(table.rename_group("missing", "x"), 0);
    }

    #[test]
    fn validate_reports_bad_record() {
        let mut table = sample();
        assert!(table.validate().is_ok());
        table.get_mut(1).unwrap().set_ip_address("10.0.0.256");
        assert!(table.validate().unwrap_err().is_validation());
    }
}
