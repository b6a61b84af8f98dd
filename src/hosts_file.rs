//! Whole-file load and save.
//!
//! Loading keeps only lines that parse as mappings. Saving regenerates the
//! file from scratch: records are sorted by environment, group, and host
//! name, and each environment and group run gets a header comment.

use crate::config::HostsConfig;
use crate::error::{HostsError, Result};
use crate::parser::parse_line;
use crate::record::HostRecord;
use crate::table::HostTable;
use crate::util::is_privileged;
use std::path::{Path, PathBuf};

/// Default hosts file location.
#[cfg(windows)]
pub const DEFAULT_HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

/// Default hosts file location.
#[cfg(not(windows))]
pub const DEFAULT_HOSTS_PATH: &str = "/etc/hosts";

/// Prefix of every environment header line; also marks a managed file.
const ENV_HEADER_MARKER: &str = "# ====================";

/// Tag openers whose presence marks a managed file.
const TAG_MARKERS: [&str; 3] = ["[Env:", "[Group:", "[Desc:"];

const BACKUP_SUFFIX: &str = "_backup";
const PREV_BACKUP_SUFFIX: &str = "_prev_backup";

/// Handle to one annotated hosts file.
///
/// The handle holds only a path and rendering settings. Records are passed
/// in and handed back; nothing is cached between calls, and [`save`]
/// overwrites whatever is on disk.
///
/// # Permissions
///
/// Writing the system hosts file requires root (Administrator on Windows).
/// The caller is responsible for elevation; check
/// [`HostsError::is_permission_denied`] on failure.
///
/// # Example
///
/// ```rust,ignore
/// use hosts_meta::{HostsFile, HostRecord, validate_records};
///
/// let hosts = HostsFile::new();
/// let mut records = hosts.load()?;
/// records.push(HostRecord::new("10.0.0.7", "api.local").with_environment("qa"));
///
/// validate_records(&records)?;
/// hosts.save(&records)?;
/// ```
///
/// [`save`]: Self::save
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
    config: HostsConfig,
}

impl HostsFile {
    /// Creates a handle for the platform's system hosts file.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(DEFAULT_HOSTS_PATH)
    }

    /// Creates a handle for an arbitrary file (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: HostsConfig::default(),
        }
    }

    /// Replaces the rendering settings.
    #[must_use]
    pub fn with_config(mut self, config: HostsConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the hosts file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the rendering settings.
    #[must_use]
    pub const fn config(&self) -> &HostsConfig {
        &self.config
    }

    /// Reads every mapping line of the file, in file order.
    ///
    /// A missing file yields an empty list. Lines that are not mappings are
    /// dropped. The file is decoded as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<HostRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Hosts file does not exist, nothing to load"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = parse_content(&String::from_utf8_lossy(&bytes));
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded hosts file"
        );
        Ok(records)
    }

    /// Loads the file into a session table with every record clean.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_table(&self) -> Result<HostTable> {
        self.load().map(HostTable::from)
    }

    /// Regenerates the file from `records`, replacing its contents.
    ///
    /// Field values are written as-is; run
    /// [`validate_records`](crate::validate_records) first to refuse invalid
    /// addresses or host names.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be written.
    pub fn save<'a, I>(&self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a HostRecord>,
    {
        let records: Vec<&HostRecord> = records.into_iter().collect();
        let content = self.render(records.iter().copied());

        if let Err(e) = std::fs::write(&self.path, content) {
            self.log_write_failure("save", &e);
            return Err(e.into());
        }

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Saved hosts file"
        );
        Ok(())
    }

    /// Saves the table and marks all of its records clean.
    ///
    /// Records stay dirty if the write fails.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_table(&self, table: &mut HostTable) -> Result<()> {
        self.save(table.iter())?;
        table.mark_all_clean();
        Ok(())
    }

    /// Renders `records` in saved-file form without touching the disk.
    #[must_use]
    pub fn render<'a, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'a HostRecord>,
    {
        render(records, &self.config)
    }

    /// Copies the file to `<path>_backup`, replacing any earlier backup.
    ///
    /// Returns the backup path.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NotFound`] if the hosts file is missing, or
    /// [`HostsError::Io`] if the copy fails.
    pub fn backup(&self) -> Result<PathBuf> {
        if !self.path.exists() {
            return Err(HostsError::NotFound {
                path: self.path.display().to_string(),
            });
        }

        let target = self.sibling(BACKUP_SUFFIX);
        if let Err(e) = std::fs::copy(&self.path, &target) {
            self.log_write_failure("backup", &e);
            return Err(e.into());
        }

        tracing::info!(backup = %target.display(), "Backed up hosts file");
        Ok(target)
    }

    /// Preserves the pre-management file at `<path>_prev_backup`.
    ///
    /// The copy is made when the current content is not in the managed
    /// format, or when no previous backup exists yet. Returns `true` if a
    /// copy was written; a missing hosts file returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be read or copied.
    pub fn backup_original(&self) -> Result<bool> {
        let content = match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let target = self.sibling(PREV_BACKUP_SUFFIX);
        if is_managed_content(&content) && target.exists() {
            tracing::debug!(backup = %target.display(), "Previous backup already present");
            return Ok(false);
        }

        if let Err(e) = std::fs::copy(&self.path, &target) {
            self.log_write_failure("backup", &e);
            return Err(e.into());
        }

        tracing::info!(backup = %target.display(), "Preserved original hosts file");
        Ok(true)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn log_write_failure(&self, action: &str, e: &std::io::Error) {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            tracing::warn!(
                path = %self.path.display(),
                action,
                privileged = is_privileged(),
                "Permission denied writing hosts file"
            );
        }
    }
}

impl Default for HostsFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the mapping records of the file at `path`.
///
/// Shorthand for [`HostsFile::with_path`] + [`HostsFile::load`].
///
/// # Errors
///
/// Returns [`HostsError::Io`] if the file exists but cannot be read.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<HostRecord>> {
    HostsFile::with_path(path.as_ref()).load()
}

/// Regenerates the file at `path` from `records` with default header labels.
///
/// # Errors
///
/// Returns [`HostsError::Io`] if the file cannot be written.
pub fn save<'a, I>(path: impl AsRef<Path>, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a HostRecord>,
{
    HostsFile::with_path(path.as_ref()).save(records)
}

/// Returns `true` if `content` already carries metadata tags or section
/// headers written by this crate.
#[must_use]
pub fn is_managed_content(content: &str) -> bool {
    content.contains(ENV_HEADER_MARKER) || TAG_MARKERS.iter().any(|m| content.contains(m))
}

// ---------------------------------------------------------------------------
// Content helpers
// ---------------------------------------------------------------------------

fn parse_content(content: &str) -> Vec<HostRecord> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let record = parse_line(line, index);
            if record.is_none() && !line.trim().is_empty() {
                tracing::debug!(line = index, "Skipping non-mapping line");
            }
            record
        })
        .collect()
}

/// Sort key: environment, group, host name. Empty environment and group
/// values sort after every non-empty value.
fn sort_key(r: &HostRecord) -> (bool, &str, bool, &str, &str) {
    (
        r.environment().is_empty(),
        r.environment(),
        r.group().is_empty(),
        r.group(),
        r.host_name(),
    )
}

/// Renders records as file content.
///
/// ```text
/// # ==================== [prod] ====================
/// # --- web ---
/// 10.0.0.1 www.example.com # [Env:prod] [Group:web]
/// # 10.0.0.2 old.example.com # [Env:prod] [Group:web] [Desc:retired]
///
/// # ==================== [Unassigned] ====================
/// # --- Unassigned ---
/// 127.0.0.1 localhost
/// ```
fn render<'a, I>(records: I, config: &HostsConfig) -> String
where
    I: IntoIterator<Item = &'a HostRecord>,
{
    let mut sorted: Vec<&HostRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut out = String::new();
    let mut current_env: Option<&str> = None;
    let mut current_group: Option<&str> = None;

    for record in sorted {
        if current_env != Some(record.environment()) {
            if current_env.is_some() {
                out.push('\n');
            }
            let label = label_or(record.environment(), &config.environment_placeholder);
            out.push_str(&format!("{ENV_HEADER_MARKER} [{label}] ====================\n"));
            current_env = Some(record.environment());
            current_group = None;
        }

        if current_group != Some(record.group()) {
            let label = label_or(record.group(), &config.group_placeholder);
            out.push_str(&format!("# --- {label} ---\n"));
            current_group = Some(record.group());
        }

        out.push_str(&render_line(record));
        out.push('\n');
    }

    out
}

fn render_line(record: &HostRecord) -> String {
    let mut line = String::new();
    if !record.is_enabled() {
        line.push_str("# ");
    }
    line.push_str(record.ip_address());
    line.push(' ');
    line.push_str(record.host_name());

    let tags = [
        ("Env", record.environment()),
        ("Group", record.group()),
        ("Desc", record.description()),
    ];
    if tags.iter().any(|(_, value)| !value.is_empty()) {
        line.push_str(" #");
        for (tag, value) in tags.into_iter().filter(|(_, v)| !v.is_empty()) {
            line.push_str(&format!(" [{tag}:{value}]"));
        }
    }
    line
}

const fn label_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ip: &str, host: &str, env: &str, group: &str) -> HostRecord {
        HostRecord::new(ip, host)
            .with_environment(env)
            .with_group(group)
    }

    #[test]
    fn render_line_formats() {
        assert_eq!(
            render_line(&HostRecord::new("127.0.0.1", "localhost")),
            "127.0.0.1 localhost"
        );
        assert_eq!(
            render_line(&HostRecord::new("127.0.0.1", "localhost").with_enabled(false)),
            "# 127.0.0.1 localhost"
        );
        assert_eq!(
            render_line(
                &HostRecord::new("192.168.1.100", "api.server.com")
                    .with_environment("prod")
                    .with_description("프로덕션 API 서버")
            ),
            "192.168.1.100 api.server.com # [Env:prod] [Desc:프로덕션 API 서버]"
        );
        assert_eq!(
            render_line(&HostRecord::new("10.0.0.1", "db").with_group("data")),
            "10.0.0.1 db # [Group:data]"
        );
    }

    #[test]
    fn render_groups_and_sorts() {
        let records = [
            rec("10.0.0.3", "zeta", "", ""),
            rec("10.0.0.2", "beta", "prod", "web"),
            rec("10.0.0.1", "alpha", "prod", "web"),
            rec("10.0.0.4", "gamma", "prod", ""),
            rec("10.0.0.5", "delta", "dev", "web"),
        ];
        let out = render(&records, &HostsConfig::default());

        let expected = "\
# ==================== [dev] ====================
# --- web ---
10.0.0.5 delta # [Env:dev] [Group:web]

# ==================== [prod] ====================
# --- web ---
10.0.0.1 alpha # [Env:prod] [Group:web]
10.0.0.2 beta # [Env:prod] [Group:web]
# --- Unassigned ---
10.0.0.4 gamma # [Env:prod]

# ==================== [Unassigned] ====================
# --- Unassigned ---
10.0.0.3 zeta
";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_environment_sorts_after_high_names() {
        let records = [rec("1.1.1.1", "a", "", ""), rec("2.2.2.2", "b", "zzzz", "")];
        let out = render(&records, &HostsConfig::default());
        let zzzz = out.find("[zzzz]").unwrap();
        let unassigned = out.find("[Unassigned]").unwrap();
        assert!(zzzz < unassigned);
    }

    #[test]
    fn comparisons_are_ordinal() {
        let records = [
            rec("1.1.1.1", "b", "", ""),
            rec("1.1.1.2", "B", "", ""),
            rec("1.1.1.3", "a", "", ""),
        ];
        let out = render(&records, &HostsConfig::default());
        let hosts: Vec<&str> = out
            .lines()
            .filter(|l| !l.starts_with('#'))
            .map(|l| l.split(' ').nth(1).unwrap())
            .collect();
        assert_eq!(hosts, ["B", "a", "b"]);
    }

    #[test]
    fn custom_placeholders() {
        let config = HostsConfig::new()
            .with_environment_placeholder("미지정")
            .with_group_placeholder("none");
        let out = render(&[HostRecord::new("127.0.0.1", "localhost")], &config);
        assert!(out.starts_with(
            "# ==================== [미지정] ====================\n# --- none ---\n"
        ));
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(
            render(std::iter::empty::<&HostRecord>(), &HostsConfig::default()),
            ""
        );
    }

    #[test]
    fn parse_content_skips_bom_and_crlf() {
        let records = parse_content(
            "\u{feff}127.0.0.1 localhost\r\n# comment\r\n10.0.0.1 db # [Env:qa]\r\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip_address(), "127.0.0.1");
        assert_eq!(records[1].environment(), "qa");
        assert_eq!(records[1].source_line(), Some(2));
    }

    #[test]
    fn load_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, b"10.0.0.1 a # [Desc:\xff\xfe]\n10.0.0.2 b\n").unwrap();

        let records = load(&path).unwrap();
        let loaded: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.host_name(), r.description()))
            .collect();
        assert_eq!(loaded, [("a", "\u{fffd}\u{fffd}"), ("b", "")]);
    }

    #[test]
    fn load_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HostsFile::with_path(dir.path()).load().unwrap_err();
        assert!(matches!(err, HostsError::Io(_)));
    }

    #[test]
    fn managed_content_detection() {
        assert!(is_managed_content("1.1.1.1 a # [Env:x]"));
        assert!(is_managed_content("1.1.1.1 a # [Desc:x]"));
        assert!(is_managed_content("# ==================== [x] ===================="));
        assert!(!is_managed_content("127.0.0.1 localhost\n# plain comment\n"));
    }

    #[test]
    fn sibling_paths() {
        let hosts = HostsFile::with_path("/tmp/hosts");
        assert_eq!(hosts.sibling(BACKUP_SUFFIX), PathBuf::from("/tmp/hosts_backup"));
        assert_eq!(
            hosts.sibling(PREV_BACKUP_SUFFIX),
            PathBuf::from("/tmp/hosts_prev_backup")
        );
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = HostsFile::with_path(dir.path().join("hosts"));

        assert!(hosts.load().unwrap().is_empty());

        let records =
            [rec("127.0.0.1", "localhost", "local", "개발").with_description("로컬 서버")];
        hosts.save(&records).unwrap();

        let loaded = hosts.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].fields(), records[0].fields());
        assert!(!loaded[0].is_dirty());
        // Two header lines precede the record.
        assert_eq!(loaded[0].source_line(), Some(2));
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "10.9.9.9 stale.local\n# keep me?\n").unwrap();

        save(&path, &[HostRecord::new("127.0.0.1", "localhost")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale.local"));
        assert!(!content.contains("keep me"));
        assert_eq!(load(&path).unwrap().len(), 1);
    }

    #[test]
    fn backup_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = HostsFile::with_path(dir.path().join("hosts"));
        assert!(matches!(hosts.backup(), Err(HostsError::NotFound { .. })));
        assert!(!hosts.backup_original().unwrap());
    }

    #[test]
    fn backup_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();

        let target = HostsFile::with_path(&path).backup().unwrap();
        assert_eq!(target, dir.path().join("hosts_backup"));
        assert_eq!(
            std::fs::read_to_string(target).unwrap(),
            "127.0.0.1 localhost\n"
        );
    }

    #[test]
    fn backup_original_keeps_first_unmanaged_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        let prev = dir.path().join("hosts_prev_backup");
        let hosts = HostsFile::with_path(&path);

        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();
        assert!(hosts.backup_original().unwrap());
        assert_eq!(std::fs::read_to_string(&prev).unwrap(), "127.0.0.1 localhost\n");

        // Once the file is managed, the original copy is left alone.
        hosts
            .save(&[HostRecord::new("127.0.0.1", "localhost").with_environment("local")])
            .unwrap();
        assert!(!hosts.backup_original().unwrap());
        assert_eq!(std::fs::read_to_string(&prev).unwrap(), "127.0.0.1 localhost\n");

        // An external rewrite back to plain format is captured again.
        std::fs::write(&path, "10.0.0.1 other\n").unwrap();
        assert!(hosts.backup_original().unwrap());
        assert_eq!(std::fs::read_to_string(&prev).unwrap(), "10.0.0.1 other\n");
    }
}
