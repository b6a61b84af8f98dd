//! # hosts-meta
//!
//! Read, edit, and regenerate a hosts file whose entries carry inline
//! metadata.
//!
//! Each mapping line may end in a comment holding up to three tags, always
//! in this order:
//!
//! ```text
//! 10.0.0.5 api.internal # [Env:prod] [Group:backend] [Desc:primary API]
//! # 10.0.0.6 api-old.internal # [Env:prod] [Group:backend]
//! ```
//!
//! A leading `#` disables an entry without losing it. Everything that is
//! not a mapping line (plain comments, blank lines, section headers) is
//! dropped on load and regenerated on save.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use hosts_meta::{HostRecord, HostsFile};
//!
//! let hosts = HostsFile::new();
//! let mut table = hosts.load_table()?;
//!
//! table.push(HostRecord::new("10.0.0.7", "cache.internal").with_environment("qa"));
//! table.validate()?;
//!
//! // Sorted by environment, group, host name; requires root.
//! hosts.save_table(&mut table)?;
//! ```
//!
//! ## Dirty tracking
//!
//! [`HostRecord`] compares its fields against the values captured at the
//! last [`HostRecord::mark_clean`]. Records created in the session stay
//! dirty until marked clean; loaded records start clean.
//!
//! ## Saving
//!
//! Saving always rewrites the whole file. Edits made by other programs
//! between load and save are lost; there is no locking or merging.
//!
//! ## Permissions
//!
//! Writing the system hosts file requires root. The caller is responsible
//! for privilege elevation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod hosts_file;
pub mod parser;
pub mod record;
pub mod registry;
pub mod table;
pub mod util;
pub mod validate;

pub use config::HostsConfig;
pub use error::{HostsError, Result};
pub use hosts_file::{HostsFile, is_managed_content, load, save};
pub use parser::parse_line;
pub use record::{HostFields, HostRecord, Status};
pub use registry::{NameRegistry, Registry};
pub use table::{HostTable, RecordFilter};
pub use validate::{is_valid_host_name, is_valid_ipv4, validate_records};
