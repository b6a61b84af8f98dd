//! Line parser for annotated hosts entries.
//!
//! Accepted shape (after trimming):
//!
//! ```text
//! [#] a.b.c.d host [# [Env:value] [Group:value] [Desc:value]]
//! ```
//!
//! A leading `#` marks a disabled entry. Octets are matched loosely (one to
//! three digits each); range checks belong to [`crate::validate`]. Tags are
//! optional individually but only recognised in Env, Group, Desc order.
//! Anything after the host token that does not fit this shape is ignored.

use crate::record::{HostFields, HostRecord};

const ENV_TAG: &str = "Env";
const GROUP_TAG: &str = "Group";
const DESC_TAG: &str = "Desc";

/// Parses one line of a hosts file.
///
/// Returns `None` for blank lines, comments, section headers, and anything
/// else that does not begin with an address and host token.
///
/// # Example
///
/// ```
/// use hosts_meta::parse_line;
///
/// let record = parse_line("# 10.0.0.5 db.local # [Group:data]", 7).unwrap();
/// assert_eq!(record.ip_address(), "10.0.0.5");
/// assert_eq!(record.group(), "data");
/// assert!(!record.is_enabled());
/// assert_eq!(record.source_line(), Some(7));
/// ```
#[must_use]
pub fn parse_line(line: &str, index: usize) -> Option<HostRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (enabled, rest) = match line.strip_prefix('#') {
        Some(rest) => (false, rest.trim_start()),
        None => (true, line),
    };

    let (ip_address, rest) = take_ipv4(rest)?;
    let rest = take_whitespace(rest)?;
    let (host_name, rest) = take_token(rest);

    let mut fields = HostFields {
        ip_address: ip_address.to_string(),
        host_name: host_name.to_string(),
        enabled,
        ..HostFields::default()
    };

    if let Some(comment) = rest.trim_start().strip_prefix('#') {
        let (env, comment) = take_tag(comment.trim_start(), ENV_TAG);
        let (group, comment) = take_tag(comment.trim_start(), GROUP_TAG);
        let (desc, _) = take_tag(comment.trim_start(), DESC_TAG);

        fields.environment = env.unwrap_or_default().to_string();
        fields.group = group.unwrap_or_default().to_string();
        fields.description = desc.unwrap_or_default().to_string();
    }

    Some(HostRecord::parsed(fields, index))
}

/// Splits off four dot-separated groups of one to three ASCII digits.
fn take_ipv4(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    for octet in 0..4 {
        if octet > 0 {
            if bytes.get(pos) != Some(&b'.') {
                return None;
            }
            pos += 1;
        }
        let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if !(1..=3).contains(&digits) {
            return None;
        }
        pos += digits;
    }

    Some(s.split_at(pos))
}

/// Requires at least one whitespace character and skips all of it.
fn take_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    (trimmed.len() < s.len()).then_some(trimmed)
}

/// Splits off a run of non-whitespace characters.
fn take_token(s: &str) -> (&str, &str) {
    s.find(char::is_whitespace)
        .map_or((s, ""), |end| s.split_at(end))
}

/// Matches `[name:value]` at the start of `s`.
///
/// Leaves `s` untouched when the tag is absent or unterminated.
fn take_tag<'a>(s: &'a str, name: &str) -> (Option<&'a str>, &'a str) {
    let Some(body) = s
        .strip_prefix('[')
        .and_then(|b| b.strip_prefix(name))
        .and_then(|b| b.strip_prefix(':'))
    else {
        return (None, s);
    };

    match body.split_once(']') {
        Some((value, rest)) => (Some(value), rest),
        None => (None, s),
    }
}
