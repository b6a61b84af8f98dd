//! Field validators.
//!
//! The validators are pure and usable without a [`HostRecord`] so callers can
//! check user input before building one.

use crate::error::{HostsError, Result};
use crate::record::HostRecord;

/// Returns `true` if `s` is a dotted-quad IPv4 literal.
///
/// Surrounding whitespace is ignored. Each octet is one to three decimal
/// digits with a value of at most 255; leading zeros are accepted
/// (`"010.0.0.1"` is valid).
#[must_use]
pub fn is_valid_ipv4(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }

    let mut octets = 0;
    for part in s.split('.') {
        octets += 1;
        if octets > 4 || !is_octet(part) {
            return false;
        }
    }
    octets == 4
}

fn is_octet(part: &str) -> bool {
    (1..=3).contains(&part.len())
        && part.bytes().all(|b| b.is_ascii_digit())
        && part.parse::<u16>().is_ok_and(|v| v <= 255)
}

/// Returns `true` if `s` is an acceptable host name.
///
/// After trimming, the name must start and end with an ASCII alphanumeric
/// character and contain only alphanumerics, `-` and `.` in between. A
/// single alphanumeric character is allowed.
#[must_use]
pub fn is_valid_host_name(s: &str) -> bool {
    let bytes = s.trim().as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// Checks every record's address and host name, in collection order.
///
/// # Errors
///
/// Returns [`HostsError::InvalidIpAddress`] or [`HostsError::InvalidHostName`]
/// for the first record that fails. The address is checked before the name.
pub fn validate_records<'a, I>(records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a HostRecord>,
{
    for record in records {
        if !is_valid_ipv4(record.ip_address()) {
            return Err(HostsError::InvalidIpAddress {
                ip: record.ip_address().to_string(),
                host: record.host_name().to_string(),
            });
        }
        if !is_valid_host_name(record.host_name()) {
            return Err(HostsError::InvalidHostName {
                host: record.host_name().to_string(),
                ip: record.ip_address().to_string(),
            });
        }
    }
    Ok(())
}
