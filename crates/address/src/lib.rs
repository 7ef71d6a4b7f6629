//! Structural email address syntax checks with a constrained, practical grammar.
//!
//! Accepted shape: `local@domain` where the local part uses the ASCII atext
//! set plus interior dots, and the domain is a dotted sequence of LDH labels
//! with at least two labels.
//!
//! This is not an RFC 5322 parser. The constraint is intentional: address
//! validation in the input core is a pluggable capability, and this built-in
//! exists to classify what a user typed, not to arbitrate deliverability.
//!
//! Known limitations (intentional):
//! - No quoted local parts (`"john doe"@example.com`).
//! - No domain literals (`user@[192.0.2.1]`).
//! - ASCII only; internationalized addresses are rejected.
//!
//! The `"Display Name <local@domain>"` form is handled by
//! [`split_display_name`], which the input core uses for its display-name
//! retry path.

use memchr::{memchr, memrchr};

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

// atext per RFC 5322, minus nothing: dots are validated positionally.
fn is_atext(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
        | b'+' | b'-' | b'/' | b'=' | b'?' | b'^' | b'_' | b'`' | b'{' | b'|' | b'}' | b'~')
}

fn is_valid_local(local: &[u8]) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    if local.first() == Some(&b'.') || local.last() == Some(&b'.') {
        return false;
    }
    let mut prev_dot = false;
    for &b in local {
        if b == b'.' {
            if prev_dot {
                return false;
            }
            prev_dot = true;
        } else {
            if !is_atext(b) {
                return false;
            }
            prev_dot = false;
        }
    }
    true
}

fn is_valid_label(label: &[u8]) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.first() == Some(&b'-') || label.last() == Some(&b'-') {
        return false;
    }
    label
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_valid_domain(domain: &[u8]) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    let mut count = 0;
    for label in domain.split(|&b| b == b'.') {
        if !is_valid_label(label) {
            return false;
        }
        count += 1;
    }
    // A bare hostname ("user@localhost") never looks like an address the
    // user finished typing, so require at least one dot.
    count >= 2
}

/// Returns `true` if `s` is a structurally valid `local@domain` address.
///
/// The input is checked as given: no trimming is performed here, callers
/// tokenize and trim first.
pub fn is_address(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some(at) = memchr(b'@', bytes) else {
        return false;
    };
    let (local, rest) = bytes.split_at(at);
    let domain = &rest[1..];
    // Exactly one '@': a second occurrence lives in `domain` and fails the
    // label character check, but reject it explicitly for clarity.
    if memchr(b'@', domain).is_some() {
        return false;
    }
    is_valid_local(local) && is_valid_domain(domain)
}

/// A `"Display Name <local@domain>"` entry split into its two parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayName<'a> {
    /// The human-readable name portion, with surrounding whitespace trimmed.
    /// May be empty (`"<user@example.com>"` is accepted).
    pub name: &'a str,
    /// The bracketed address. Guaranteed to satisfy [`is_address`].
    pub address: &'a str,
}

/// Parses the `"Display Name <local@domain>"` form.
///
/// Returns `None` unless the string ends (modulo trailing whitespace) with a
/// `<...>` group whose content is a structurally valid address.
pub fn split_display_name(s: &str) -> Option<DisplayName<'_>> {
    let bytes = s.as_bytes();
    let lt = memrchr(b'<', bytes)?;
    let gt_rel = memchr(b'>', &bytes[lt + 1..])?;
    let gt = lt + 1 + gt_rel;
    if !s[gt + 1..].trim().is_empty() {
        return None;
    }
    let addr = &s[lt + 1..gt];
    if !is_address(addr) {
        return None;
    }
    Some(DisplayName {
        name: s[..lt].trim(),
        address: addr,
    })
}

/// Returns `true` if `s` matches the display-name form accepted by
/// [`split_display_name`].
pub fn is_display_name_address(s: &str) -> bool {
    split_display_name(s).is_some()
}
