//! Delimiter character classes for token splitting.
//!
//! Delimiters are an explicit character set with a tiny class grammar, not a
//! regular expression: the set is parsed and validated once at configuration
//! time, so a malformed pattern fails at field setup instead of on the first
//! keystroke.
//!
//! Class grammar: an optional `[` ... `]` wrapper around a sequence of
//! literal characters, with backslash escapes for `\t`, `\n`, `\r`, `\\`,
//! `\[` and `\]`. `"[ ,;]"` and `" ,;"` describe the same set.

use std::fmt;

/// The set of characters that terminate a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelimiterSet {
    chars: Vec<char>,
}

/// Configuration-time failure while parsing a delimiter class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterError {
    /// The pattern describes an empty set.
    Empty,
    /// A `[` wrapper was opened but never closed.
    UnclosedClass,
    /// The pattern ends in a bare backslash.
    DanglingEscape,
    /// Backslash followed by a character with no defined escape.
    UnknownEscape(char),
}

impl fmt::Display for DelimiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelimiterError::Empty => write!(f, "delimiter class is empty"),
            DelimiterError::UnclosedClass => write!(f, "delimiter class is missing closing ']'"),
            DelimiterError::DanglingEscape => write!(f, "delimiter class ends in a bare '\\'"),
            DelimiterError::UnknownEscape(c) => write!(f, "unknown escape '\\{c}' in delimiter class"),
        }
    }
}

impl std::error::Error for DelimiterError {}

impl DelimiterSet {
    /// Parse a delimiter class from its textual form.
    pub fn parse(pattern: &str) -> Result<Self, DelimiterError> {
        let body = if let Some(rest) = pattern.strip_prefix('[') {
            rest.strip_suffix(']').ok_or(DelimiterError::UnclosedClass)?
        } else {
            pattern
        };

        let mut chars: Vec<char> = Vec::new();
        let mut iter = body.chars();
        while let Some(c) = iter.next() {
            let resolved = if c == '\\' {
                match iter.next() {
                    None => return Err(DelimiterError::DanglingEscape),
                    Some('t') => '\t',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some(lit @ ('\\' | '[' | ']')) => lit,
                    Some(other) => return Err(DelimiterError::UnknownEscape(other)),
                }
            } else {
                c
            };
            if !chars.contains(&resolved) {
                chars.push(resolved);
            }
        }

        if chars.is_empty() {
            return Err(DelimiterError::Empty);
        }
        Ok(Self { chars })
    }

    /// The default set: whitespace, comma and semicolon.
    ///
    /// When display names are allowed the plain space is excluded, since
    /// `"Jane Doe <jane@x.com>"` must survive splitting.
    pub fn default_for(allow_display_name: bool) -> Self {
        let mut chars = vec!['\t', '\n', '\r', ',', ';'];
        if !allow_display_name {
            chars.insert(0, ' ');
        }
        Self { chars }
    }

    /// Returns `true` if `c` is in the set.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_class() {
        let set = DelimiterSet::parse("[ ,;]").unwrap();
        assert!(set.contains(' '));
        assert!(set.contains(','));
        assert!(set.contains(';'));
        assert!(!set.contains('a'));
    }

    #[test]
    fn brackets_are_optional() {
        assert_eq!(DelimiterSet::parse(",;").unwrap(), DelimiterSet::parse("[,;]").unwrap());
    }

    #[test]
    fn resolves_escapes() {
        let set = DelimiterSet::parse(r"[\t\n\]]").unwrap();
        assert!(set.contains('\t'));
        assert!(set.contains('\n'));
        assert!(set.contains(']'));
    }

    #[test]
    fn duplicate_characters_collapse() {
        let set = DelimiterSet::parse(",,,;").unwrap();
        assert_eq!(set, DelimiterSet::parse(",;").unwrap());
    }

    #[test]
    fn rejects_malformed_classes() {
        assert_eq!(DelimiterSet::parse(""), Err(DelimiterError::Empty));
        assert_eq!(DelimiterSet::parse("[,;"), Err(DelimiterError::UnclosedClass));
        // The escape consumes the closer, so the class never terminates.
        assert!(DelimiterSet::parse(r"[,\]").is_err());
        assert_eq!(DelimiterSet::parse(r",\"), Err(DelimiterError::DanglingEscape));
        assert_eq!(DelimiterSet::parse(r"[\q]"), Err(DelimiterError::UnknownEscape('q')));
    }

    #[test]
    fn default_narrows_for_display_names() {
        assert!(DelimiterSet::default_for(false).contains(' '));
        assert!(!DelimiterSet::default_for(true).contains(' '));
        assert!(DelimiterSet::default_for(true).contains(','));
    }
}
