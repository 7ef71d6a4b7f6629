//! Splitting raw input into candidate tokens.

use crate::delimiter::DelimiterSet;

/// Result of splitting one raw input value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tokenized {
    /// No delimiter occurred anywhere in the value; it is returned unchanged
    /// as a single unit. The pipeline treats this case specially: nothing is
    /// validated while the user may still be mid-typing a single address.
    Single(String),
    /// The value contained at least one delimiter. Tokens are trimmed,
    /// non-empty, and deduplicated by exact match in first-occurrence order.
    /// A value consisting only of delimiters yields an empty batch.
    Batch(Vec<String>),
}

/// Split `value` on the delimiter set.
pub fn split(value: &str, delimiters: &DelimiterSet) -> Tokenized {
    if !value.chars().any(|c| delimiters.contains(c)) {
        return Tokenized::Single(value.to_string());
    }

    let mut tokens: Vec<String> = Vec::new();
    for segment in value.split(|c: char| delimiters.contains(c)) {
        let token = segment.trim();
        if token.is_empty() {
            continue;
        }
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    log::trace!(target: "chips.tokenize", "split {:?} into {} token(s)", value, tokens.len());
    Tokenized::Batch(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_set() -> DelimiterSet {
        DelimiterSet::default_for(false)
    }

    #[test]
    fn no_delimiter_is_a_single_unit() {
        assert_eq!(
            split("a@b.com", &default_set()),
            Tokenized::Single("a@b.com".to_string())
        );
        // Even a clearly partial value stays whole.
        assert_eq!(split("a@", &default_set()), Tokenized::Single("a@".to_string()));
    }

    #[test]
    fn splits_on_every_delimiter() {
        assert_eq!(
            split("a@b.com,c@d.com;e@f.com g@h.com", &default_set()),
            Tokenized::Batch(vec![
                "a@b.com".to_string(),
                "c@d.com".to_string(),
                "e@f.com".to_string(),
                "g@h.com".to_string(),
            ])
        );
    }

    #[test]
    fn empty_segments_are_discarded() {
        assert_eq!(
            split(",,a@b.com, ,c@d.com,", &default_set()),
            Tokenized::Batch(vec!["a@b.com".to_string(), "c@d.com".to_string()])
        );
    }

    #[test]
    fn tokens_are_trimmed() {
        let set = DelimiterSet::parse(",").unwrap();
        assert_eq!(
            split("  a@b.com , c@d.com  ", &set),
            Tokenized::Batch(vec!["a@b.com".to_string(), "c@d.com".to_string()])
        );
    }

    #[test]
    fn batch_deduplicates_exact_matches_keeping_first() {
        assert_eq!(
            split("a@b.com,c@d.com,a@b.com", &default_set()),
            Tokenized::Batch(vec!["a@b.com".to_string(), "c@d.com".to_string()])
        );
    }

    #[test]
    fn delimiters_only_yields_empty_batch() {
        assert_eq!(split(", ;;, ", &default_set()), Tokenized::Batch(vec![]));
    }

    #[test]
    fn display_name_set_keeps_spaced_names_whole() {
        let set = DelimiterSet::default_for(true);
        assert_eq!(
            split("Jane Doe <jane@x.com>,bob@y.com", &set),
            Tokenized::Batch(vec![
                "Jane Doe <jane@x.com>".to_string(),
                "bob@y.com".to_string(),
            ])
        );
    }
}
