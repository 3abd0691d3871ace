//! Phone-number-list parsing for the check argument text.

use crate::domain::PhoneNumber;

/// Split a raw argument string into an ordered list of candidate identifiers.
///
/// Tokens are comma-separated and trimmed. Empty tokens (consecutive or
/// trailing commas, whitespace-only input) are skipped rather than forwarded
/// to the directory. Duplicates are preserved, in input order.
pub fn parse_number_list(argument_text: &str) -> Vec<PhoneNumber> {
    argument_text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| PhoneNumber(token.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(raw: &str) -> Vec<String> {
        parse_number_list(raw).into_iter().map(|n| n.0).collect()
    }

    #[test]
    fn splits_on_commas_and_trims() {
        assert_eq!(numbers("123, 456 ,789"), vec!["123", "456", "789"]);
    }

    #[test]
    fn single_token_without_comma() {
        assert_eq!(numbers("  923001234567 "), vec!["923001234567"]);
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        assert!(numbers("").is_empty());
        assert!(numbers("   ").is_empty());
    }

    #[test]
    fn skips_empty_tokens_from_malformed_lists() {
        assert_eq!(numbers("123,,456,"), vec!["123", "456"]);
        assert!(numbers(",,,").is_empty());
    }

    #[test]
    fn preserves_duplicates_in_order() {
        assert_eq!(numbers("1,2,1"), vec!["1", "2", "1"]);
    }
}
