//! Wildcard matching of a pattern against a token sequence.

use crate::pattern::{Binding, Pattern, PatternElement};

/// Match `input` against `pattern`.
///
/// Literals must equal the token at the same position. The wildcard first
/// claims every token after the literal prefix and gives tokens back from the
/// end until the literal suffix lines up with what is left. Both sequences
/// must be exhausted together. `None` means no match.
#[must_use]
pub fn match_pattern<T: AsRef<str>>(pattern: &Pattern, input: &[T]) -> Option<Binding> {
    let elements = pattern.elements();
    let Some(wildcard_at) = elements.iter().position(PatternElement::is_wildcard) else {
        return literals_match(elements, input).then(Binding::empty);
    };

    let prefix = &elements[..wildcard_at];
    let suffix = &elements[wildcard_at + 1..];
    if input.len() < prefix.len() || !literals_match(prefix, &input[..prefix.len()]) {
        return None;
    }

    let remaining = &input[prefix.len()..];
    (0..=remaining.len()).rev().find_map(|claim| {
        let (claimed, tail) = remaining.split_at(claim);
        literals_match(suffix, tail).then(|| Binding::from_tokens(claimed))
    })
}

fn literals_match<T: AsRef<str>>(elements: &[PatternElement], tokens: &[T]) -> bool {
    elements.len() == tokens.len()
        && elements
            .iter()
            .zip(tokens)
            .all(|(element, token)| element.literal() == Some(token.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> Pattern {
        let Ok(pattern) = Pattern::parse(text) else {
            panic!("invalid test pattern: {text}");
        };
        pattern
    }

    fn bound(text: &str, input: &[&str]) -> Option<Vec<String>> {
        match_pattern(&pattern(text), input).map(|b| b.tokens().to_vec())
    }

    #[test]
    fn wildcard_binds_single_token() {
        assert_eq!(
            bound(
                "what is the capital of %",
                &["what", "is", "the", "capital", "of", "france"]
            ),
            Some(vec!["france".to_string()])
        );
    }

    #[test]
    fn wildcard_binds_multiple_tokens() {
        assert_eq!(
            bound(
                "what is the capital of %",
                &["what", "is", "the", "capital", "of", "the", "united", "kingdom"]
            ),
            Some(vec![
                "the".to_string(),
                "united".to_string(),
                "kingdom".to_string()
            ])
        );
    }

    #[test]
    fn trailing_token_fails_without_wildcard() {
        assert_eq!(bound("bye", &["bye", "now"]), None);
    }

    #[test]
    fn exact_literal_pattern_matches_with_empty_binding() {
        assert_eq!(bound("bye", &["bye"]), Some(Vec::new()));
    }

    #[test]
    fn wildcard_may_bind_nothing() {
        assert_eq!(bound("bye %", &["bye"]), Some(Vec::new()));
    }

    #[test]
    fn wildcard_backs_off_for_literal_suffix() {
        assert_eq!(
            bound("% is big", &["texas", "is", "big"]),
            Some(vec!["texas".to_string()])
        );
        assert_eq!(
            bound("where is % located", &["where", "is", "new", "york", "located"]),
            Some(vec!["new".to_string(), "york".to_string()])
        );
    }

    #[test]
    fn suffix_literal_must_be_last_token() {
        assert_eq!(bound("% is big", &["texas", "is", "big", "really"]), None);
        assert_eq!(bound("% located", &["located"]), Some(Vec::new()));
    }

    #[test]
    fn greedy_claim_keeps_repeated_suffix_words() {
        assert_eq!(
            bound("% of", &["member", "of", "board", "of"]),
            Some(vec![
                "member".to_string(),
                "of".to_string(),
                "board".to_string()
            ])
        );
    }

    #[test]
    fn literal_mismatch_fails() {
        assert_eq!(
            bound("what is the capital of %", &["what", "is", "the", "area", "of", "peru"]),
            None
        );
    }

    #[test]
    fn input_shorter_than_prefix_fails() {
        assert_eq!(bound("what is the capital of %", &["what", "is"]), None);
        assert_eq!(bound("what is", &[]), None);
    }

    #[test]
    fn lone_wildcard_matches_anything() {
        assert_eq!(bound("%", &[]), Some(Vec::new()));
        assert_eq!(
            bound("%", &["anything", "goes"]),
            Some(vec!["anything".to_string(), "goes".to_string()])
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(bound("bye", &["Bye"]), None);
    }

    #[test]
    fn accepts_owned_tokens() {
        let input: Vec<String> = vec!["bye".to_string()];
        assert!(match_pattern(&pattern("bye"), &input).is_some());
    }
}
