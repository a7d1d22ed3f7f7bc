//! Insufficiency detection.
//!
//! The assistant's instructions tell it to emit a fixed phrase when its
//! document context cannot answer the question. The detector trusts that
//! contract: a case-insensitive substring match, nothing fuzzier. Brittle,
//! but deterministic and testable.

/// The phrase the grounded assistant emits when its context is insufficient.
pub const INSUFFICIENT_SENTINEL: &str = "answer not available in context";

/// Classify an assembled answer as grounded or insufficient.
///
/// True iff the sentinel phrase appears anywhere in the answer, in any
/// case, regardless of surrounding content.
pub fn is_insufficient(answer: &str) -> bool {
    answer.to_lowercase().contains(INSUFFICIENT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sentinel() {
        assert!(is_insufficient("answer not available in context"));
        assert!(is_insufficient("Answer not available in context."));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_insufficient("ANSWER NOT AVAILABLE IN CONTEXT"));
        assert!(is_insufficient("AnSwEr NoT aVaIlAbLe In CoNtExT"));
    }

    #[test]
    fn test_position_independent() {
        assert!(is_insufficient(
            "I'm sorry, but the answer not available in context for this query."
        ));
        assert!(is_insufficient("prefix answer not available in context suffix"));
    }

    #[test]
    fn test_grounded_answers_pass() {
        assert!(!is_insufficient("The hotel booking policy requires 48h notice."));
        assert!(!is_insufficient(""));
        assert!(!is_insufficient("answer not available")); // partial phrase
    }

    #[test]
    fn test_substring_law() {
        // is_insufficient(a) == a.to_lowercase().contains(SENTINEL), always
        let cases = [
            "grounded",
            "Answer Not Available In Context",
            "contextual answer, fully available",
            "... ANSWER NOT AVAILABLE IN CONTEXT ...",
        ];
        for a in cases {
            assert_eq!(
                is_insufficient(a),
                a.to_lowercase().contains(INSUFFICIENT_SENTINEL)
            );
        }
    }
}
