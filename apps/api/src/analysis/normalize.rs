//! Text normalization — turns free text into a comparable keyword set.
//!
//! Pure and deterministic: lowercase, split on non-alphanumeric, drop
//! stop words and tokens shorter than 2 characters.

use std::collections::BTreeSet;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "do", "for", "from", "had", "has",
    "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
    "my", "no", "not", "of", "on", "or", "our", "out", "so", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "to", "up", "us", "was", "we", "were",
    "what", "when", "which", "who", "will", "with", "would", "you", "your",
];

/// Normalizes text into a set of lowercase keyword tokens.
///
/// Returns an empty set for empty or whitespace-only input. The result is
/// a set, so token order and repetition in the input never matter.
pub fn normalize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .filter(|token| token.len() >= 2 && !is_stop_word(token))
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokens = normalize("Senior Rust Engineer (Backend/Infra)!");
        assert!(tokens.contains("senior"));
        assert!(tokens.contains("rust"));
        assert!(tokens.contains("engineer"));
        assert!(tokens.contains("backend"));
        assert!(tokens.contains("infra"));
    }

    #[test]
    fn test_drops_stop_words() {
        let tokens = normalize("experience with the cloud and its tooling");
        assert!(!tokens.contains("with"));
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("and"));
        assert!(!tokens.contains("its"));
        assert!(tokens.contains("cloud"));
        assert!(tokens.contains("tooling"));
    }

    #[test]
    fn test_drops_single_char_tokens() {
        let tokens = normalize("C, R & Go");
        assert!(!tokens.contains("c"));
        assert!(!tokens.contains("r"));
        assert!(tokens.contains("go"));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t  ").is_empty());
        assert!(normalize("... !! ---").is_empty());
    }

    #[test]
    fn test_deterministic_and_order_independent() {
        let a = normalize("Python AWS leadership");
        let b = normalize("leadership, AWS; Python");
        assert_eq!(a, b);
        assert_eq!(a, normalize("Python AWS leadership"));
    }

    #[test]
    fn test_repeated_tokens_collapse() {
        let tokens = normalize("python python PYTHON");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains("python"));
    }
}
