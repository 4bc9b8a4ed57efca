//! Dictionary word and word-combo matching

use super::dictionary::Dictionary;
use crate::types::MatchMode;

/// Shortest half accepted when splitting a concatenated label
const MIN_HALF_LEN: usize = 3;

/// Label is a single dictionary word with no hyphen
pub fn is_exact(label: &str, words: &Dictionary) -> bool {
    !label.contains('-') && words.contains(label)
}

/// Label is a word, a hyphen-joined word combo, or two concatenated words.
///
/// Checks run in that order and the first hit wins.
pub fn is_broad(label: &str, words: &Dictionary) -> bool {
    if label.is_empty() {
        return false;
    }

    if words.contains(label) {
        return true;
    }

    if label.contains('-') {
        let parts: Vec<&str> = label.split('-').filter(|p| !p.is_empty()).collect();
        if parts.len() >= 2 && parts.iter().all(|p| words.contains(p)) {
            return true;
        }
    }

    two_word_split(label, words).is_some()
}

/// Find the first split index `i` (3 <= i <= len - 3) where both halves are words
pub fn two_word_split(label: &str, words: &Dictionary) -> Option<usize> {
    let len = label.len();
    if len < MIN_HALF_LEN * 2 {
        return None;
    }

    (MIN_HALF_LEN..=len - MIN_HALF_LEN)
        .filter(|&i| label.is_char_boundary(i))
        .find(|&i| words.contains(&label[..i]) && words.contains(&label[i..]))
}

impl MatchMode {
    /// Apply this policy to a cleaned label
    pub fn matches(&self, label: &str, words: &Dictionary) -> bool {
        match self {
            MatchMode::Exact => is_exact(label, words),
            MatchMode::Broad => is_broad(label, words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> Dictionary {
        Dictionary::from_words(["cat", "dog"])
    }

    #[test]
    fn test_exact() {
        assert!(is_exact("cat", &pets()));
        assert!(!is_exact("cat-dog", &pets()));
        assert!(!is_exact("catdog", &pets()));
    }

    #[test]
    fn test_broad_variants() {
        let words = pets();
        assert!(is_broad("cat", &words));
        assert!(is_broad("catdog", &words));
        assert!(is_broad("cat-dog", &words));
        assert!(is_broad("-cat--dog-", &words));
        assert!(!is_broad("xyzzy", &words));
        assert!(!is_broad("cat-", &words));
        assert!(!is_broad("", &words));
    }

    #[test]
    fn test_concatenation_split_index() {
        assert_eq!(two_word_split("catdog", &pets()), Some(3));
        assert_eq!(two_word_split("catdogs", &pets()), None);
    }

    #[test]
    fn test_short_halves_never_match() {
        // "go" is too short to be a word and too short to be a half
        let words = Dictionary::from_words(["go", "gopher", "pher", "her"]);
        assert!(!is_broad("goher", &words));
        assert_eq!(two_word_split("gopherher", &words), Some(6));
    }

    #[test]
    fn test_hyphen_part_not_in_dictionary() {
        assert!(!is_broad("cat-bird", &pets()));
    }

    #[test]
    fn test_mode_dispatch() {
        let words = pets();
        assert!(MatchMode::Broad.matches("dogcat", &words));
        assert!(!MatchMode::Exact.matches("dogcat", &words));
    }
}
