//! Brandable name scoring - phonetic heuristics for invented, pronounceable labels
//!
//! A label first runs through a list of hard rejections (score -999). Labels that
//! survive get a consonant/vowel pattern and an additive score built from length,
//! rare letters, vowel balance, consonant clusters and alternation.

use std::collections::HashSet;

use super::dictionary::Dictionary;
use crate::types::BrandSettings;

/// Letters treated as vowels (y included, it usually sounds like one in names)
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Letters that make a name harder to spell and say
const RARE_LETTERS: &[char] = &['q', 'x', 'z', 'j'];

/// Adjacent letters that are hard to pronounce
const UGLY_BIGRAMS: &[&str] = &[
    "jq", "jx", "jz", "qj", "qx", "qz", "vq",
    "vx", "wq", "wx", "xj", "xq", "zj", "zx",
];

/// Known-good shapes, lengths 4 to 8
const RECIPE_PATTERNS: &[&str] = &[
    // 4 letters
    "CVCV", "CVVC", "CCVC", "VCVC",
    // 5 letters
    "CVCVC", "CVCCV", "CCVCV", "VCVCV", "CVVCV",
    // 6 letters
    "CVCVCV", "CVCCVC", "CCVCVC", "CVCVVC", "CVVCVC",
    // 7 letters
    "CVCVCVC", "CVCCVCV", "CCVCVCV", "CVCVCCV", "VCVCCVC",
    // 8 letters
    "CVCCVCVC", "CVCVCCVC", "CCVCVCVC", "CVCCVCCV", "VCCVCVCV",
];

/// Score given to labels that fail a hard rule
pub const HARD_REJECT_SCORE: i32 = -999;

/// Score given to labels outside the allowed pattern set
pub const PATTERN_MISS_SCORE: i32 = -50;

/// Extra slack around the configured vowel range that still earns partial credit
const VOWEL_TOLERANCE: f64 = 0.08;

/// Why a label was disqualified outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAlphabetic,
    Length,
    Hyphen,
    DictionaryWord,
    RareLetters,
    Strict,
    TripleLetter,
    RepeatedChunk,
    LowVariety,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::NotAlphabetic => "not alphabetic",
            Rejection::Length => "length out of range",
            Rejection::Hyphen => "contains hyphen",
            Rejection::DictionaryWord => "dictionary word",
            Rejection::RareLetters => "too many rare letters",
            Rejection::Strict => "strict letter rules",
            Rejection::TripleLetter => "letter repeated three times",
            Rejection::RepeatedChunk => "repeated chunk",
            Rejection::LowVariety => "too few distinct letters",
        };
        f.write_str(reason)
    }
}

/// Score and full C/V pattern of a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandScore {
    pub score: i32,
    /// Empty for hard rejections
    pub pattern: String,
}

impl BrandScore {
    fn rejected() -> Self {
        Self {
            score: HARD_REJECT_SCORE,
            pattern: String::new(),
        }
    }

    pub fn is_hard_reject(&self) -> bool {
        self.score == HARD_REJECT_SCORE
    }

    pub fn passes(&self, threshold: i32) -> bool {
        self.score >= threshold
    }
}

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}

/// Map every character to `V` (vowel) or `C` (anything else), no compression
pub fn pattern(label: &str) -> String {
    label
        .chars()
        .map(|ch| if is_vowel(ch) { 'V' } else { 'C' })
        .collect()
}

fn rare_letter_count(label: &str) -> usize {
    label.chars().filter(|ch| RARE_LETTERS.contains(ch)).count()
}

fn violates_strict(label: &str) -> bool {
    let edge_letter = |ch: Option<char>| matches!(ch, Some('q') | Some('x'));
    if edge_letter(label.chars().next()) || edge_letter(label.chars().last()) {
        return true;
    }
    UGLY_BIGRAMS.iter().any(|bigram| label.contains(bigram))
}

fn has_triple_letter(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// A 2 or 3 letter chunk repeated back to back at least three times ("kakaka")
fn has_repeated_chunk(chars: &[char]) -> bool {
    (2..=3).any(|size| {
        chars.len() >= size * 3
            && (0..=chars.len() - size * 3).any(|start| {
                let chunk = &chars[start..start + size];
                chunk == &chars[start + size..start + size * 2]
                    && chunk == &chars[start + size * 2..start + size * 3]
            })
    })
}

fn longest_consonant_run(label: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in label.chars() {
        if is_vowel(ch) {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

fn is_monotonic_alternation(full_pattern: &str) -> bool {
    full_pattern.contains("CVCVCVCV") || full_pattern.contains("VCVCVCVC")
}

/// First hard rule the label breaks, checked in a fixed order
pub fn rejection(label: &str, settings: &BrandSettings, words: &Dictionary) -> Option<Rejection> {
    if label.is_empty() || !label.chars().all(|ch| ch.is_ascii_lowercase()) {
        return Some(Rejection::NotAlphabetic);
    }

    let chars: Vec<char> = label.chars().collect();
    if chars.len() < settings.min_len || chars.len() > settings.max_len {
        return Some(Rejection::Length);
    }

    if label.contains('-') {
        return Some(Rejection::Hyphen);
    }

    if settings.reject_dictionary_words && words.contains(label) {
        return Some(Rejection::DictionaryWord);
    }

    if rare_letter_count(label) > settings.max_rare_letters {
        return Some(Rejection::RareLetters);
    }

    if settings.strict_brandables && violates_strict(label) {
        return Some(Rejection::Strict);
    }

    if has_triple_letter(&chars) {
        return Some(Rejection::TripleLetter);
    }

    if settings.reject_repeats && has_repeated_chunk(&chars) {
        return Some(Rejection::RepeatedChunk);
    }

    let unique: HashSet<char> = chars.iter().copied().collect();
    if unique.len() < settings.min_unique_chars {
        return Some(Rejection::LowVariety);
    }

    None
}

/// Score a cleaned, lower-case label.
///
/// Pure and deterministic for a given label, settings and word list.
pub fn score_label(label: &str, settings: &BrandSettings, words: &Dictionary) -> BrandScore {
    if let Some(reason) = rejection(label, settings, words) {
        tracing::trace!(label, %reason, "Brandable rejected");
        return BrandScore::rejected();
    }

    let full_pattern = pattern(label);
    if !settings.allowed_run_patterns.is_empty()
        && !settings.allowed_run_patterns.contains(&full_pattern)
    {
        return BrandScore {
            score: PATTERN_MISS_SCORE,
            pattern: full_pattern,
        };
    }

    let len = label.chars().count();
    let mut score = 0i32;

    score += match len {
        5..=9 => 12,
        4..=11 => 6,
        _ => -8,
    };

    score -= 10 * rare_letter_count(label) as i32;

    let vowels = label.chars().filter(|&ch| is_vowel(ch)).count();
    let ratio = vowels as f64 / len as f64;
    score += if ratio >= settings.vowel_min && ratio <= settings.vowel_max {
        25
    } else if ratio >= settings.vowel_min - VOWEL_TOLERANCE
        && ratio <= settings.vowel_max + VOWEL_TOLERANCE
    {
        10
    } else {
        -18
    };

    let run = longest_consonant_run(label);
    if run > settings.max_consonant_run {
        score -= 30;
    } else if run == settings.max_consonant_run {
        score -= 12;
    }

    if is_monotonic_alternation(&full_pattern) {
        score -= 18;
    }

    if RECIPE_PATTERNS.contains(&full_pattern.as_str()) {
        score += 6;
    }

    BrandScore {
        score,
        pattern: full_pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_words() -> Dictionary {
        Dictionary::default()
    }

    fn settings() -> BrandSettings {
        BrandSettings::default().normalized()
    }

    #[test]
    fn test_pattern() {
        assert_eq!(pattern("nanovian"), "CVCVCVVC");
        assert_eq!(pattern("sky"), "CCV");
        assert_eq!(pattern(""), "");
    }

    #[test]
    fn test_recipe_table_shape() {
        assert_eq!(RECIPE_PATTERNS.len(), 24);
        assert_eq!(UGLY_BIGRAMS.len(), 14);
        assert!(RECIPE_PATTERNS.iter().all(|p| (4..=8).contains(&p.len())));
    }

    #[test]
    fn test_full_score_breakdown() {
        // length +12, vowels 3/6 +25, no clusters, recipe CVCVCV +6
        let result = score_label("lumora", &settings(), &no_words());
        assert_eq!(result.pattern, "CVCVCV");
        assert_eq!(result.score, 43);

        // length +12, vowels 4/8 +25, CVCVCVVC is not a recipe
        let result = score_label("nanovian", &settings(), &no_words());
        assert_eq!(result.score, 37);
    }

    #[test]
    fn test_cluster_and_vowel_tolerance() {
        // length +12, vowels 2/7 inside tolerance +10, run of 3 hits the limit -12
        let result = score_label("strando", &settings(), &no_words());
        assert_eq!(result.pattern, "CCCVCCV");
        assert_eq!(result.score, 10);

        let tight = BrandSettings {
            max_consonant_run: 2,
            ..settings()
        };
        // run of 3 now exceeds the limit: -30
        assert_eq!(score_label("strando", &tight, &no_words()).score, -8);
    }

    #[test]
    fn test_alternation_penalty() {
        let loose = BrandSettings {
            reject_repeats: false,
            min_unique_chars: 0,
            ..settings()
        };
        // length +12, vowels +25, CVCVCVCV alternation -18
        let result = score_label("kakakaka", &loose, &no_words());
        assert_eq!(result.score, 19);

        assert!(score_label("kakakaka", &settings(), &no_words()).is_hard_reject());
    }

    #[test]
    fn test_hyphen_always_hard_reject() {
        let permissive = BrandSettings {
            min_len: 1,
            max_len: 64,
            reject_repeats: false,
            reject_dictionary_words: false,
            strict_brandables: false,
            max_rare_letters: 2,
            min_unique_chars: 0,
            ..Default::default()
        };
        let result = score_label("lum-ora", &permissive, &no_words());
        assert_eq!(result.score, HARD_REJECT_SCORE);
        assert!(result.pattern.is_empty());
    }

    #[test]
    fn test_length_boundaries() {
        let s = settings();
        assert!(!score_label("lumor", &s, &no_words()).is_hard_reject());
        assert!(score_label("lumo", &s, &no_words()).is_hard_reject());
        assert!(!score_label("lumoralina", &s, &no_words()).is_hard_reject());
        assert!(score_label("lumoralinas", &s, &no_words()).is_hard_reject());
    }

    #[test]
    fn test_rejection_order() {
        let s = settings();
        let words = Dictionary::from_words(["lumora"]);
        assert_eq!(rejection("lum0ra", &s, &words), Some(Rejection::NotAlphabetic));
        assert_eq!(rejection("lumora", &s, &words), Some(Rejection::DictionaryWord));
        assert_eq!(rejection("jazzo", &s, &words), Some(Rejection::RareLetters));
        assert_eq!(rejection("qelano", &s, &words), Some(Rejection::Strict));
        assert_eq!(rejection("davxon", &s, &words), Some(Rejection::Strict));
        assert_eq!(rejection("beeeno", &s, &words), Some(Rejection::TripleLetter));
        assert_eq!(rejection("tobtobtob", &s, &words), Some(Rejection::RepeatedChunk));
        assert_eq!(rejection("nonono", &s, &words), Some(Rejection::RepeatedChunk));
        assert_eq!(rejection("anana", &s, &words), Some(Rejection::LowVariety));
        assert_eq!(rejection("lumora", &s, &no_words()), None);
    }

    #[test]
    fn test_flags_disable_rules() {
        let relaxed = BrandSettings {
            strict_brandables: false,
            reject_dictionary_words: false,
            ..settings()
        };
        let words = Dictionary::from_words(["lumora"]);
        assert_eq!(rejection("qelano", &relaxed, &words), None);
        assert_eq!(rejection("lumora", &relaxed, &words), None);
    }

    #[test]
    fn test_allowed_patterns_soft_reject() {
        let only_cvcvc = BrandSettings {
            allowed_run_patterns: ["CVCVC".to_string()].into_iter().collect(),
            ..settings()
        };
        let result = score_label("lumora", &only_cvcvc, &no_words());
        assert_eq!(result.score, PATTERN_MISS_SCORE);
        assert_eq!(result.pattern, "CVCVCV");
        assert!(!result.is_hard_reject());

        let result = score_label("lumor", &only_cvcvc, &no_words());
        assert_eq!(result.pattern, "CVCVC");
        assert!(result.score > PATTERN_MISS_SCORE);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let s = settings();
        assert_eq!(
            score_label("velora", &s, &no_words()),
            score_label("velora", &s, &no_words())
        );
    }
}
