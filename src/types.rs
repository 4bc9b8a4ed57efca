//! Core types and structures for domain-sift

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Boolean word-match policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Label is itself a dictionary word (no hyphens)
    Exact,
    /// Word, hyphenated word combo, or two-word concatenation
    Broad,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Broad => write!(f, "broad"),
        }
    }
}

/// What a sift run filters for
#[derive(Debug, Clone, PartialEq)]
pub enum SiftMode {
    Match(MatchMode),
    Brandables(BrandSettings),
}

impl SiftMode {
    /// Label used in output buffer names (`results_com_<label>`)
    pub fn label(&self) -> &'static str {
        match self {
            SiftMode::Match(MatchMode::Exact) => "exact",
            SiftMode::Match(MatchMode::Broad) => "broad",
            SiftMode::Brandables(_) => "brandables",
        }
    }
}

impl std::fmt::Display for SiftMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared container type of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// RFC-4180 CSV, domain in the first column
    Csv,
    /// Line-oriented text, domain before the first comma
    Text,
}

impl FileKind {
    /// Detect the kind from a file name (case-insensitive `.csv` / `.txt`)
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".csv") {
            Some(FileKind::Csv)
        } else if lower.ends_with(".txt") {
            Some(FileKind::Text)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Csv => ".csv",
            FileKind::Text => ".txt",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One input file held in memory, consumed once by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub name: String,
    pub kind: FileKind,
    pub data: Vec<u8>,
}

impl FileItem {
    pub fn new(name: impl Into<String>, kind: FileKind, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }
}

/// Heuristic thresholds for brandable scoring.
///
/// Build once per run, call [`BrandSettings::normalized`], then pass by
/// reference to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandSettings {
    /// Minimum score for a label to be admitted
    pub score_threshold: i32,
    pub min_len: usize,
    pub max_len: usize,
    /// Acceptable vowel ratio range (fractions of label length)
    pub vowel_min: f64,
    pub vowel_max: f64,
    /// Consonant run length that starts to cost points
    pub max_consonant_run: usize,
    pub min_unique_chars: usize,
    /// Reject stuttering chunks like "kakaka"
    pub reject_repeats: bool,
    /// Reject labels that are plain dictionary words
    pub reject_dictionary_words: bool,
    /// Reject q/x edges and ugly letter pairs
    pub strict_brandables: bool,
    /// Maximum count of q, x, z, j
    pub max_rare_letters: usize,
    /// Allowed full C/V patterns; empty means any
    pub allowed_run_patterns: BTreeSet<String>,
    /// Emit score and pattern columns in the output
    pub include_score: bool,
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            score_threshold: 20,
            min_len: 5,
            max_len: 10,
            vowel_min: 0.35,
            vowel_max: 0.60,
            max_consonant_run: 3,
            min_unique_chars: 4,
            reject_repeats: true,
            reject_dictionary_words: true,
            strict_brandables: true,
            max_rare_letters: 1,
            allowed_run_patterns: BTreeSet::new(),
            include_score: true,
        }
    }
}

impl BrandSettings {
    /// Clamp values into their valid ranges
    pub fn normalized(mut self) -> Self {
        if self.max_len < self.min_len {
            self.max_len = self.min_len;
        }
        self.max_consonant_run = self.max_consonant_run.max(2);
        self.max_rare_letters = self.max_rare_letters.min(2);
        if self.vowel_min > self.vowel_max {
            std::mem::swap(&mut self.vowel_min, &mut self.vowel_max);
        }
        self.allowed_run_patterns = self
            .allowed_run_patterns
            .into_iter()
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }
}

/// An admitted brandable domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandHit {
    pub domain: String,
    pub score: i32,
    pub pattern: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_detection() {
        assert_eq!(FileKind::from_name("2024-01-01.CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_name("list.txt"), Some(FileKind::Text));
        assert_eq!(FileKind::from_name("bundle.zip"), None);
        assert_eq!(FileKind::Csv.to_string(), ".csv");
    }

    #[test]
    fn test_settings_normalized() {
        let settings = BrandSettings {
            min_len: 8,
            max_len: 4,
            max_consonant_run: 1,
            max_rare_letters: 9,
            vowel_min: 0.7,
            vowel_max: 0.3,
            allowed_run_patterns: ["cvcvc".to_string(), " ".to_string()].into_iter().collect(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(settings.max_len, 8);
        assert_eq!(settings.max_consonant_run, 2);
        assert_eq!(settings.max_rare_letters, 2);
        assert!(settings.vowel_min < settings.vowel_max);
        assert_eq!(settings.allowed_run_patterns.len(), 1);
        assert!(settings.allowed_run_patterns.contains("CVCVC"));
    }

    #[test]
    fn test_settings_partial_json() {
        let settings: BrandSettings =
            serde_json::from_str(r#"{"score_threshold": 40, "strict_brandables": false}"#).unwrap();
        assert_eq!(settings.score_threshold, 40);
        assert!(!settings.strict_brandables);
        assert_eq!(settings.min_len, BrandSettings::default().min_len);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(SiftMode::Match(MatchMode::Exact).label(), "exact");
        assert_eq!(SiftMode::Match(MatchMode::Broad).to_string(), "broad");
        assert_eq!(SiftMode::Brandables(BrandSettings::default()).label(), "brandables");
    }
}
