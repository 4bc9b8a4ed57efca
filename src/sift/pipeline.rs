//! Batch pipeline - scan file items, deduplicate and bucket admitted domains

use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::brandable::score_label;
use super::dictionary::Dictionary;
use super::input::{decode_lossy, estimate_total_records, records};
use crate::domain::{SplitDomain, SuffixSplitter};
use crate::types::{BrandHit, FileItem, MatchMode, SiftMode};

/// Report progress every this many records
pub const PROGRESS_INTERVAL: u64 = 5000;

/// Progress snapshot handed to the observer. Advisory only.
#[derive(Debug, Clone)]
pub struct SiftProgress {
    /// File currently being scanned
    pub file: String,
    pub file_index: usize,
    pub file_count: usize,
    /// Records read so far across all files
    pub processed: u64,
    /// Estimated total records (newline count)
    pub estimated_total: u64,
    pub com_count: usize,
    pub others_count: usize,
    pub records_per_second: f64,
    pub estimated_remaining: Option<Duration>,
}

impl SiftProgress {
    /// Completed fraction, clamped to 1.0
    pub fn fraction(&self) -> f64 {
        (self.processed as f64 / self.estimated_total.max(1) as f64).min(1.0)
    }

    /// One-line status for progress displays
    pub fn status_line(&self) -> String {
        let eta = self
            .estimated_remaining
            .map(|d| format!(" | ETA {}s", d.as_secs()))
            .unwrap_or_default();
        format!(
            "{} ({}/{}) | .com {} | others {} | {:.0} rec/s{}",
            self.file,
            self.file_index + 1,
            self.file_count,
            self.com_count,
            self.others_count,
            self.records_per_second,
            eta
        )
    }
}

/// Admitted domains, split into `.com` and everything else
#[derive(Debug, Clone, PartialEq)]
pub enum SiftResults {
    /// Exact/broad: first-seen order
    Matched {
        mode: MatchMode,
        com: Vec<String>,
        others: Vec<String>,
    },
    /// Brandables: score descending, ties keep discovery order
    Brandables {
        com: Vec<BrandHit>,
        others: Vec<BrandHit>,
    },
}

impl SiftResults {
    fn empty(mode: &SiftMode) -> Self {
        match mode {
            SiftMode::Match(mode) => SiftResults::Matched {
                mode: *mode,
                com: Vec::new(),
                others: Vec::new(),
            },
            SiftMode::Brandables(_) => SiftResults::Brandables {
                com: Vec::new(),
                others: Vec::new(),
            },
        }
    }

    pub fn com_count(&self) -> usize {
        match self {
            SiftResults::Matched { com, .. } => com.len(),
            SiftResults::Brandables { com, .. } => com.len(),
        }
    }

    pub fn others_count(&self) -> usize {
        match self {
            SiftResults::Matched { others, .. } => others.len(),
            SiftResults::Brandables { others, .. } => others.len(),
        }
    }

    /// Domain names of the `.com` bucket, in output order
    pub fn com_domains(&self) -> Vec<&str> {
        match self {
            SiftResults::Matched { com, .. } => com.iter().map(String::as_str).collect(),
            SiftResults::Brandables { com, .. } => com.iter().map(|h| h.domain.as_str()).collect(),
        }
    }

    /// Domain names of the other bucket, in output order
    pub fn others_domains(&self) -> Vec<&str> {
        match self {
            SiftResults::Matched { others, .. } => others.iter().map(String::as_str).collect(),
            SiftResults::Brandables { others, .. } => {
                others.iter().map(|h| h.domain.as_str()).collect()
            }
        }
    }

    fn push_match(&mut self, split: &SplitDomain, full_domain: String) {
        if let SiftResults::Matched { com, others, .. } = self {
            if split.is_com() {
                com.push(full_domain);
            } else {
                others.push(full_domain);
            }
        }
    }

    fn push_brand(&mut self, split: &SplitDomain, hit: BrandHit) {
        if let SiftResults::Brandables { com, others } = self {
            if split.is_com() {
                com.push(hit);
            } else {
                others.push(hit);
            }
        }
    }

    fn finalize(&mut self) {
        if let SiftResults::Brandables { com, others } = self {
            // sort_by is stable: equal scores keep discovery order
            com.sort_by(|a, b| b.score.cmp(&a.score));
            others.sort_by(|a, b| b.score.cmp(&a.score));
        }
    }
}

/// Outcome of one run
#[derive(Debug, Clone, PartialEq)]
pub struct SiftOutcome {
    pub results: SiftResults,
    pub processed_records: u64,
    pub processed_files: usize,
}

/// Sequential domain sifter.
///
/// Holds the shared, read-only word list and splitter; every call to
/// [`Sifter::run`] owns its own `seen` set and buckets.
pub struct Sifter<'a> {
    words: &'a Dictionary,
    splitter: &'a dyn SuffixSplitter,
    mode: SiftMode,
}

impl<'a> Sifter<'a> {
    pub fn new(words: &'a Dictionary, splitter: &'a dyn SuffixSplitter, mode: SiftMode) -> Self {
        Self {
            words,
            splitter,
            mode,
        }
    }

    pub fn mode(&self) -> &SiftMode {
        &self.mode
    }

    /// Run without progress reporting
    pub fn run_quiet(&self, files: &[FileItem]) -> SiftOutcome {
        self.run(files, |_| {})
    }

    /// Scan `files` in order, calling `on_progress` as each file starts,
    /// every [`PROGRESS_INTERVAL`] records and once at the end
    pub fn run<F>(&self, files: &[FileItem], mut on_progress: F) -> SiftOutcome
    where
        F: FnMut(&SiftProgress),
    {
        let start_time = Instant::now();
        let estimated_total = estimate_total_records(files);
        let mut seen: HashSet<String> = HashSet::new();
        let mut results = SiftResults::empty(&self.mode);
        let mut processed = 0u64;

        tracing::info!(
            mode = %self.mode,
            splitter = self.splitter.name(),
            files = files.len(),
            estimated_records = estimated_total,
            "Sift started"
        );

        for (file_index, file) in files.iter().enumerate() {
            let report = |processed: u64, results: &SiftResults| {
                build_progress(
                    file,
                    file_index,
                    files.len(),
                    processed,
                    estimated_total,
                    results,
                    start_time.elapsed(),
                )
            };

            on_progress(&report(processed, &results));
            tracing::debug!(file = %file.name, kind = %file.kind, "Scanning file");

            let text = decode_lossy(&file.data);
            for raw in records(&text, file.kind) {
                processed += 1;
                if processed % PROGRESS_INTERVAL == 0 {
                    on_progress(&report(processed, &results));
                }

                self.consider(&raw, &mut seen, &mut results);
            }
        }

        results.finalize();

        if let Some(last) = files.last() {
            let mut done = build_progress(
                last,
                files.len() - 1,
                files.len(),
                processed,
                estimated_total,
                &results,
                start_time.elapsed(),
            );
            done.estimated_total = done.estimated_total.max(processed);
            done.estimated_remaining = Some(Duration::ZERO);
            on_progress(&done);
        }

        tracing::info!(
            records = processed,
            files = files.len(),
            com = results.com_count(),
            others = results.others_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Sift finished"
        );

        SiftOutcome {
            results,
            processed_records: processed,
            processed_files: files.len(),
        }
    }

    /// Split, deduplicate and test one raw record; skips are silent
    fn consider(&self, raw: &str, seen: &mut HashSet<String>, results: &mut SiftResults) {
        let Some(split) = self.splitter.split(raw) else {
            return;
        };

        let full_domain = split.full_domain();
        if seen.contains(&full_domain) {
            return;
        }

        match &self.mode {
            SiftMode::Match(mode) => {
                if mode.matches(&split.label, self.words) {
                    seen.insert(full_domain.clone());
                    results.push_match(&split, full_domain);
                }
            }
            SiftMode::Brandables(settings) => {
                let scored = score_label(&split.label, settings, self.words);
                if scored.passes(settings.score_threshold) {
                    seen.insert(full_domain.clone());
                    results.push_brand(
                        &split,
                        BrandHit {
                            domain: full_domain,
                            score: scored.score,
                            pattern: scored.pattern,
                        },
                    );
                }
            }
        }
    }
}

fn build_progress(
    file: &FileItem,
    file_index: usize,
    file_count: usize,
    processed: u64,
    estimated_total: u64,
    results: &SiftResults,
    elapsed: Duration,
) -> SiftProgress {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        processed as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    let remaining = estimated_total.saturating_sub(processed);
    let estimated_remaining = if rate > 0.0 {
        Some(Duration::from_secs_f64(remaining as f64 / rate))
    } else {
        None
    };

    SiftProgress {
        file: file.name.clone(),
        file_index,
        file_count,
        processed,
        estimated_total,
        com_count: results.com_count(),
        others_count: results.others_count(),
        records_per_second: rate,
        estimated_remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{select_splitter, LastDotSplitter};
    use crate::types::{BrandSettings, FileKind};

    fn text_file(name: &str, body: &str) -> FileItem {
        FileItem::new(name, FileKind::Text, body.as_bytes().to_vec())
    }

    #[test]
    fn test_exact_first_seen_order_and_dedup() {
        let words = Dictionary::from_words(["sun", "flower", "sunflower"]);
        let splitter = LastDotSplitter;
        let sifter = Sifter::new(&words, &splitter, SiftMode::Match(MatchMode::Exact));

        let files = vec![text_file(
            "a.txt",
            "sunflower.com\nsunflower.com\nrandom123.net\nSUN.COM\n",
        )];
        let outcome = sifter.run_quiet(&files);

        assert_eq!(outcome.results.com_domains(), vec!["sunflower.com", "sun.com"]);
        assert!(outcome.results.others_domains().is_empty());
        assert_eq!(outcome.processed_records, 4);
        assert_eq!(outcome.processed_files, 1);
    }

    #[test]
    fn test_dedup_across_files_and_buckets() {
        let words = Dictionary::from_words(["cat", "dog"]);
        let splitter = LastDotSplitter;
        let sifter = Sifter::new(&words, &splitter, SiftMode::Match(MatchMode::Broad));

        let files = vec![
            text_file("1.txt", "catdog.com\ncat.io\n"),
            FileItem::new("2.csv", FileKind::Csv, b"catdog.com,1\ncat-dog.io,2\n".to_vec()),
        ];
        let outcome = sifter.run_quiet(&files);

        assert_eq!(outcome.results.com_domains(), vec!["catdog.com"]);
        assert_eq!(outcome.results.others_domains(), vec!["cat.io", "cat-dog.io"]);
        assert_eq!(outcome.processed_records, 4);
    }

    #[test]
    fn test_brandables_sorted_by_score_desc() {
        let words = Dictionary::default();
        let splitter = LastDotSplitter;
        let settings = BrandSettings {
            score_threshold: 0,
            ..Default::default()
        }
        .normalized();
        let sifter = Sifter::new(&words, &splitter, SiftMode::Brandables(settings));

        // strando = 10, nanovian = 37, lumora = 43
        let files = vec![text_file(
            "b.txt",
            "strando.com\nnanovian.com\nlumora.com\nx.com\nstrando.net\n",
        )];
        let outcome = sifter.run_quiet(&files);

        match &outcome.results {
            SiftResults::Brandables { com, others } => {
                let scores: Vec<i32> = com.iter().map(|h| h.score).collect();
                assert_eq!(scores, vec![43, 37, 10]);
                assert_eq!(com[0].domain, "lumora.com");
                assert_eq!(com[0].pattern, "CVCVCV");
                assert_eq!(others.len(), 1);
            }
            other => panic!("unexpected results: {:?}", other),
        }
    }

    #[test]
    fn test_brandables_stable_ties() {
        let words = Dictionary::default();
        let splitter = LastDotSplitter;
        let settings = BrandSettings {
            score_threshold: 0,
            ..Default::default()
        };
        let sifter = Sifter::new(&words, &splitter, SiftMode::Brandables(settings));

        let files = vec![text_file("c.txt", "lumora.com\nbekoti.com\nsavine.com\n")];
        let outcome = sifter.run_quiet(&files);
        assert_eq!(
            outcome.results.com_domains(),
            vec!["lumora.com", "bekoti.com", "savine.com"]
        );
    }

    #[test]
    fn test_progress_does_not_change_results() {
        let words = Dictionary::from_words(["cat", "dog"]);
        let splitter = select_splitter(true);
        let sifter = Sifter::new(&words, splitter.as_ref(), SiftMode::Match(MatchMode::Broad));

        let body: String = (0..12_000)
            .map(|i| if i % 2 == 0 { "catdog.com\n".to_string() } else { format!("x{}.net\n", i) })
            .collect();
        let files = vec![text_file("big.txt", &body)];

        let mut calls = Vec::new();
        let observed = sifter.run(&files, |p| calls.push(p.processed));
        let quiet = sifter.run_quiet(&files);

        assert_eq!(observed, quiet);
        // file start, 5000, 10000, final
        assert_eq!(calls, vec![0, 5000, 10_000, 12_000]);
    }

    #[test]
    fn test_progress_status_line() {
        let progress = SiftProgress {
            file: "2024-01.txt".to_string(),
            file_index: 0,
            file_count: 2,
            processed: 5000,
            estimated_total: 10_000,
            com_count: 12,
            others_count: 3,
            records_per_second: 2500.0,
            estimated_remaining: Some(Duration::from_secs(2)),
        };
        assert_eq!(progress.fraction(), 0.5);
        assert_eq!(
            progress.status_line(),
            "2024-01.txt (1/2) | .com 12 | others 3 | 2500 rec/s | ETA 2s"
        );

        let progress = SiftProgress {
            estimated_remaining: None,
            ..progress
        };
        assert!(!progress.status_line().contains("ETA"));
    }

    #[test]
    fn test_final_progress_counts_buckets() {
        let words = Dictionary::from_words(["cat"]);
        let splitter = LastDotSplitter;
        let sifter = Sifter::new(&words, &splitter, SiftMode::Match(MatchMode::Exact));
        let files = vec![text_file("a.txt", "cat.com\ncat.net\ndog.com\n")];

        let mut last = None;
        sifter.run(&files, |p| last = Some(p.clone()));
        let last = last.unwrap();
        assert_eq!((last.com_count, last.others_count), (1, 1));
        assert_eq!(last.estimated_remaining, Some(Duration::ZERO));
    }

    #[test]
    fn test_empty_input() {
        let words = Dictionary::default();
        let splitter = LastDotSplitter;
        let sifter = Sifter::new(&words, &splitter, SiftMode::Match(MatchMode::Exact));

        let mut calls = 0;
        let outcome = sifter.run(&[], |_| calls += 1);
        assert_eq!(outcome.processed_records, 0);
        assert_eq!(outcome.results.com_count(), 0);
        assert_eq!(calls, 0);
    }
}
