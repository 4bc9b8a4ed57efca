//! Domain parsing: public-suffix-aware splitting and label cleanup

pub mod sanitizer;
pub mod splitter;

pub use sanitizer::{clean_label, normalize_host};
pub use splitter::LastDotSplitter;
#[cfg(feature = "psl")]
pub use splitter::PslSplitter;

/// A raw token resolved into its cleaned label and public suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitDomain {
    pub label: String,
    pub suffix: String,
}

impl SplitDomain {
    /// `label.suffix`, the key used for deduplication and output
    pub fn full_domain(&self) -> String {
        format!("{}.{}", self.label, self.suffix)
    }

    pub fn is_com(&self) -> bool {
        self.suffix == "com"
    }
}

/// Strategy for separating a host into label and public suffix
pub trait SuffixSplitter: Send + Sync {
    /// Split an already-normalized host into (raw label, suffix)
    fn split_host(&self, host: &str) -> Option<(String, String)>;

    /// Strategy name, for logs and reports
    fn name(&self) -> &'static str;

    /// Resolve a raw input token.
    ///
    /// Fails when no suffix is found or the label is empty after cleanup.
    fn split(&self, raw: &str) -> Option<SplitDomain> {
        let host = normalize_host(raw);
        if host.is_empty() {
            return None;
        }

        let (label, suffix) = self.split_host(&host)?;
        let label = clean_label(&label)?;
        if suffix.is_empty() {
            return None;
        }

        Some(SplitDomain { label, suffix })
    }
}

/// Pick the most accurate strategy compiled into this build
#[cfg(feature = "psl")]
pub fn default_splitter() -> Box<dyn SuffixSplitter> {
    Box::new(PslSplitter)
}

/// Pick the most accurate strategy compiled into this build
#[cfg(not(feature = "psl"))]
pub fn default_splitter() -> Box<dyn SuffixSplitter> {
    Box::new(LastDotSplitter)
}

/// Select a strategy once per run; `naive` forces the last-dot fallback
pub fn select_splitter(naive: bool) -> Box<dyn SuffixSplitter> {
    let splitter = if naive {
        Box::new(LastDotSplitter) as Box<dyn SuffixSplitter>
    } else {
        default_splitter()
    };
    tracing::debug!(splitter = splitter.name(), "Suffix splitter selected");
    splitter
}
