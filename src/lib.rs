//! Domain Sift - classify domain lists by dictionary words and brandability
//!
//! Reads candidate domains from text/CSV/zip inputs and sorts out the ones whose
//! label is an English word, a combo of words, or a pronounceable invented name.

pub mod domain;
pub mod error;
pub mod sift;
pub mod types;

// Re-export commonly used types
pub use error::{DomainSiftError, Result};
pub use types::{BrandHit, BrandSettings, FileItem, FileKind, MatchMode, SiftMode};

// Re-export main functionality
pub use domain::{default_splitter, select_splitter, SplitDomain, SuffixSplitter};
pub use sift::{collect_inputs, Dictionary, SiftOutcome, SiftResults, Sifter, Upload};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
