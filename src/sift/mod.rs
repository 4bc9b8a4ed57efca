//! Domain sifting - classify labels as words, word combos or brandables
//!
//! Files are scanned strictly in order; each run owns its dedup set and
//! result buckets, while the word list is shared read-only.

pub mod brandable;
pub mod combo;
pub mod dictionary;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod report;

pub use brandable::{pattern, score_label, BrandScore, Rejection};
pub use combo::{is_broad, is_exact};
pub use dictionary::Dictionary;
pub use input::{collect_inputs, collect_inputs_with_limit, Upload};
pub use output::{preview, OutputBuffer};
pub use pipeline::{SiftOutcome, SiftProgress, SiftResults, Sifter};
pub use report::RunReport;
