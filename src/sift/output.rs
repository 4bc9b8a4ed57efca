//! Result formatting - flat text buffers for download or disk

use super::pipeline::SiftResults;
use crate::types::BrandHit;

/// A named output blob (`results_com_exact`, `results_others_brandables`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    pub name: String,
    pub data: Vec<u8>,
}

impl OutputBuffer {
    /// File name used when writing to disk
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name)
    }
}

/// One domain per line
pub fn render_domains(domains: &[String]) -> Vec<u8> {
    domains.join("\n").into_bytes()
}

/// `domain\tscore\tpattern` per line, or bare domains
pub fn render_brandables(hits: &[BrandHit], include_score: bool) -> Vec<u8> {
    let lines: Vec<String> = hits
        .iter()
        .map(|hit| {
            if include_score {
                format!("{}\t{}\t{}", hit.domain, hit.score, hit.pattern)
            } else {
                hit.domain.clone()
            }
        })
        .collect();
    lines.join("\n").into_bytes()
}

/// First `limit` entries, newline-joined
pub fn preview(domains: &[&str], limit: usize) -> String {
    domains
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

impl SiftResults {
    /// The `.com` and "others" buffers, in that order.
    ///
    /// `include_score` only affects brandables output.
    pub fn buffers(&self, include_score: bool) -> [OutputBuffer; 2] {
        match self {
            SiftResults::Matched { mode, com, others } => [
                OutputBuffer {
                    name: format!("results_com_{}", mode),
                    data: render_domains(com),
                },
                OutputBuffer {
                    name: format!("results_others_{}", mode),
                    data: render_domains(others),
                },
            ],
            SiftResults::Brandables { com, others } => [
                OutputBuffer {
                    name: "results_com_brandables".to_string(),
                    data: render_brandables(com, include_score),
                },
                OutputBuffer {
                    name: "results_others_brandables".to_string(),
                    data: render_brandables(others, include_score),
                },
            ],
        }
    }
}
