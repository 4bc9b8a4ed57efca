//! Suffix splitting strategies

use super::SuffixSplitter;

/// Public Suffix List resolver (handles `co.uk` and friends).
///
/// Only the ICANN section of the list is used: private entries such as
/// `blogspot.com` or `github.io` resolve to their ICANN parent, so
/// `foo.blogspot.com` gives label `blogspot` and suffix `com`.
/// Bare hostnames, unknown TLDs and IP-like strings fail.
#[cfg(feature = "psl")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PslSplitter;

/// Longest ICANN suffix of `host`, skipping private-section matches
#[cfg(feature = "psl")]
fn icann_suffix(host: &str) -> Option<&str> {
    let mut candidate = host;
    loop {
        let suffix = psl::suffix(candidate.as_bytes())?;
        let len = suffix.as_bytes().len();
        match suffix.typ() {
            Some(psl::Type::Icann) => return Some(&host[host.len() - len..]),
            Some(psl::Type::Private) => {
                // Private rules sit under an ICANN rule, retry one label up
                let matched = &candidate[candidate.len() - len..];
                candidate = matched.split_once('.')?.1;
            }
            None => return None,
        }
    }
}

#[cfg(feature = "psl")]
impl SuffixSplitter for PslSplitter {
    fn split_host(&self, host: &str) -> Option<(String, String)> {
        let suffix = icann_suffix(host)?;
        let rest = host.strip_suffix(suffix)?.strip_suffix('.')?;
        let label = rest.rsplit('.').next()?;

        if label.is_empty() || suffix.is_empty() {
            return None;
        }
        Some((label.to_string(), suffix.to_string()))
    }

    fn name(&self) -> &'static str {
        "psl"
    }
}

/// Naive fallback: last part is the suffix, the one before it the label.
///
/// Wrong for multi-part suffixes (`example.co.uk` gives label `co`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LastDotSplitter;

impl SuffixSplitter for LastDotSplitter {
    fn split_host(&self, host: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        let suffix = parts[parts.len() - 1];
        let label = parts[parts.len() - 2];
        if suffix.is_empty() {
            return None;
        }
        Some((label.to_string(), suffix.to_string()))
    }

    fn name(&self) -> &'static str {
        "last-dot"
    }
}
