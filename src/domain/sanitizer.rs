//! Raw token normalization and label cleanup

use regex::Regex;
use std::sync::OnceLock;

fn scheme_regex() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| Regex::new(r"^https?://").expect("scheme pattern is valid"))
}

fn label_junk_regex() -> &'static Regex {
    static JUNK: OnceLock<Regex> = OnceLock::new();
    JUNK.get_or_init(|| Regex::new(r"[^a-z\-]").expect("label pattern is valid"))
}

/// Normalize a raw input token into a bare host string.
///
/// Trims, lower-cases, drops double quotes, strips an `http(s)://` scheme and a
/// leading `www.`, and cuts off any path, query, fragment or port.
pub fn normalize_host(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace('"', "");
    let mut host = scheme_regex().replace(lowered.trim(), "").into_owned();

    if let Some(stripped) = host.strip_prefix("www.") {
        host = stripped.to_string();
    }

    if let Some(cut) = host.find(&['/', '?', '#', ':'][..]) {
        host.truncate(cut);
    }

    host.trim_end_matches('.').to_string()
}

/// Strip every character outside `[a-z-]` from a label.
///
/// Returns `None` when nothing survives.
pub fn clean_label(label: &str) -> Option<String> {
    let cleaned = label_junk_regex().replace_all(label, "");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}
