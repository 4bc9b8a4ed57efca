//! Input collection - turn uploaded files (or one zip) into sorted file items

use std::io::{Cursor, Read};

use crate::error::{DomainSiftError, Result};
use crate::types::{FileItem, FileKind};

/// Upper bound on the total uncompressed size of an archive
pub const MAX_ARCHIVE_BYTES: u64 = 1024 * 1024 * 1024;

/// A file as handed over by the collection layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    fn is_zip(&self) -> bool {
        self.name.to_lowercase().ends_with(".zip")
    }
}

/// Build the list of file items to scan.
///
/// A single `.zip` upload is unpacked eagerly (its `.csv`/`.txt` entries,
/// flattened to their file names). Otherwise every `.csv`/`.txt` upload is
/// used as-is. Items come back sorted by name.
pub fn collect_inputs(uploads: Vec<Upload>) -> Result<Vec<FileItem>> {
    collect_inputs_with_limit(uploads, MAX_ARCHIVE_BYTES)
}

/// [`collect_inputs`] with an explicit cap on the extracted archive size
pub fn collect_inputs_with_limit(uploads: Vec<Upload>, max_archive_bytes: u64) -> Result<Vec<FileItem>> {
    let mut items = if uploads.len() == 1 && uploads[0].is_zip() {
        extract_archive(&uploads[0], max_archive_bytes)?
    } else {
        uploads
            .into_iter()
            .filter_map(|upload| {
                let kind = FileKind::from_name(&upload.name);
                if kind.is_none() {
                    tracing::debug!(file = %upload.name, "Skipping unsupported upload");
                }
                kind.map(|kind| FileItem::new(upload.name, kind, upload.data))
            })
            .collect()
    };

    items.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(files = items.len(), "Inputs collected");
    Ok(items)
}

fn extract_archive(upload: &Upload, max_bytes: u64) -> Result<Vec<FileItem>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(upload.data.as_slice())).map_err(|e| {
        DomainSiftError::archive(format!("{}: {}", upload.name, e))
    })?;

    let too_large = || {
        DomainSiftError::archive(format!("{} expands beyond {} bytes", upload.name, max_bytes))
    };

    let mut items = Vec::new();
    let mut total_bytes = 0u64;

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().rsplit('/').next().unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }
        let Some(kind) = FileKind::from_name(&name) else {
            tracing::debug!(archive = %upload.name, entry = %name, "Skipping archive entry");
            continue;
        };

        // Count inflated bytes, not header sizes
        let remaining = max_bytes - total_bytes;
        let mut data = Vec::new();
        entry
            .take(remaining + 1)
            .read_to_end(&mut data)
            .map_err(|e| DomainSiftError::archive(format!("{} ({}): {}", upload.name, name, e)))?;

        total_bytes += data.len() as u64;
        if total_bytes > max_bytes {
            return Err(too_large());
        }

        items.push(FileItem::new(name, kind, data));
    }

    Ok(items)
}

/// Decode bytes as UTF-8, dropping invalid sequences and a leading BOM
pub fn decode_lossy(data: &[u8]) -> String {
    let text: String = data.utf8_chunks().map(|chunk| chunk.valid()).collect();
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// First-field records of a decoded file
pub fn records(text: &str, kind: FileKind) -> Box<dyn Iterator<Item = String> + '_> {
    match kind {
        FileKind::Csv => {
            let reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(text.as_bytes());
            Box::new(reader.into_records().filter_map(|row| match row {
                Ok(record) => record.get(0).map(|field| field.trim().to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable CSV row");
                    None
                }
            }))
        }
        FileKind::Text => Box::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| line.split(',').next().unwrap_or_default().trim().to_string()),
        ),
    }
}

/// Rough record count for progress display: newlines per file, at least one each
pub fn estimate_total_records(files: &[FileItem]) -> u64 {
    let total: u64 = files
        .iter()
        .map(|f| (f.data.iter().filter(|&&b| b == b'\n').count() as u64).max(1))
        .sum();
    total.max(1)
}
