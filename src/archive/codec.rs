//! ZIP archive unpacking and packing.
//!
//! Unpacking keeps only image entries, in central-directory order, and
//! skips entries that cannot be read. Packing always uses Deflate at the
//! fixed level; entry names are preserved byte for byte.

use super::error::ArchiveError;
use crate::constants::{IMAGE_EXTENSIONS, ZIP_COMPRESSION_LEVEL};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A named file extracted from, or destined for, an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Check whether an entry name carries an accepted image extension.
///
/// Matching is case-insensitive on the extension only.
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Extract the image entries of a ZIP archive.
///
/// Directory markers and non-image entries are dropped. An entry whose
/// bytes cannot be read is logged and skipped; the rest of the archive
/// is still returned. An unparseable archive structure is an error.
pub fn unpack_images(archive_bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| ArchiveError::decode_failed(e.to_string()))?;

    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable archive entry");
                continue;
            }
        };

        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        if !is_image_name(&name) {
            continue;
        }

        let mut bytes = Vec::with_capacity(file.size() as usize);
        if let Err(e) = file.read_to_end(&mut bytes) {
            tracing::warn!(entry = %name, error = %e, "Skipping unreadable archive entry");
            continue;
        }

        entries.push(ArchiveEntry { name, bytes });
    }

    Ok(entries)
}

/// Pack entries into a ZIP archive, preserving order and names.
pub fn pack(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(ZIP_COMPRESSION_LEVEL));

    for entry in entries {
        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|e| ArchiveError::encode_failed(e.to_string()))?;
        writer
            .write_all(&entry.bytes)
            .map_err(|e| ArchiveError::encode_failed(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ArchiveError::encode_failed(e.to_string()))?;

    Ok(cursor.into_inner())
}
