//! Batch input and output types.

use super::error::BatchError;
use bytes::Bytes;

/// Kind of a submitted input, derived from its name or MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Jpeg,
    Png,
    Gif,
    Zip,
}

impl InputKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let ext = lower.rsplit_once('.').map(|(_, ext)| ext)?;
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }

    /// Classify by MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "application/zip" | "application/x-zip-compressed" => Some(Self::Zip),
            _ => None,
        }
    }

    pub fn is_archive(self) -> bool {
        matches!(self, Self::Zip)
    }
}

/// A single submitted file. Inputs are immutable; processing never
/// rewrites the submitted bytes.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub name: String,
    pub bytes: Bytes,
    pub kind: InputKind,
}

impl ImageInput {
    /// Build an input, classifying it by its file name.
    pub fn from_parts(name: impl Into<String>, bytes: Bytes) -> Result<Self, BatchError> {
        let name = name.into();
        let kind = InputKind::from_name(&name).ok_or_else(|| BatchError::unsupported(&name))?;
        Ok(Self { name, bytes, kind })
    }
}

/// Kind of the single file a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// One labeled JPEG
    Image,
    /// A ZIP bundle of labeled JPEGs
    Archive,
}

/// The downloadable file produced by a batch.
#[derive(Debug, Clone)]
pub struct ProcessedOutput {
    pub name: String,
    pub bytes: Bytes,
    pub kind: OutputKind,
}

/// Outcome of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub output: ProcessedOutput,
    /// Units successfully labeled.
    pub processed: usize,
    /// Archive entries skipped after a per-entry failure.
    pub skipped: usize,
}
