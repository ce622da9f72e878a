//! Batch orchestrator.
//!
//! Expands a submission into labeling units, runs them strictly in
//! order, and assembles the single downloadable output:
//!
//! - one archive input → the labeled entries repacked under the
//!   submitted archive name
//! - one image input → a single labeled JPEG
//! - anything else → every unit bundled into a fresh archive
//!
//! Before each unit the orchestrator yields to the pause gate, so a
//! paused batch holds its position and resumes with the exact next
//! unprocessed unit. Failures on entries that came out of an archive
//! are skipped with a warning; any other failure aborts the batch.

use super::error::BatchError;
use super::types::{BatchResult, ImageInput, OutputKind, ProcessedOutput};
use crate::archive::{pack, unpack_images, ArchiveEntry};
use crate::constants::BUNDLE_FILE_NAME;
use crate::watermark::{self, WatermarkError};
use crate::worker::PauseWatch;
use bytes::Bytes;
use std::collections::HashSet;

/// One image to label, with its provenance.
struct WorkUnit {
    name: String,
    bytes: Vec<u8>,
    from_archive: bool,
}

/// Shape of the batch output, fixed by the submission before any unit runs.
enum OutputMode {
    SingleImage,
    RepackedArchive(String),
    Bundle,
}

/// Run a batch to completion.
///
/// `on_progress` is called after each attempted unit with the overall
/// percentage; values are monotonically non-decreasing and the final
/// call reports exactly 100. A submission with no eligible units emits
/// no progress at all.
pub async fn run<F>(
    inputs: Vec<ImageInput>,
    pause: &mut PauseWatch,
    mut on_progress: F,
) -> Result<BatchResult, BatchError>
where
    F: FnMut(f32) + Send,
{
    if inputs.is_empty() {
        return Err(BatchError::EmptySubmission);
    }

    let mode = if inputs.len() == 1 && inputs[0].kind.is_archive() {
        OutputMode::RepackedArchive(inputs[0].name.clone())
    } else if inputs.len() == 1 {
        OutputMode::SingleImage
    } else {
        OutputMode::Bundle
    };

    let units = expand_inputs(inputs)?;
    let total = units.len();

    tracing::info!(units = total, "Starting batch");

    let mut entries: Vec<ArchiveEntry> = Vec::with_capacity(total);
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (index, unit) in units.into_iter().enumerate() {
        pause.wait_if_paused().await;

        let WorkUnit {
            name,
            bytes,
            from_archive,
        } = unit;

        // Pixel work runs off the async thread
        let task_name = name.clone();
        let result = tokio::task::spawn_blocking(move || watermark::composite(&bytes, &task_name))
            .await
            .map_err(|e| BatchError::Watermark {
                name: name.clone(),
                source: WatermarkError::render_failed(e.to_string()),
            })?;

        match result {
            Ok(jpeg) => {
                processed += 1;
                entries.push(ArchiveEntry::new(name, jpeg));
            }
            Err(e) if from_archive => {
                skipped += 1;
                tracing::warn!(entry = %name, error = %e, "Skipping failed archive entry");
            }
            Err(e) => return Err(BatchError::Watermark { name, source: e }),
        }

        on_progress((index + 1) as f32 / total as f32 * 100.0);
    }

    let output = match mode {
        OutputMode::SingleImage => match entries.pop() {
            Some(entry) => ProcessedOutput {
                name: entry.name,
                bytes: Bytes::from(entry.bytes),
                kind: OutputKind::Image,
            },
            None => return Err(BatchError::EmptySubmission),
        },
        OutputMode::RepackedArchive(name) => pack_output(name, &entries)?,
        OutputMode::Bundle => pack_output(BUNDLE_FILE_NAME.to_string(), &entries)?,
    };

    tracing::info!(
        output = %output.name,
        processed,
        skipped,
        "Batch complete"
    );

    Ok(BatchResult {
        output,
        processed,
        skipped,
    })
}

/// Expand archives into their image entries and collect loose images,
/// disambiguating duplicate names across the merged submission.
fn expand_inputs(inputs: Vec<ImageInput>) -> Result<Vec<WorkUnit>, BatchError> {
    let mut units = Vec::new();
    let mut used_names = HashSet::new();

    for input in inputs {
        if input.kind.is_archive() {
            let entries = unpack_images(&input.bytes).map_err(|e| BatchError::Archive {
                name: input.name.clone(),
                source: e,
            })?;

            for entry in entries {
                units.push(WorkUnit {
                    name: unique_name(&entry.name, &mut used_names),
                    bytes: entry.bytes,
                    from_archive: true,
                });
            }
        } else {
            units.push(WorkUnit {
                name: unique_name(&input.name, &mut used_names),
                bytes: input.bytes.to_vec(),
                from_archive: false,
            });
        }
    }

    Ok(units)
}

/// Return `name`, or `name (n)` before the extension if already taken.
fn unique_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => {
            (stem.to_string(), format!(".{}", ext))
        }
        _ => (name.to_string(), String::new()),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn pack_output(name: String, entries: &[ArchiveEntry]) -> Result<ProcessedOutput, BatchError> {
    let packed = pack(entries).map_err(|e| BatchError::Archive {
        name: name.clone(),
        source: e,
    })?;

    Ok(ProcessedOutput {
        name,
        bytes: Bytes::from(packed),
        kind: OutputKind::Archive,
    })
}
