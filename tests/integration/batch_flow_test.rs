// Batch orchestrator flows: classification, filtering, failure policy,
// progress reporting, and the pause gate.

use bytes::Bytes;
use image::{DynamicImage, Rgba, RgbaImage};
use nameplate::archive::{pack, unpack_images, ArchiveEntry};
use nameplate::batch::{self, BatchError, ImageInput, OutputKind};
use nameplate::worker::pause_pair;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([180, 40, 40, 255]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

fn image_input(name: &str) -> ImageInput {
    ImageInput::from_parts(name, Bytes::from(create_test_jpeg(64, 48))).unwrap()
}

fn progress_recorder() -> (Arc<Mutex<Vec<f32>>>, impl FnMut(f32) + Send) {
    let record = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&record);
    (record, move |p: f32| sink.lock().unwrap().push(p))
}

fn assert_non_decreasing_to_100(values: &[f32]) {
    assert!(!values.is_empty());
    for pair in values.windows(2) {
        assert!(pair[0] <= pair[1], "progress regressed: {:?}", values);
    }
    assert_eq!(*values.last().unwrap(), 100.0);
}

// Test: Single image input yields a single labeled JPEG of the same extent
#[tokio::test]
async fn single_image_yields_single_jpeg() {
    let (_gate, mut watch) = pause_pair();
    let (progress, on_progress) = progress_recorder();

    let result = batch::run(vec![image_input("photo.jpg")], &mut watch, on_progress)
        .await
        .unwrap();

    assert_eq!(result.output.kind, OutputKind::Image);
    assert_eq!(result.output.name, "photo.jpg");
    assert_eq!(result.processed, 1);
    assert_eq!(&result.output.bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&result.output.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));

    // A single unit jumps straight to 100
    assert_eq!(*progress.lock().unwrap(), vec![100.0]);
}

// Test: Multiple loose images are bundled into a fresh archive
#[tokio::test]
async fn loose_images_bundle_into_fresh_archive() {
    let (_gate, mut watch) = pause_pair();
    let (progress, on_progress) = progress_recorder();

    let inputs = vec![image_input("a.jpg"), image_input("b.png")];
    let result = batch::run(inputs, &mut watch, on_progress).await.unwrap();

    assert_eq!(result.output.kind, OutputKind::Archive);
    assert_eq!(result.output.name, "processed_images.zip");

    let entries = unpack_images(&result.output.bytes).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.jpg", "b.png"]);
    for entry in &entries {
        assert_eq!(&entry.bytes[..2], &[0xFF, 0xD8]);
    }

    assert_eq!(*progress.lock().unwrap(), vec![50.0, 100.0]);
}

// Test: A single archive is repacked under its submitted name, with
// non-image entries gone
#[tokio::test]
async fn archive_repacked_and_filtered() {
    let packed = pack(&[
        ArchiveEntry::new("one.jpg", create_test_jpeg(32, 32)),
        ArchiveEntry::new("notes.txt", b"not an image".to_vec()),
        ArchiveEntry::new("two.jpg", create_test_jpeg(32, 32)),
        ArchiveEntry::new("three.jpg", create_test_jpeg(32, 32)),
    ])
    .unwrap();

    let input = ImageInput::from_parts("shoot.zip", Bytes::from(packed)).unwrap();

    let (_gate, mut watch) = pause_pair();
    let (progress, on_progress) = progress_recorder();
    let result = batch::run(vec![input], &mut watch, on_progress)
        .await
        .unwrap();

    assert_eq!(result.output.kind, OutputKind::Archive);
    assert_eq!(result.output.name, "shoot.zip");
    assert_eq!(result.processed, 3);

    let entries = unpack_images(&result.output.bytes).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["one.jpg", "two.jpg", "three.jpg"]);

    assert_non_decreasing_to_100(&progress.lock().unwrap());
}

// Test: A corrupt entry inside an archive is skipped, the rest survive
#[tokio::test]
async fn corrupt_archive_entry_is_skipped() {
    let packed = pack(&[
        ArchiveEntry::new("good1.jpg", create_test_jpeg(32, 32)),
        ArchiveEntry::new("corrupt.jpg", vec![0, 1, 2, 3]),
        ArchiveEntry::new("good2.jpg", create_test_jpeg(32, 32)),
    ])
    .unwrap();

    let input = ImageInput::from_parts("mixed.zip", Bytes::from(packed)).unwrap();

    let (_gate, mut watch) = pause_pair();
    let (progress, on_progress) = progress_recorder();
    let result = batch::run(vec![input], &mut watch, on_progress)
        .await
        .unwrap();

    assert_eq!(result.processed, 2);
    assert_eq!(result.skipped, 1);

    let entries = unpack_images(&result.output.bytes).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["good1.jpg", "good2.jpg"]);

    // Skipped entries still count toward progress, which ends at 100
    assert_non_decreasing_to_100(&progress.lock().unwrap());
}

// Test: A corrupt loose image aborts the whole batch
#[tokio::test]
async fn corrupt_loose_image_aborts() {
    let good = image_input("good.jpg");
    let bad = ImageInput::from_parts("bad.jpg", Bytes::from_static(&[9, 9, 9])).unwrap();

    let (_gate, mut watch) = pause_pair();
    let err = batch::run(vec![good, bad], &mut watch, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, BatchError::Watermark { ref name, .. } if name == "bad.jpg"));
}

// Test: Unreadable archive bytes abort the whole batch
#[tokio::test]
async fn unreadable_archive_aborts() {
    let input = ImageInput::from_parts("broken.zip", Bytes::from_static(&[1, 2, 3])).unwrap();

    let (_gate, mut watch) = pause_pair();
    let err = batch::run(vec![input], &mut watch, |_| {}).await.unwrap_err();

    assert!(matches!(err, BatchError::Archive { ref name, .. } if name == "broken.zip"));
    assert_eq!(err.to_http_status(), 400);
}

// Test: Duplicate names across merged inputs get numeric suffixes
#[tokio::test]
async fn duplicate_names_are_disambiguated() {
    let inputs = vec![image_input("a.jpg"), image_input("a.jpg")];

    let (_gate, mut watch) = pause_pair();
    let result = batch::run(inputs, &mut watch, |_| {}).await.unwrap();

    let entries = unpack_images(&result.output.bytes).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.jpg", "a (1).jpg"]);
}

// Test: Empty submission is a terminal error
#[tokio::test]
async fn empty_submission_is_rejected() {
    let (_gate, mut watch) = pause_pair();
    let err = batch::run(vec![], &mut watch, |_| {}).await.unwrap_err();
    assert!(matches!(err, BatchError::EmptySubmission));
}

// Test: Archive with no eligible entries completes with an empty bundle
// and no progress events
#[tokio::test]
async fn archive_without_images_yields_empty_output() {
    let packed = pack(&[ArchiveEntry::new("readme.txt", b"hello".to_vec())]).unwrap();
    let input = ImageInput::from_parts("docs.zip", Bytes::from(packed)).unwrap();

    let (_gate, mut watch) = pause_pair();
    let (progress, on_progress) = progress_recorder();
    let result = batch::run(vec![input], &mut watch, on_progress)
        .await
        .unwrap();

    assert_eq!(result.processed, 0);
    assert!(unpack_images(&result.output.bytes).unwrap().is_empty());
    assert!(progress.lock().unwrap().is_empty());
}

// Test: A batch started behind a closed gate emits nothing until resumed,
// then runs to completion
#[tokio::test]
async fn paused_batch_holds_until_resumed() {
    let (gate, mut watch) = pause_pair();
    gate.pause();

    let (progress, on_progress) = progress_recorder();
    let inputs = vec![image_input("a.jpg"), image_input("b.jpg")];

    let run = batch::run(inputs, &mut watch, on_progress);
    tokio::pin!(run);

    let blocked = tokio::time::timeout(Duration::from_millis(100), &mut run).await;
    assert!(blocked.is_err(), "paused batch should not complete");
    assert!(progress.lock().unwrap().is_empty());

    gate.resume();
    let result = run.await.unwrap();
    assert_eq!(result.processed, 2);
    assert_non_decreasing_to_100(&progress.lock().unwrap());
}
