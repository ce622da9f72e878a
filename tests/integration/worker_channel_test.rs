// Worker channel lifecycle: start to complete, pause/resume ordering,
// and drop-based cancellation.

use bytes::Bytes;
use image::{DynamicImage, Rgba, RgbaImage};
use nameplate::batch::ImageInput;
use nameplate::worker::{Command, Event, WorkerChannel};
use std::io::Cursor;
use std::time::Duration;

fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([60, 60, 200, 255]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

fn inputs(count: usize) -> Vec<ImageInput> {
    (0..count)
        .map(|i| {
            ImageInput::from_parts(
                format!("img-{:02}.jpg", i),
                Bytes::from(create_test_jpeg(48, 48)),
            )
            .unwrap()
        })
        .collect()
}

async fn recv_or_timeout(channel: &mut WorkerChannel) -> Event {
    tokio::time::timeout(Duration::from_secs(30), channel.recv())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed unexpectedly")
}

// Test: Full run emits non-decreasing progress and a single Complete
#[tokio::test]
async fn start_to_complete_flow() {
    let mut channel = WorkerChannel::spawn();
    assert!(channel.send(Command::Start { inputs: inputs(2) }).await);

    let mut progress = Vec::new();
    loop {
        match recv_or_timeout(&mut channel).await {
            Event::Progress { percent } => progress.push(percent),
            Event::Complete { response } => {
                assert_eq!(response.file_name, "processed_images.zip");
                assert_eq!(response.content_type, "application/zip");
                assert!(!response.data.is_empty());
                break;
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    for pair in progress.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(progress.last().copied(), Some(100.0));

    // Terminal: no more events, further commands fail
    assert!(channel.recv().await.is_none());
    assert!(!channel.send(Command::Pause).await);
}

// Test: Pause is acknowledged, resume continues to completion with the
// full progress sequence intact
#[tokio::test]
async fn pause_resume_flow() {
    let mut channel = WorkerChannel::spawn();
    assert!(channel.send(Command::Start { inputs: inputs(8) }).await);
    assert!(channel.send(Command::Pause).await);

    let mut progress = Vec::new();
    loop {
        match recv_or_timeout(&mut channel).await {
            Event::Progress { percent } => progress.push(percent),
            Event::Paused => break,
            other => panic!("unexpected event before pause ack: {:?}", other),
        }
    }

    assert!(channel.send(Command::Resume).await);

    let mut resumed = false;
    let mut completed = false;
    loop {
        match recv_or_timeout(&mut channel).await {
            Event::Progress { percent } => progress.push(percent),
            Event::Resumed => resumed = true,
            Event::Complete { response } => {
                assert_eq!(response.file_name, "processed_images.zip");
                completed = true;
                break;
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    assert!(resumed);
    assert!(completed);
    for pair in progress.windows(2) {
        assert!(pair[0] <= pair[1], "progress regressed: {:?}", progress);
    }
    assert_eq!(progress.last().copied(), Some(100.0));
}

// Test: Cancel acknowledges, discards the batch, and never completes
#[tokio::test]
async fn cancel_discards_batch() {
    let mut channel = WorkerChannel::spawn();
    assert!(channel.send(Command::Start { inputs: inputs(8) }).await);
    assert!(channel.send(Command::Cancel).await);

    let mut cancelled = false;
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_secs(30), channel.recv()).await
    {
        match event {
            Event::Cancelled => cancelled = true,
            Event::Complete { .. } => panic!("cancelled batch must not complete"),
            Event::Progress { .. } => {}
            other => panic!("unexpected event: {:?}", other),
        }
    }

    assert!(cancelled);
}

// Test: Single image completes with an image response
#[tokio::test]
async fn single_image_response() {
    let mut channel = WorkerChannel::spawn();
    channel
        .send(Command::Start { inputs: inputs(1) })
        .await;

    loop {
        match recv_or_timeout(&mut channel).await {
            Event::Progress { .. } => {}
            Event::Complete { response } => {
                assert_eq!(response.file_name, "img-00.jpg");
                assert_eq!(response.content_type, "image/jpeg");
                assert_eq!(&response.data[..2], &[0xFF, 0xD8]);
                break;
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}

// Test: A failing batch ends with a terminal Error and nothing after it
#[tokio::test]
async fn failed_batch_is_terminal() {
    let bad = ImageInput::from_parts("bad.jpg", Bytes::from_static(&[0, 1, 2])).unwrap();

    let mut channel = WorkerChannel::spawn();
    channel.send(Command::Start { inputs: vec![bad] }).await;

    loop {
        match recv_or_timeout(&mut channel).await {
            Event::Progress { .. } => {}
            Event::Error { message } => {
                assert!(message.contains("bad.jpg"));
                break;
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    assert!(channel.recv().await.is_none());
}
