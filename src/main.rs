use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use nameplate::batch::ImageInput;
use nameplate::submission::ErrorPayload;
use nameplate::worker::{Command, Event, WorkerChannel};
use std::path::PathBuf;

/// Nameplate - label images with their file name and bundle the results
#[derive(Parser, Debug)]
#[command(name = "nameplate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Image or ZIP files to process
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging subsystem
    nameplate::logging::init_subscriber(args.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let mut inputs = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        inputs.push(ImageInput::from_parts(name, Bytes::from(bytes))?);
    }

    tracing::info!(files = inputs.len(), "Submitting batch");

    let mut channel = WorkerChannel::spawn();
    channel.send(Command::Start { inputs }).await;

    while let Some(event) = channel.recv().await {
        match event {
            Event::Progress { percent } => {
                tracing::info!(percent = percent as f64, "Processing");
            }
            Event::Paused => tracing::info!("Paused"),
            Event::Resumed => tracing::info!("Resumed"),
            Event::Cancelled => {
                tracing::info!("Cancelled");
                return Ok(());
            }
            Event::Complete { response } => {
                let target = args.output_dir.join(&response.file_name);
                std::fs::write(&target, &response.data)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                tracing::info!(
                    file = %target.display(),
                    content_type = response.content_type,
                    bytes = response.data.len(),
                    "Output written"
                );
                return Ok(());
            }
            Event::Error { message } => {
                let payload = ErrorPayload {
                    error: message.clone(),
                    stack: None,
                };
                eprintln!("{}", serde_json::to_string(&payload)?);
                anyhow::bail!("Processing failed: {}", message);
            }
        }
    }

    anyhow::bail!("Worker channel closed without a terminal event");
}
