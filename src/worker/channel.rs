//! Worker channel: command/event plumbing around one batch.
//!
//! A channel drives at most one batch from start to a terminal state.
//! Commands flow in, events flow out; the control loop multiplexes the
//! running batch, its progress stream, and incoming commands with
//! `select!`. Cancellation drops the batch future, so partial output is
//! discarded rather than delivered.
//!
//! # Example
//!
//! ```ignore
//! use nameplate::worker::{Command, Event, WorkerChannel};
//!
//! let mut channel = WorkerChannel::spawn();
//! channel.send(Command::Start { inputs }).await;
//! while let Some(event) = channel.recv().await {
//!     match event {
//!         Event::Progress { percent } => println!("{percent:.0}%"),
//!         Event::Complete { response } => break,
//!         _ => {}
//!     }
//! }
//! ```

use super::pause::pause_pair;
use crate::batch::{self, ImageInput};
use crate::submission::{check_submission_size, SubmissionResponse};
use tokio::sync::mpsc;

/// Commands accepted by a worker channel.
#[derive(Debug)]
pub enum Command {
    Start { inputs: Vec<ImageInput> },
    Pause,
    Resume,
    Cancel,
}

/// Events emitted by a worker channel.
#[derive(Debug)]
pub enum Event {
    /// Overall progress, 0 to 100.
    Progress { percent: f32 },
    /// Pause acknowledged; processing holds before the next unit.
    Paused,
    /// Resume acknowledged.
    Resumed,
    /// Terminal: the batch finished and this is its output.
    Complete { response: SubmissionResponse },
    /// Terminal: the batch failed.
    Error { message: String },
    /// Terminal: cancellation acknowledged, partial output discarded.
    Cancelled,
}

/// Lifecycle of a worker channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl ExecutionState {
    /// Terminal states accept no further commands; starting another
    /// batch requires a fresh channel.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Handle to a spawned worker task.
pub struct WorkerChannel {
    commands: mpsc::Sender<Command>,
    events: mpsc::Receiver<Event>,
}

impl WorkerChannel {
    /// Spawn a fresh channel in the Idle state.
    pub fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(64);
        tokio::spawn(control_loop(command_rx, event_tx));
        Self {
            commands: command_tx,
            events: event_rx,
        }
    }

    /// Send a command. Returns false once the channel reached a
    /// terminal state and its task is gone.
    pub async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Receive the next event. None after the terminal event.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }
}

async fn control_loop(mut commands: mpsc::Receiver<Command>, events: mpsc::Sender<Event>) {
    // Idle: only Start (or Cancel) does anything
    let inputs = loop {
        match commands.recv().await {
            Some(Command::Start { inputs }) => break inputs,
            Some(Command::Cancel) => {
                let _ = events.send(Event::Cancelled).await;
                return;
            }
            Some(command) => {
                tracing::debug!(?command, "Ignoring command while idle");
            }
            None => return,
        }
    };

    if let Err(e) = check_submission_size(&inputs) {
        let _ = events
            .send(Event::Error {
                message: e.to_string(),
            })
            .await;
        return;
    }

    let mut state = ExecutionState::Running;
    let (gate, mut pause) = pause_pair();

    // Progress hops from the batch callback onto the event stream
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<f32>();
    let run = batch::run(inputs, &mut pause, move |percent| {
        let _ = progress_tx.send(percent);
    });
    tokio::pin!(run);

    let mut commands_open = true;

    loop {
        tokio::select! {
            result = &mut run => {
                // Flush progress emitted by the final units
                while let Ok(percent) = progress_rx.try_recv() {
                    let _ = events.send(Event::Progress { percent }).await;
                }
                match result {
                    Ok(batch_result) => {
                        state = ExecutionState::Completed;
                        let response = SubmissionResponse::from_batch(batch_result);
                        let _ = events.send(Event::Complete { response }).await;
                    }
                    Err(e) => {
                        state = ExecutionState::Failed;
                        let _ = events.send(Event::Error { message: e.to_string() }).await;
                    }
                }
                break;
            }
            Some(percent) = progress_rx.recv() => {
                let _ = events.send(Event::Progress { percent }).await;
            }
            command = commands.recv(), if commands_open => {
                match command {
                    Some(Command::Pause) if state == ExecutionState::Running => {
                        gate.pause();
                        state = ExecutionState::Paused;
                        let _ = events.send(Event::Paused).await;
                    }
                    Some(Command::Resume) if state == ExecutionState::Paused => {
                        gate.resume();
                        state = ExecutionState::Running;
                        let _ = events.send(Event::Resumed).await;
                    }
                    Some(Command::Cancel) => {
                        // Returning drops the batch future mid-unit
                        let _ = events.send(Event::Cancelled).await;
                        return;
                    }
                    Some(Command::Start { .. }) => {
                        tracing::warn!("Ignoring start on a busy channel");
                    }
                    Some(command) => {
                        tracing::debug!(?command, ?state, "Ignoring command");
                    }
                    None => commands_open = false,
                }
            }
        }
    }

    tracing::debug!(?state, "Worker channel finished");
}
