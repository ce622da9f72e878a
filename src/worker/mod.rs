//! Worker module: the execution channel around a batch.
//!
//! # Features
//!
//! - **Command/event protocol**: start, pause, resume, cancel in;
//!   progress, acks, and one terminal event out
//! - **Cooperative pause** via a watch-based gate checked between units
//! - **Drop-based cancellation**: the in-flight batch future is dropped,
//!   partial output never escapes

pub mod channel;
pub mod pause;

pub use channel::{Command, Event, ExecutionState, WorkerChannel};
pub use pause::{pause_pair, PauseGate, PauseWatch};
