// Nameplate image labeling library
// Processing core behind the upload surface: watermarking, archive
// handling, batch orchestration, and the pausable worker channel.

pub mod archive;
pub mod batch;
pub mod constants;
pub mod logging;
pub mod submission;
pub mod watermark;
pub mod worker;
