//! Archive module for ZIP handling.
//!
//! Submissions can arrive as ZIP archives of images and leave as ZIP
//! bundles. This module owns both directions: filtering unpack and
//! deterministic pack.

pub mod codec;
pub mod error;

pub use codec::{is_image_name, pack, unpack_images, ArchiveEntry};
pub use error::ArchiveError;
