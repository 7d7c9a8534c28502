//! shade-image — Photo decoding for the shade finder.
//!
//! Turns uploaded JPEG/PNG bytes into a pixel-addressable bitmap that
//! implements [`shade_core::PixelSource`], enforcing the upload size and
//! format rules first.

pub mod photo;
pub mod upload;

pub use photo::{DecodeError, Photo};
pub use upload::{UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};
