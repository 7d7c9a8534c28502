//! Decoded photo type: the upright bitmap handed to the shade pipeline.

use crate::upload::UploadPolicy;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use shade_core::{PixelReadError, PixelSource, Rgb};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("image is empty")]
    Empty,
    #[error("image must be smaller than {max} bytes, got {size}")]
    TooLarge { size: u64, max: u64 },
    #[error("unsupported image format: {0} (upload a JPEG or PNG)")]
    UnsupportedFormat(String),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded photo in 8-bit RGBA.
#[derive(Debug, Clone)]
pub struct Photo {
    image: RgbaImage,
    format: ImageFormat,
}

impl Photo {
    /// Check an uploaded byte buffer against `policy` and decode it.
    ///
    /// EXIF orientation is applied, so the sampling zone lands on the
    /// upright face even when the camera stored the photo sideways.
    pub fn decode(bytes: &[u8], policy: &UploadPolicy) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let size = bytes.len() as u64;
        if !policy.accepts_size(size) {
            return Err(DecodeError::TooLarge {
                size,
                max: policy.max_bytes,
            });
        }

        let format = image::guess_format(bytes)
            .map_err(|_| DecodeError::UnsupportedFormat("unrecognized".to_string()))?;
        if !policy.accepts_format(format) {
            return Err(DecodeError::UnsupportedFormat(format!("{format:?}")));
        }

        let mut decoder = ImageReader::with_format(Cursor::new(bytes), format).into_decoder()?;
        let orientation = decoder.orientation()?;
        let mut decoded = DynamicImage::from_decoder(decoder)?;
        decoded.apply_orientation(orientation);
        let image = decoded.to_rgba8();
        tracing::debug!(
            ?format,
            ?orientation,
            width = image.width(),
            height = image.height(),
            bytes = size,
            "decoded photo"
        );
        Ok(Self { image, format })
    }

    /// Read and decode a photo file.
    pub fn open(path: impl AsRef<Path>, policy: &UploadPolicy) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DecodeError::NotFound(path.to_path_buf()));
        }
        // Reject oversized files before reading them into memory.
        let size = std::fs::metadata(path)?.len();
        if !policy.accepts_size(size) {
            return Err(DecodeError::TooLarge {
                size,
                max: policy.max_bytes,
            });
        }
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes, policy)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

}

impl PixelSource for Photo {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn rgb_at(&self, x: u32, y: u32) -> Result<Rgb, PixelReadError> {
        self.image
            .get_pixel_checked(x, y)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .ok_or(PixelReadError::OutOfBounds {
                x,
                y,
                width: self.image.width(),
                height: self.image.height(),
            })
    }
}
