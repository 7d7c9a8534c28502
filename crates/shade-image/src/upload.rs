//! Upload acceptance rules for shade-finder photos.

use image::ImageFormat;

/// 5 MiB, the largest photo the shade finder accepts.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Formats a photo may be uploaded in.
pub const ACCEPTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// Size and format limits applied before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn accepts_format(&self, format: ImageFormat) -> bool {
        ACCEPTED_FORMATS.contains(&format)
    }

    pub fn accepts_size(&self, len: u64) -> bool {
        len <= self.max_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_five_mib() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts_size(5 * 1024 * 1024));
        assert!(!policy.accepts_size(5 * 1024 * 1024 + 1));
    }

    #[test]
    fn test_only_jpeg_and_png() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts_format(ImageFormat::Jpeg));
        assert!(policy.accepts_format(ImageFormat::Png));
        assert!(!policy.accepts_format(ImageFormat::Gif));
        assert!(!policy.accepts_format(ImageFormat::WebP));
    }
}
