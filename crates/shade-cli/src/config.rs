use shade_core::sampler::DEFAULT_STRIDE;
use shade_image::DEFAULT_MAX_UPLOAD_BYTES;
use std::path::PathBuf;

/// CLI configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional TOML catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Largest accepted photo in bytes (default: 5 MiB).
    pub max_upload_bytes: u64,
    /// Pixel stride inside the sampling zone (default: 5).
    pub sample_stride: u32,
}

impl Config {
    /// Load configuration from `SHADE_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let sample_stride = match parse_or(&lookup, "SHADE_SAMPLE_STRIDE", DEFAULT_STRIDE) {
            0 => {
                tracing::warn!("SHADE_SAMPLE_STRIDE=0 ignored; using {DEFAULT_STRIDE}");
                DEFAULT_STRIDE
            }
            n => n,
        };

        Self {
            catalog_path: lookup("SHADE_CATALOG_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            max_upload_bytes: parse_or(&lookup, "SHADE_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            sample_stride,
        }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
