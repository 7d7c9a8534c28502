//! Color aggregator — exposure filtering and mean color of the sampled zone.

use crate::sampler::PixelReadError;
use crate::types::{AverageColorResult, Rgb};
use thiserror::Error;

// --- Per-pixel exposure gate (exclusive on both ends) ---
const PIXEL_MIN_BRIGHTNESS: u32 = 20;
const PIXEL_MAX_BRIGHTNESS: u32 = 240;

// --- Overall verdict on the averaged color ---
const OVERALL_MIN_BRIGHTNESS: f64 = 20.0;
const OVERALL_MAX_BRIGHTNESS: f64 = 235.0;

pub const REASON_NO_VALID_PIXELS: &str =
    "Face region lacks sufficient color variation or lighting is too extreme.";
pub const REASON_TOO_DARK: &str = "Image is too dark. Average brightness < 20.";
pub const REASON_TOO_BRIGHT: &str = "Image is too bright or overexposed.";

/// Hard failure: the bitmap could not be read at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("failed to extract image pixels: {0}")]
    PixelRead(#[from] PixelReadError),
}

/// Running channel sums over retained pixels.
#[derive(Debug, Clone, Default)]
pub struct ColorAccumulator {
    r_sum: u64,
    g_sum: u64,
    b_sum: u64,
    count: u64,
    rejected: u64,
}

impl ColorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pixel. Near-black and near-white pixels are dropped.
    /// Returns whether the pixel was kept.
    pub fn push(&mut self, rgb: Rgb) -> bool {
        // brightness = sum / 3, compared against the bounds without division
        let sum = rgb.channel_sum();
        if sum <= PIXEL_MIN_BRIGHTNESS * 3 || sum >= PIXEL_MAX_BRIGHTNESS * 3 {
            self.rejected += 1;
            return false;
        }
        self.r_sum += u64::from(rgb.r);
        self.g_sum += u64::from(rgb.g);
        self.b_sum += u64::from(rgb.b);
        self.count += 1;
        true
    }

    pub fn retained(&self) -> u64 {
        self.count
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Mean of the retained pixels, rounded half-up per channel.
    pub fn mean(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        let avg = |sum: u64| -> u8 { ((sum * 2 + self.count) / (self.count * 2)) as u8 };
        Some(Rgb::new(avg(self.r_sum), avg(self.g_sum), avg(self.b_sum)))
    }

    /// Final verdict for the accumulated samples.
    pub fn finish(&self) -> AverageColorResult {
        match self.mean() {
            None => AverageColorResult::unusable(Rgb::BLACK, REASON_NO_VALID_PIXELS),
            Some(rgb) => match exposure_problem(rgb) {
                Some(reason) => AverageColorResult::unusable(rgb, reason),
                None => AverageColorResult::usable(rgb),
            },
        }
    }
}

/// Reason the averaged color is too dark or too bright, if any.
pub fn exposure_problem(rgb: Rgb) -> Option<&'static str> {
    let overall = rgb.brightness();
    if overall < OVERALL_MIN_BRIGHTNESS {
        Some(REASON_TOO_DARK)
    } else if overall > OVERALL_MAX_BRIGHTNESS {
        Some(REASON_TOO_BRIGHT)
    } else {
        None
    }
}

/// Average a stream of sampled pixels.
///
/// Unusable images are a normal outcome carried in the result; only a pixel
/// read failure is returned as an error.
pub fn average_color<I>(samples: I) -> Result<AverageColorResult, AnalysisError>
where
    I: IntoIterator<Item = Result<Rgb, PixelReadError>>,
{
    let mut acc = ColorAccumulator::new();
    for sample in samples {
        acc.push(sample?);
    }

    let result = acc.finish();
    tracing::debug!(
        retained = acc.retained(),
        rejected = acc.rejected(),
        rgb = %result.rgb,
        usable = result.is_usable,
        "aggregated sampled pixels"
    );
    Ok(result)
}
