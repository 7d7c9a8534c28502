//! Region sampler — picks the central cheek zone of a photo and walks it on a
//! fixed stride.
//!
//! The zone is a fixed fraction of the frame: horizontally 30%–70%,
//! vertically 35%–65%. This stands in for a skin mask on a forward-facing,
//! properly framed photo without any face detection.

use crate::types::Rgb;
use thiserror::Error;

// --- Default sampling zone ---
pub const DEFAULT_X_START: f64 = 0.30;
pub const DEFAULT_X_END: f64 = 0.70;
pub const DEFAULT_Y_START: f64 = 0.35;
pub const DEFAULT_Y_END: f64 = 0.65;
pub const DEFAULT_STRIDE: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelReadError {
    #[error("pixel ({x}, {y}) outside {width}x{height} bitmap")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    #[error("pixel buffer too short: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("pixel data unavailable: {0}")]
    Unavailable(String),
}

/// Read access to a decoded bitmap.
///
/// Decoding happens outside the pipeline; implementors only expose
/// dimensions and per-pixel 8-bit color.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn rgb_at(&self, x: u32, y: u32) -> Result<Rgb, PixelReadError>;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn rgb_at(&self, x: u32, y: u32) -> Result<Rgb, PixelReadError> {
        (**self).rgb_at(x, y)
    }
}

/// Row-major RGBA bytes (4 per pixel), the layout of a canvas `ImageData`.
#[derive(Debug, Clone)]
pub struct RgbaBuffer {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbaBuffer {
    /// Wrap raw RGBA bytes. Fails if `data` is shorter than `width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, PixelReadError> {
        let expected = width as usize * height as usize * 4;
        if data.len() < expected {
            return Err(PixelReadError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// A bitmap where every pixel has the same opaque color.
    pub fn filled(width: u32, height: u32, rgb: Rgb) -> Self {
        let data = [rgb.r, rgb.g, rgb.b, 255].repeat(width as usize * height as usize);
        Self { data, width, height }
    }
}

impl PixelSource for RgbaBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgb_at(&self, x: u32, y: u32) -> Result<Rgb, PixelReadError> {
        if x >= self.width || y >= self.height {
            return Err(PixelReadError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(index..index + 3) {
            Some(px) => Ok(Rgb::new(px[0], px[1], px[2])),
            None => Err(PixelReadError::Truncated {
                expected: index + 3,
                actual: self.data.len(),
            }),
        }
    }
}

/// Fractional sampling zone plus the pixel stride used inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingRegion {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
    pub stride: u32,
}

impl Default for SamplingRegion {
    fn default() -> Self {
        Self {
            x_start: DEFAULT_X_START,
            x_end: DEFAULT_X_END,
            y_start: DEFAULT_Y_START,
            y_end: DEFAULT_Y_END,
            stride: DEFAULT_STRIDE,
        }
    }
}

/// Pixel rectangle `[x0, x1) × [y0, y1)` resolved against a concrete bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

impl SamplingRegion {
    pub fn with_stride(stride: u32) -> Self {
        Self { stride, ..Self::default() }
    }

    /// Resolve the zone for a `width × height` bitmap, flooring each bound.
    pub fn rect(&self, width: u32, height: u32) -> PixelRect {
        let bound = |extent: u32, frac: f64| -> u32 {
            ((f64::from(extent) * frac).floor().max(0.0) as u32).min(extent)
        };
        PixelRect {
            x0: bound(width, self.x_start),
            x1: bound(width, self.x_end),
            y0: bound(height, self.y_start),
            y1: bound(height, self.y_end),
        }
    }

    /// Visit the zone row by row on the stride, yielding each pixel's color.
    ///
    /// An empty bitmap or collapsed zone yields nothing. Read failures are
    /// passed through for the aggregator to propagate.
    pub fn samples<'a, S: PixelSource + ?Sized>(
        &self,
        source: &'a S,
    ) -> impl Iterator<Item = Result<Rgb, PixelReadError>> + 'a {
        let rect = self.rect(source.width(), source.height());
        let stride = self.stride.max(1) as usize;
        // A collapsed rect gives empty ranges, so nothing is visited.
        let (xs, ys) = (rect.x0..rect.x1, rect.y0..rect.y1);

        ys.step_by(stride).flat_map(move |y| {
            xs.clone()
                .step_by(stride)
                .map(move |x| source.rgb_at(x, y))
        })
    }
}
