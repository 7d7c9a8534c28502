//! shade-core — Foundation shade finder engine.
//!
//! Estimates skin undertone and depth from a photo with fixed pixel-color
//! heuristics (no machine learning) and maps them onto a curated shade
//! catalog. The pipeline is sampler → aggregator → classifier → recommender,
//! running synchronously over an already-decoded bitmap.

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod pipeline;
pub mod recommender;
pub mod sampler;
pub mod types;

pub use aggregator::AnalysisError;
pub use catalog::{default_catalog, CatalogError, ShadeCatalog};
pub use pipeline::{analyze, ShadeAnalyzer};
pub use sampler::{PixelReadError, PixelSource, RgbaBuffer, SamplingRegion};
pub use types::{AnalyzeResult, AverageColorResult, Depth, Hsl, Rgb, ShadeProfile, ShadeResult, Undertone};
