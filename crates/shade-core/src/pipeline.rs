//! End-to-end shade analysis: sample → aggregate → classify → recommend.

use crate::aggregator::{self, AnalysisError};
use crate::catalog::{default_catalog, ShadeCatalog};
use crate::recommender::recommend_shades;
use crate::sampler::{PixelSource, SamplingRegion};
use crate::types::{AnalyzeResult, AverageColorResult};
use std::sync::Arc;

/// Reusable analyzer. Cheap to clone and safe to share across threads;
/// each `analyze` call is independent.
#[derive(Debug, Clone)]
pub struct ShadeAnalyzer {
    region: SamplingRegion,
    catalog: Arc<ShadeCatalog>,
}

impl Default for ShadeAnalyzer {
    fn default() -> Self {
        Self::new(SamplingRegion::default(), default_catalog())
    }
}

impl ShadeAnalyzer {
    pub fn new(region: SamplingRegion, catalog: Arc<ShadeCatalog>) -> Self {
        Self { region, catalog }
    }

    /// Average the sampled face zone without classifying it.
    pub fn average_color<S: PixelSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<AverageColorResult, AnalysisError> {
        let rect = self.region.rect(source.width(), source.height());
        tracing::debug!(
            width = source.width(),
            height = source.height(),
            ?rect,
            stride = self.region.stride,
            "sampling face region"
        );
        if rect.is_empty() {
            tracing::debug!("sampling region collapsed to zero area");
        }
        aggregator::average_color(self.region.samples(source))
    }

    /// Run the full pipeline on a decoded bitmap.
    pub fn analyze<S: PixelSource + ?Sized>(&self, source: &S) -> Result<AnalyzeResult, AnalysisError> {
        let average = self.average_color(source)?;

        if !average.is_usable {
            let reason = average.reason.unwrap_or_default();
            tracing::info!(rgb = %average.rgb, reason = %reason, "image unusable for shade analysis");
            return Ok(AnalyzeResult::Unusable { rgb: average.rgb, reason });
        }

        let shade = recommend_shades(average.rgb, &self.catalog);
        tracing::info!(
            rgb = %average.rgb,
            undertone = %shade.undertone,
            depth = %shade.depth,
            shades = shade.shades.len(),
            "shade analysis complete"
        );
        Ok(AnalyzeResult::Usable { rgb: average.rgb, shade })
    }
}

/// Analyze with the default sampling zone and built-in catalog.
pub fn analyze<S: PixelSource + ?Sized>(source: &S) -> Result<AnalyzeResult, AnalysisError> {
    ShadeAnalyzer::default().analyze(source)
}
