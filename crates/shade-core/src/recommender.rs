use crate::catalog::ShadeCatalog;
use crate::classifier;
use crate::types::{Rgb, ShadeResult};

/// Classify a usable mean color and look up its shades.
///
/// An uncataloged depth/undertone pair gives an empty shade list, never an error.
pub fn recommend_shades(rgb: Rgb, catalog: &ShadeCatalog) -> ShadeResult {
    let (undertone, depth) = classifier::classify(rgb);
    let shades = catalog.shades_for(depth, undertone).to_vec();
    if shades.is_empty() {
        tracing::warn!(%depth, %undertone, "no catalog entry for profile");
    }
    ShadeResult { undertone, depth, shades }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::types::{Depth, Undertone};

    #[test]
    fn test_gray_recommends_medium_cool() {
        let result = recommend_shades(Rgb::new(128, 128, 128), &default_catalog());
        assert_eq!(result.undertone, Undertone::Cool);
        assert_eq!(result.depth, Depth::Medium);
        assert_eq!(result.shades, ["Cool Medium (30C)", "Rose Tan (32C)", "Cool Almond (35C)"]);
    }

    #[test]
    fn test_warm_medium_skin() {
        let result = recommend_shades(Rgb::new(200, 150, 100), &default_catalog());
        assert_eq!(result.undertone, Undertone::Warm);
        assert_eq!(result.depth, Depth::Medium);
        assert_eq!(result.shades, ["Warm Medium (30W)", "Golden Tan (32W)", "Caramel (35W)"]);
    }

    #[test]
    fn test_warm_light_skin() {
        let result = recommend_shades(Rgb::new(220, 170, 120), &default_catalog());
        assert_eq!(result.undertone, Undertone::Warm);
        assert_eq!(result.depth, Depth::Light);
        assert_eq!(result.shades, ["Warm Vanilla (20W)", "Golden Beige (22W)", "Honey (25W)"]);
    }

    #[test]
    fn test_deep_and_fair_profiles() {
        // l = (60 + 40) / 2 / 255 * 100 ≈ 19.6, difference ≈ 13.8
        let deep = recommend_shades(Rgb::new(60, 45, 40), &default_catalog());
        assert_eq!(deep.depth, Depth::Deep);
        assert_eq!(deep.undertone, Undertone::Neutral);
        assert_eq!(deep.shades[0], "Neutral Espresso (50N)");

        // l = (230 + 215) / 2 / 255 * 100 ≈ 87.3, difference ≈ 2.3
        let fair = recommend_shades(Rgb::new(230, 215, 215), &default_catalog());
        assert_eq!(fair.depth, Depth::Fair);
        assert_eq!(fair.undertone, Undertone::Cool);
        assert_eq!(fair.shades[0], "Porcelain (10C)");
    }

    #[test]
    fn test_uncataloged_profile_degrades_to_advice() {
        let result = recommend_shades(Rgb::new(128, 128, 128), &ShadeCatalog::default());
        assert!(result.shades.is_empty());
        assert_eq!(
            result.advice().as_deref(),
            Some("No exact shades cataloged for this specific profile, but look for medium products with cool undertones.")
        );
    }
}
