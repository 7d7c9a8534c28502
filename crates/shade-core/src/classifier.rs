//! Undertone and depth classification from a mean skin color.
//!
//! Both derivations are fixed thresholds, no smoothing and no hysteresis.

use crate::types::{Depth, Hsl, Rgb, Undertone};

// --- Undertone bands on (red share - blue share) * 100 ---
const WARM_ABOVE: f64 = 15.0;
const COOL_BELOW: f64 = 5.0;

// --- Depth breakpoints on HSL lightness, checked in descending order ---
const DEPTH_BREAKPOINTS: [(f64, Depth); 4] = [
    (75.0, Depth::Fair),
    (60.0, Depth::Light),
    (45.0, Depth::Medium),
    (30.0, Depth::Tan),
];

/// Classify undertone from the red and blue share of the channel sum.
///
/// A perfectly gray input has a difference of 0 and classifies as cool.
/// Pure black (zero sum) has no defined ratio and falls through to neutral.
pub fn determine_undertone(rgb: Rgb) -> Undertone {
    let sum = f64::from(rgb.channel_sum());
    let r_ratio = f64::from(rgb.r) / sum;
    let b_ratio = f64::from(rgb.b) / sum;
    undertone_for_difference((r_ratio - b_ratio) * 100.0)
}

/// Map a red-minus-blue share difference (percentage points) to an undertone.
/// `(−∞, 5)` is cool, `[5, 15]` neutral, `(15, ∞)` warm.
pub fn undertone_for_difference(difference: f64) -> Undertone {
    if difference > WARM_ABOVE {
        Undertone::Warm
    } else if difference < COOL_BELOW {
        Undertone::Cool
    } else {
        Undertone::Neutral
    }
}

/// Standard RGB → HSL conversion.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let chroma = max - r.min(g).min(b);
    // Lightness-dependent saturation denominator
    let f = 1.0 - (max + max - chroma - 1.0).abs();

    let sector = if chroma == 0.0 {
        0.0
    } else if max == r {
        (g - b) / chroma
    } else if max == g {
        2.0 + (b - r) / chroma
    } else {
        4.0 + (r - g) / chroma
    };

    Hsl {
        h: 60.0 * if sector < 0.0 { sector + 6.0 } else { sector },
        s: if f == 0.0 { 0.0 } else { chroma / f * 100.0 },
        l: (max + max - chroma) / 2.0 * 100.0,
    }
}

/// Bucket HSL lightness (0–100) into a depth. Lower bounds are inclusive.
pub fn determine_depth(lightness: f64) -> Depth {
    DEPTH_BREAKPOINTS
        .iter()
        .find(|(min, _)| lightness >= *min)
        .map(|&(_, depth)| depth)
        .unwrap_or(Depth::Deep)
}

/// Undertone and depth for a usable mean color.
pub fn classify(rgb: Rgb) -> (Undertone, Depth) {
    let undertone = determine_undertone(rgb);
    let hsl = rgb_to_hsl(rgb);
    let depth = determine_depth(hsl.l);
    tracing::trace!(%rgb, h = hsl.h, s = hsl.s, l = hsl.l, %undertone, %depth, "classified color");
    (undertone, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
    }

    #[test]
    fn test_gray_is_cool() {
        for v in [1u8, 50, 128, 200, 255] {
            assert_eq!(determine_undertone(Rgb::new(v, v, v)), Undertone::Cool);
        }
    }

    #[test]
    fn test_black_is_neutral() {
        assert_eq!(determine_undertone(Rgb::BLACK), Undertone::Neutral);
    }

    #[test]
    fn test_warm_skin() {
        // difference = (200 - 100) / 450 * 100 ≈ 22.2
        assert_eq!(determine_undertone(Rgb::new(200, 150, 100)), Undertone::Warm);
        assert_eq!(determine_undertone(Rgb::new(180, 130, 100)), Undertone::Warm);
    }

    #[test]
    fn test_blue_dominant_is_cool() {
        assert_eq!(determine_undertone(Rgb::new(100, 120, 160)), Undertone::Cool);
    }

    #[test]
    fn test_neutral_band() {
        // difference = (130 - 100) / 330 * 100 ≈ 9.1
        assert_eq!(determine_undertone(Rgb::new(130, 100, 100)), Undertone::Neutral);
    }

    #[test]
    fn test_undertone_band_edges() {
        assert_eq!(undertone_for_difference(4.999), Undertone::Cool);
        assert_eq!(undertone_for_difference(5.0), Undertone::Neutral);
        assert_eq!(undertone_for_difference(15.0), Undertone::Neutral);
        assert_eq!(undertone_for_difference(15.001), Undertone::Warm);
        assert_eq!(undertone_for_difference(-40.0), Undertone::Cool);
        assert_eq!(undertone_for_difference(f64::NAN), Undertone::Neutral);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_close(red.h, 0.0);
        assert_close(red.s, 100.0);
        assert_close(red.l, 50.0);

        let green = rgb_to_hsl(Rgb::new(0, 255, 0));
        assert_close(green.h, 120.0);

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert_close(blue.h, 240.0);

        let magenta = rgb_to_hsl(Rgb::new(255, 0, 255));
        assert_close(magenta.h, 300.0);
    }

    #[test]
    fn test_hsl_achromatic() {
        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_close(gray.h, 0.0);
        assert_close(gray.s, 0.0);
        assert_close(gray.l, 128.0 / 255.0 * 100.0);

        let white = rgb_to_hsl(Rgb::new(255, 255, 255));
        assert_close(white.s, 0.0);
        assert_close(white.l, 100.0);

        assert_close(rgb_to_hsl(Rgb::BLACK).l, 0.0);
    }

    #[test]
    fn test_hsl_skin_tone() {
        let hsl = rgb_to_hsl(Rgb::new(200, 150, 100));
        assert_close(hsl.h, 30.0);
        assert_close(hsl.l, 300.0 / 2.0 / 255.0 * 100.0);
        // chroma 100/255 over 1 - |2l - 1|
        assert_close(hsl.s, (100.0 / 255.0) / (1.0 - (300.0 / 255.0 - 1.0)) * 100.0);
    }

    #[test]
    fn test_depth_breakpoints_inclusive() {
        assert_eq!(determine_depth(100.0), Depth::Fair);
        assert_eq!(determine_depth(75.0), Depth::Fair);
        assert_eq!(determine_depth(74.99), Depth::Light);
        assert_eq!(determine_depth(60.0), Depth::Light);
        assert_eq!(determine_depth(59.99), Depth::Medium);
        assert_eq!(determine_depth(45.0), Depth::Medium);
        assert_eq!(determine_depth(44.99), Depth::Tan);
        assert_eq!(determine_depth(30.0), Depth::Tan);
        assert_eq!(determine_depth(29.99), Depth::Deep);
        assert_eq!(determine_depth(0.0), Depth::Deep);
    }

    #[test]
    fn test_depth_total_and_monotonic() {
        let mut previous = Depth::Deep;
        for step in 0..=1000 {
            let depth = determine_depth(f64::from(step) / 10.0);
            // Lighter input never yields a darker bucket
            assert!(depth <= previous, "depth went darker at l={}", f64::from(step) / 10.0);
            previous = depth;
        }
        assert_eq!(previous, Depth::Fair);
    }

    #[test]
    fn test_classify_scenarios() {
        assert_eq!(classify(Rgb::new(128, 128, 128)), (Undertone::Cool, Depth::Medium));
        // l = (200 + 100) / 2 / 255 * 100 ≈ 58.8, just under the light breakpoint
        assert_eq!(classify(Rgb::new(200, 150, 100)), (Undertone::Warm, Depth::Medium));
        // l ≈ 66.7, difference ≈ 19.6
        assert_eq!(classify(Rgb::new(220, 170, 120)), (Undertone::Warm, Depth::Light));
    }
}
