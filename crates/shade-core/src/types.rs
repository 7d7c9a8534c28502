use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Mean red/green/blue intensity of a sampled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel sum, the denominator for undertone ratios.
    pub fn channel_sum(&self) -> u32 {
        u32::from(self.r) + u32::from(self.g) + u32::from(self.b)
    }

    /// Average of the three channels (0.0–255.0).
    pub fn brightness(&self) -> f64 {
        f64::from(self.channel_sum()) / 3.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue in degrees [0, 360), saturation and lightness as percentages [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Outcome of averaging the sampled face region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageColorResult {
    pub rgb: Rgb,
    pub is_usable: bool,
    /// Human-readable diagnostic when `is_usable` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AverageColorResult {
    pub fn usable(rgb: Rgb) -> Self {
        Self { rgb, is_usable: true, reason: None }
    }

    pub fn unusable(rgb: Rgb, reason: impl Into<String>) -> Self {
        Self { rgb, is_usable: false, reason: Some(reason.into()) }
    }
}

/// Warm/cool/neutral hue bias beneath the skin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

impl Undertone {
    pub const ALL: [Undertone; 3] = [Undertone::Cool, Undertone::Warm, Undertone::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Undertone::Warm => "warm",
            Undertone::Cool => "cool",
            Undertone::Neutral => "neutral",
        }
    }
}

/// Lightness category of a skin tone, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Fair,
    Light,
    Medium,
    Tan,
    Deep,
}

impl Depth {
    pub const ALL: [Depth; 5] = [Depth::Fair, Depth::Light, Depth::Medium, Depth::Tan, Depth::Deep];

    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Fair => "fair",
            Depth::Light => "light",
            Depth::Medium => "medium",
            Depth::Tan => "tan",
            Depth::Deep => "deep",
        }
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl FromStr for Undertone {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Undertone::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| ParseLabelError { kind: "undertone", value: s.to_string() })
    }
}

impl FromStr for Depth {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Depth::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseLabelError { kind: "depth", value: s.to_string() })
    }
}

/// Catalog key for a depth/undertone pair, e.g. `"medium_cool"`.
pub fn catalog_key(depth: Depth, undertone: Undertone) -> String {
    format!("{depth}_{undertone}")
}

/// Classified profile plus the matching catalog shades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadeResult {
    pub undertone: Undertone,
    pub depth: Depth,
    /// Presentation order, most recommended first. May be empty.
    pub shades: Vec<String>,
}

impl ShadeResult {
    /// Generic guidance shown when the catalog has nothing for this profile.
    pub fn advice(&self) -> Option<String> {
        if !self.shades.is_empty() {
            return None;
        }
        Some(format!(
            "No exact shades cataloged for this specific profile, but look for {} products with {} undertones.",
            self.depth, self.undertone
        ))
    }
}

/// Final output of one analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeResult {
    Usable { rgb: Rgb, shade: ShadeResult },
    Unusable { rgb: Rgb, reason: String },
}

impl AnalyzeResult {
    pub fn is_usable(&self) -> bool {
        matches!(self, AnalyzeResult::Usable { .. })
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            AnalyzeResult::Usable { rgb, .. } | AnalyzeResult::Unusable { rgb, .. } => *rgb,
        }
    }

    /// Why the image was rejected, for unusable results.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AnalyzeResult::Unusable { reason, .. } => Some(reason),
            AnalyzeResult::Usable { .. } => None,
        }
    }

    /// The record callers persist next to lead data. `None` for unusable images.
    pub fn profile(&self) -> Option<ShadeProfile> {
        match self {
            AnalyzeResult::Usable { rgb, shade } => Some(ShadeProfile {
                undertone: shade.undertone,
                depth: shade.depth,
                avg_rgb: *rgb,
                recommended_shades: shade.shades.clone(),
            }),
            AnalyzeResult::Unusable { .. } => None,
        }
    }
}

impl Serialize for AnalyzeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnalyzeResult", 3)?;
        match self {
            AnalyzeResult::Usable { rgb, shade } => {
                state.serialize_field("usable", &true)?;
                state.serialize_field("rgb", rgb)?;
                state.serialize_field("shade", shade)?;
            }
            AnalyzeResult::Unusable { rgb, reason } => {
                state.serialize_field("usable", &false)?;
                state.serialize_field("rgb", rgb)?;
                state.serialize_field("reason", reason)?;
            }
        }
        state.end()
    }
}

/// Persistable shade profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadeProfile {
    pub undertone: Undertone,
    pub depth: Depth,
    pub avg_rgb: Rgb,
    pub recommended_shades: Vec<String>,
}
