//! Decode options and environment overrides.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Which binarized grids the driver scans, and in what order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum InversionAttempts {
    /// Only the normal grid (dark modules on light background)
    DontInvert,
    /// Only the inverted grid (light modules on dark background)
    OnlyInvert,
    /// Normal grid first, then the inverted one
    #[default]
    AttemptBoth,
    /// Inverted grid first, then the normal one
    InvertFirst,
}

impl InversionAttempts {
    /// Whether the binarizer has to produce the inverted grid
    pub fn needs_inverted(self) -> bool {
        !matches!(self, InversionAttempts::DontInvert)
    }

    /// Whether the inverted grid is scanned before the normal one
    pub fn inverted_first(self) -> bool {
        matches!(
            self,
            InversionAttempts::OnlyInvert | InversionAttempts::InvertFirst
        )
    }

    /// Whether a second grid is tried after the first one fails
    pub fn tries_both(self) -> bool {
        matches!(
            self,
            InversionAttempts::AttemptBoth | InversionAttempts::InvertFirst
        )
    }
}

impl FromStr for InversionAttempts {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "dontinvert" => Ok(InversionAttempts::DontInvert),
            "onlyinvert" => Ok(InversionAttempts::OnlyInvert),
            "attemptboth" => Ok(InversionAttempts::AttemptBoth),
            "invertfirst" => Ok(InversionAttempts::InvertFirst),
            _ => Err(format!("unknown inversion mode: {s}")),
        }
    }
}

/// Luminance weights for the RGB to grayscale conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrayscaleWeights {
    /// Red weight
    pub red: f64,
    /// Green weight
    pub green: f64,
    /// Blue weight
    pub blue: f64,
    /// Use `(r*wr + g*wg + b*wb + 128) >> 8`; weights are then expected
    /// to be scaled by 256 (e.g. 54, 183, 19)
    pub use_integer_approximation: bool,
}

impl GrayscaleWeights {
    /// Integer weights matching the default float weights scaled by 256
    pub const INTEGER: GrayscaleWeights = GrayscaleWeights {
        red: 54.0,
        green: 183.0,
        blue: 19.0,
        use_integer_approximation: true,
    };
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        Self {
            red: 0.2126,
            green: 0.7152,
            blue: 0.0722,
            use_integer_approximation: false,
        }
    }
}

/// Options for [`crate::decode_image`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    /// Normal/inverted scanning policy
    pub inversion_attempts: InversionAttempts,
    /// Grayscale conversion weights
    pub grayscale_weights: GrayscaleWeights,
    /// Allow reusing an owned input buffer for intermediate planes.
    /// Never changes the result.
    pub can_overwrite_image: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            inversion_attempts: InversionAttempts::AttemptBoth,
            grayscale_weights: GrayscaleWeights::default(),
            can_overwrite_image: true,
        }
    }
}

impl DecodeOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inversion policy
    pub fn with_inversion_attempts(mut self, attempts: InversionAttempts) -> Self {
        self.inversion_attempts = attempts;
        self
    }

    /// Set the grayscale weights
    pub fn with_grayscale_weights(mut self, weights: GrayscaleWeights) -> Self {
        self.grayscale_weights = weights;
        self
    }

    /// Allow or forbid reuse of owned input buffers
    pub fn with_can_overwrite_image(mut self, can_overwrite: bool) -> Self {
        self.can_overwrite_image = can_overwrite;
        self
    }

    /// Defaults overridden by `QR_INVERSION_ATTEMPTS`, `QR_INTEGER_GRAYSCALE`
    /// and `QR_CAN_OVERWRITE_IMAGE`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let inversion_attempts = std::env::var("QR_INVERSION_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<InversionAttempts>().ok())
            .unwrap_or(defaults.inversion_attempts);
        let grayscale_weights = if parse_env_bool_u8("QR_INTEGER_GRAYSCALE", false) {
            GrayscaleWeights::INTEGER
        } else {
            defaults.grayscale_weights
        };
        Self {
            inversion_attempts,
            grayscale_weights,
            can_overwrite_image: parse_env_bool_u8(
                "QR_CAN_OVERWRITE_IMAGE",
                defaults.can_overwrite_image,
            ),
        }
    }
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MIN_PIXELS: OnceLock<usize> = OnceLock::new();

/// Images with at least this many pixels convert to grayscale on the rayon pool
pub(crate) fn parallel_min_pixels() -> usize {
    *PARALLEL_MIN_PIXELS.get_or_init(|| parse_env_usize("QR_PARALLEL_MIN_PIXELS", 640 * 480))
}
