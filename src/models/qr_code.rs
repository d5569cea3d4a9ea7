use super::{BitMatrix, Chunk, Point};
use serde::Serialize;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// Level for a version-table column index (0=L, 1=M, 2=Q, 3=H)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ECLevel::L),
            1 => Some(ECLevel::M),
            2 => Some(ECLevel::Q),
            3 => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Column of this level in the version table
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Data mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (y/2 + x/3) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x+y)%2 + (x*y)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Get mask pattern from its 3-bit id
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(MaskPattern::Pattern0),
            1 => Some(MaskPattern::Pattern1),
            2 => Some(MaskPattern::Pattern2),
            3 => Some(MaskPattern::Pattern3),
            4 => Some(MaskPattern::Pattern4),
            5 => Some(MaskPattern::Pattern5),
            6 => Some(MaskPattern::Pattern6),
            7 => Some(MaskPattern::Pattern7),
            _ => None,
        }
    }

    /// Check if the module at column `x`, row `y` is flipped by this mask
    pub fn is_masked(&self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (y / 2 + x / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((x * y) % 2 + (x * y) % 3) == 0,
            MaskPattern::Pattern6 => (((x * y) % 2) + ((x * y) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((x + y) % 2) + ((x * y) % 3)) % 2 == 0,
        }
    }
}

/// Payload-level result of decoding a module matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedQr {
    /// Concatenated text of all segments
    pub text: String,
    /// Concatenated raw bytes of all segments
    pub bytes: Vec<u8>,
    /// Segments in stream order
    pub chunks: Vec<Chunk>,
    /// Symbol version (1-40)
    pub version: u8,
    /// Error correction level read from the format information
    pub error_correction: ECLevel,
    /// Data mask read from the format information
    pub mask: MaskPattern,
    /// Whether the matrix only decoded after transposing it
    pub mirrored: bool,
}

/// Points of a decoded symbol in source-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    /// Outer top-right corner
    pub top_right_corner: Point,
    /// Outer top-left corner
    pub top_left_corner: Point,
    /// Outer bottom-right corner
    pub bottom_right_corner: Point,
    /// Outer bottom-left corner
    pub bottom_left_corner: Point,
    /// Centre of the top-right finder pattern
    pub top_right_finder_pattern: Point,
    /// Centre of the top-left finder pattern
    pub top_left_finder_pattern: Point,
    /// Centre of the bottom-left finder pattern
    pub bottom_left_finder_pattern: Point,
    /// Centre of the alignment pattern (or its estimate)
    pub bottom_right_alignment_pattern: Point,
}

/// Detected and decoded QR code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QRCode {
    /// Raw decoded bytes
    pub binary_data: Vec<u8>,
    /// Decoded content as text
    pub data: String,
    /// Decoded segments
    pub chunks: Vec<Chunk>,
    /// QR code version (1-40)
    pub version: u8,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern used
    pub mask_pattern: MaskPattern,
    /// Corner, finder and alignment points in image coordinates
    pub location: CodeLocation,
    /// Sampled module matrix (true = dark)
    pub matrix: BitMatrix,
}
