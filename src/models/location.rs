use super::Point;
use serde::Serialize;

/// A location hypothesis produced by the locator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QRLocation {
    /// Centre of the top-left finder pattern
    pub top_left: Point,
    /// Centre of the top-right finder pattern
    pub top_right: Point,
    /// Centre of the bottom-left finder pattern
    pub bottom_left: Point,
    /// Alignment pattern centre, or its extrapolated position
    pub alignment_pattern: Point,
    /// Modules per side
    pub dimension: usize,
}
