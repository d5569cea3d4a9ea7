//! QR code detection modules
//!
//! This module finds a symbol in a binarized image:
//! - Row scanning for finder and alignment pattern centres
//! - Ratio scoring and grouping of finder candidates
//! - Dimension estimate and alignment pattern selection
//! - Perspective sampling of the module grid

/// Alignment pattern selection and dimension estimate
pub mod alignment;
/// Finder pattern candidates from row scanning
pub mod finder;
/// Run-length measurement and ratio scoring
pub mod runs;
/// Module grid sampling
pub mod transform;

use crate::models::{BitMatrix, Point, QRLocation};
use crate::utils::geometry::round_half_up;
use alignment::find_alignment_pattern;
use finder::{FinderDetector, Quad};

/// Finder centres in symbol orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderTriple {
    /// Corner finder
    pub top_left: Point,
    /// Finder along the first row
    pub top_right: Point,
    /// Finder along the first column
    pub bottom_left: Point,
}

/// Assign top-left, top-right and bottom-left roles to three finder centres.
///
/// The point opposite the longest side is top-left; the other two are
/// swapped if needed so that the triple has the reading orientation.
pub fn reorder_finder_patterns(pattern1: Point, pattern2: Point, pattern3: Point) -> FinderTriple {
    let one_two = pattern1.distance(&pattern2);
    let two_three = pattern2.distance(&pattern3);
    let one_three = pattern1.distance(&pattern3);

    let (mut bottom_left, top_left, mut top_right) =
        if two_three >= one_two && two_three >= one_three {
            (pattern2, pattern1, pattern3)
        } else if one_three >= two_three && one_three >= one_two {
            (pattern1, pattern2, pattern3)
        } else {
            (pattern1, pattern3, pattern2)
        };

    let cross = (top_right.x - top_left.x) * (bottom_left.y - top_left.y)
        - (top_right.y - top_left.y) * (bottom_left.x - top_left.x);
    if cross < 0.0 {
        std::mem::swap(&mut bottom_left, &mut top_right);
    }

    FinderTriple {
        top_left,
        top_right,
        bottom_left,
    }
}

/// Centre `p` on the dark run through it, first horizontally then vertically
pub fn recenter_location(matrix: &BitMatrix, p: Point) -> Point {
    let row = round_half_up(p.y) as i32;
    let column = round_half_up(p.x) as i32;

    let mut left_x = column;
    while matrix.get(left_x, row) {
        left_x -= 1;
    }
    let mut right_x = column;
    while matrix.get(right_x, row) {
        right_x += 1;
    }
    let x = (left_x + right_x) as f64 / 2.0;

    let column = round_half_up(x) as i32;
    let mut top_y = row;
    while matrix.get(column, top_y) {
        top_y -= 1;
    }
    let mut bottom_y = row;
    while matrix.get(column, bottom_y) {
        bottom_y += 1;
    }
    let y = (top_y + bottom_y) as f64 / 2.0;

    Point::new(x, y)
}

fn location_for(
    matrix: &BitMatrix,
    alignment_quads: &[Quad],
    finders: FinderTriple,
) -> Option<QRLocation> {
    let (alignment_pattern, dimension) = find_alignment_pattern(
        matrix,
        alignment_quads,
        finders.top_right,
        finders.top_left,
        finders.bottom_left,
    )?;
    Some(QRLocation {
        top_left: finders.top_left,
        top_right: finders.top_right,
        bottom_left: finders.bottom_left,
        alignment_pattern,
        dimension,
    })
}

/// Locate a symbol in a binarized image.
///
/// Returns up to two hypotheses: one from the quad centres, then one with
/// the finder centres re-centred on their dark runs. `None` when fewer than
/// three finder candidates exist or neither hypothesis yields a dimension.
pub fn locate(matrix: &BitMatrix) -> Option<Vec<QRLocation>> {
    let quads = FinderDetector::scan(matrix);
    let candidates = FinderDetector::score_candidates(matrix, &quads.finder);
    log::trace!(
        "{} finder quads, {} candidates, {} alignment quads",
        quads.finder.len(),
        candidates.len(),
        quads.alignment.len()
    );

    let [a, b, c] = FinderDetector::best_group(&candidates)?;
    let finders = reorder_finder_patterns(a, b, c);

    let mut locations = Vec::with_capacity(2);
    if let Some(location) = location_for(matrix, &quads.alignment, finders) {
        locations.push(location);
    }

    let recentered = FinderTriple {
        top_left: recenter_location(matrix, finders.top_left),
        top_right: recenter_location(matrix, finders.top_right),
        bottom_left: recenter_location(matrix, finders.bottom_left),
    };
    if let Some(location) = location_for(matrix, &quads.alignment, recentered) {
        locations.push(location);
    }

    log::debug!("located {} candidate symbol(s)", locations.len());
    (!locations.is_empty()).then_some(locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_finder(matrix: &mut BitMatrix, left: i32, top: i32) {
        matrix.set_region(left, top, 28, 28, true);
        matrix.set_region(left + 4, top + 4, 20, 20, false);
        matrix.set_region(left + 8, top + 8, 12, 12, true);
    }

    #[test]
    fn test_reorder_finder_patterns() {
        let tl = Point::new(10.0, 10.0);
        let tr = Point::new(50.0, 10.0);
        let bl = Point::new(10.0, 50.0);
        let expected = FinderTriple {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
        };
        assert_eq!(reorder_finder_patterns(tl, tr, bl), expected);
        assert_eq!(reorder_finder_patterns(bl, tl, tr), expected);
        assert_eq!(reorder_finder_patterns(tr, bl, tl), expected);
        assert_eq!(reorder_finder_patterns(bl, tr, tl), expected);
    }

    #[test]
    fn test_reorder_mirrored_layout() {
        // Transposed symbol: the finders swap roles
        let tl = Point::new(10.0, 10.0);
        let tr = Point::new(10.0, 50.0);
        let bl = Point::new(50.0, 10.0);
        let triple = reorder_finder_patterns(tl, tr, bl);
        assert_eq!(triple.top_left, tl);
        assert_eq!(triple.top_right, bl);
        assert_eq!(triple.bottom_left, tr);
    }

    #[test]
    fn test_recenter_location() {
        let mut matrix = BitMatrix::new(30, 30);
        matrix.set_region(10, 12, 6, 4, true);
        let p = recenter_location(&matrix, Point::new(11.2, 12.6));
        assert_eq!(p, Point::new(12.5, 13.5));
    }

    #[test]
    fn test_locate_three_finders() {
        let mut matrix = BitMatrix::new(100, 100);
        draw_finder(&mut matrix, 8, 8);
        draw_finder(&mut matrix, 64, 8);
        draw_finder(&mut matrix, 8, 64);

        let locations = locate(&matrix).unwrap();
        assert_eq!(locations.len(), 2);

        let first = locations[0];
        assert_eq!(first.top_left, Point::new(22.0, 22.0));
        assert_eq!(first.top_right, Point::new(78.0, 22.0));
        assert_eq!(first.bottom_left, Point::new(22.0, 78.0));
        assert_eq!(first.dimension, 21);

        let second = locations[1];
        assert_eq!(second.top_left, Point::new(21.5, 21.5));
        assert_eq!(second.dimension, 21);
    }

    #[test]
    fn test_locate_nothing() {
        let matrix = BitMatrix::new(64, 64);
        assert!(locate(&matrix).is_none());

        let mut two = BitMatrix::new(100, 60);
        draw_finder(&mut two, 8, 8);
        draw_finder(&mut two, 64, 8);
        assert!(locate(&two).is_none());
    }
}
