/// Symbol dimension estimate and alignment pattern selection
use super::finder::Quad;
use super::runs::{count_black_white_run, score_pattern};
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::round_half_up;

const ALIGNMENT_RATIOS: [f64; 3] = [1.0, 1.0, 1.0];
/// Below this many modules between finder centres the symbol is version 1
const MIN_MODULES_FOR_ALIGNMENT: f64 = 15.0;

/// Estimate the module size from the finder runs and the modules per side
/// from the finder spacing. Returns `(dimension, module_size)`, or `None`
/// when the module size is below one pixel.
pub fn compute_dimension(
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    matrix: &BitMatrix,
) -> Option<(usize, f64)> {
    let run_module = |from: Point, to: Point| {
        count_black_white_run(from, to, matrix, 5).iter().sum::<f64>() / 7.0
    };
    let module_size = (run_module(top_left, bottom_left)
        + run_module(top_left, top_right)
        + run_module(bottom_left, top_left)
        + run_module(top_right, top_left))
        / 4.0;

    if !(module_size >= 1.0) {
        return None;
    }

    let top_dimension = round_half_up(top_left.distance(&top_right) / module_size) as i64;
    let side_dimension = round_half_up(top_left.distance(&bottom_left) / module_size) as i64;
    let mut dimension = (top_dimension + side_dimension).div_euclid(2) + 7;
    match dimension.rem_euclid(4) {
        0 => dimension += 1,
        2 => dimension -= 1,
        _ => {}
    }
    usize::try_from(dimension).ok().map(|d| (d, module_size))
}

/// Pick the alignment pattern for a finder triple.
///
/// The expected position lies three modules in from the extrapolated
/// bottom-right finder centre. Candidate quads are scored by their 1:1:1
/// ratio error plus distance to that position; symbols too small to carry an
/// alignment pattern use the expected position directly.
/// Returns `(alignment_pattern, dimension)`.
pub fn find_alignment_pattern(
    matrix: &BitMatrix,
    alignment_quads: &[Quad],
    top_right: Point,
    top_left: Point,
    bottom_left: Point,
) -> Option<(Point, usize)> {
    let (dimension, module_size) = compute_dimension(top_left, top_right, bottom_left, matrix)?;

    let bottom_right_finder = Point::new(
        top_right.x - top_left.x + bottom_left.x,
        top_right.y - top_left.y + bottom_left.y,
    );
    let modules_between =
        (top_left.distance(&bottom_left) + top_left.distance(&top_right)) / 2.0 / module_size;
    let correction = 1.0 - 3.0 / modules_between;
    let expected = Point::new(
        top_left.x + correction * (bottom_right_finder.x - top_left.x),
        top_left.y + correction * (bottom_right_finder.y - top_left.y),
    );

    let mut candidates: Vec<(f64, Point)> = alignment_quads
        .iter()
        .filter_map(|quad| {
            let center = quad.center();
            let pixel = center.floor();
            if !matrix.get(pixel.x as i32, pixel.y as i32) {
                return None;
            }
            let score = score_pattern(pixel, &ALIGNMENT_RATIOS, matrix) + center.distance(&expected);
            Some((score, center))
        })
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    let alignment = match candidates.first() {
        Some(&(_, best)) if modules_between >= MIN_MODULES_FOR_ALIGNMENT => best,
        _ => expected,
    };
    log::trace!(
        "dimension {} module size {:.2} alignment ({:.1}, {:.1})",
        dimension,
        module_size,
        alignment.x,
        alignment.y
    );
    Some((alignment, dimension))
}
