//! Black/white run measurement along arbitrary lines, and ratio scoring of
//! finder and alignment candidates.

use crate::models::{BitMatrix, Point};

#[inline]
fn pixel(matrix: &BitMatrix, x: i64, y: i64) -> bool {
    match (i32::try_from(x), i32::try_from(y)) {
        (Ok(x), Ok(y)) => matrix.get(x, y),
        _ => false,
    }
}

/// Lengths of the first `length` alternating runs walking from `origin`
/// towards `end` (Bresenham). The first run is expected to be dark; missing
/// runs are reported as 0.
pub fn count_black_white_run_towards_point(
    origin: Point,
    end: Point,
    matrix: &BitMatrix,
    length: usize,
) -> Vec<f64> {
    let mut switch_points = vec![origin.floor()];
    let steep = (end.y - origin.y).abs() > (end.x - origin.x).abs();

    let (from_x, from_y, to_x, to_y) = if steep {
        (origin.y.floor(), origin.x.floor(), end.y.floor(), end.x.floor())
    } else {
        (origin.x.floor(), origin.y.floor(), end.x.floor(), end.y.floor())
    };
    let (from_x, from_y, to_x, to_y) = (from_x as i64, from_y as i64, to_x as i64, to_y as i64);

    let dx = (to_x - from_x).abs();
    let dy = (to_y - from_y).abs();
    let mut error = (-dx).div_euclid(2);
    let x_step = if from_x < to_x { 1 } else { -1 };
    let y_step = if from_y < to_y { 1 } else { -1 };

    let mut current_pixel = true;
    let mut x = from_x;
    let mut y = from_y;
    while x != to_x + x_step {
        let (real_x, real_y) = if steep { (y, x) } else { (x, y) };
        if pixel(matrix, real_x, real_y) != current_pixel {
            current_pixel = !current_pixel;
            switch_points.push(Point::new(real_x as f64, real_y as f64));
            if switch_points.len() == length + 1 {
                break;
            }
        }
        error += dy;
        if error > 0 {
            if y == to_y {
                break;
            }
            y += y_step;
            error -= dx;
        }
        x += x_step;
    }

    (0..length)
        .map(|i| match (switch_points.get(i), switch_points.get(i + 1)) {
            (Some(a), Some(b)) => a.distance(b),
            _ => 0.0,
        })
        .collect()
}

/// Runs through `origin` along the line towards `end`, measured in both
/// directions. The run containing `origin` sits in the middle of the result.
pub fn count_black_white_run(
    origin: Point,
    end: Point,
    matrix: &BitMatrix,
    length: usize,
) -> Vec<f64> {
    let rise = end.y - origin.y;
    let run = end.x - origin.x;
    let half = length.div_ceil(2);

    let towards_end = count_black_white_run_towards_point(origin, end, matrix, half);
    let away_from_end = count_black_white_run_towards_point(
        origin,
        Point::new(origin.x - run, origin.y - rise),
        matrix,
        half,
    );

    // Both halves include the origin pixel
    let middle = towards_end[0] + away_from_end[0] - 1.0;
    let mut runs = Vec::with_capacity(length);
    runs.extend_from_slice(&away_from_end[1..]);
    runs.push(middle);
    runs.extend_from_slice(&towards_end[1..]);
    runs
}

/// Average module size of a run and its squared deviation from `ratios`
fn score_black_white_run(sequence: &[f64], ratios: &[f64]) -> (f64, f64) {
    let average_size = sequence.iter().sum::<f64>() / ratios.iter().sum::<f64>();
    let error = ratios
        .iter()
        .zip(sequence)
        .map(|(ratio, run)| (run - ratio * average_size).powi(2))
        .sum();
    (average_size, error)
}

/// Score `point` against a run-length ratio pattern (e.g. `[1, 1, 3, 1, 1]`)
/// along the horizontal, vertical and both diagonal directions. Lower is
/// better; a degenerate measurement scores `f64::INFINITY`.
pub fn score_pattern(point: Point, ratios: &[f64], matrix: &BitMatrix) -> f64 {
    let length = ratios.len();
    let width = matrix.width() as f64;
    let height = matrix.height() as f64;

    let horizontal = count_black_white_run(point, Point::new(-1.0, point.y), matrix, length);
    let vertical = count_black_white_run(point, Point::new(point.x, -1.0), matrix, length);
    let top_left = Point::new(
        (point.x - point.y).max(0.0) - 1.0,
        (point.y - point.x).max(0.0) - 1.0,
    );
    let diagonal_down = count_black_white_run(point, top_left, matrix, length);
    let bottom_left = Point::new(
        width.min(point.x + point.y) + 1.0,
        height.min(point.y + point.x) + 1.0,
    );
    let diagonal_up = count_black_white_run(point, bottom_left, matrix, length);

    let scored = [
        score_black_white_run(&horizontal, ratios),
        score_black_white_run(&vertical, ratios),
        score_black_white_run(&diagonal_down, ratios),
        score_black_white_run(&diagonal_up, ratios),
    ];

    let ratio_error = scored
        .iter()
        .map(|(_, error)| error * error)
        .sum::<f64>()
        .sqrt();
    let average_size = scored.iter().map(|(size, _)| size).sum::<f64>() / 4.0;
    let size_error = scored
        .iter()
        .map(|(size, _)| (size - average_size).powi(2))
        .sum::<f64>()
        / average_size;

    let score = ratio_error + size_error;
    if score.is_nan() { f64::INFINITY } else { score }
}
