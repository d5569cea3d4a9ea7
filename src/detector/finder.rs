/// Finder and alignment pattern candidates from 1:1:3:1:1 / 1:1:1 row scanning
use super::runs::score_pattern;
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::round_half_up;

const MAX_FINDER_PATTERNS_TO_SEARCH: usize = 5;
const MIN_QUAD_RATIO: f64 = 0.5;
const MAX_QUAD_RATIO: f64 = 1.5;
const FINDER_RATIOS: [f64; 5] = [1.0, 1.0, 3.0, 1.0, 1.0];

/// Centre run of a pattern on one row; `end_x` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// First dark pixel
    pub start_x: i32,
    /// First light pixel after the run
    pub end_x: i32,
    /// Row
    pub y: i32,
}

/// Vertically stacked centre runs of one pattern candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    /// First row
    pub top: Line,
    /// Most recent row
    pub bottom: Line,
}

impl Quad {
    fn new(line: Line) -> Self {
        Self {
            top: line,
            bottom: line,
        }
    }

    /// Mean of the four run endpoints, and the middle row
    pub fn center(&self) -> Point {
        let x = (self.top.start_x + self.top.end_x + self.bottom.start_x + self.bottom.end_x)
            as f64
            / 4.0;
        let y = (self.top.y + self.bottom.y + 1) as f64 / 2.0;
        Point::new(x, y)
    }

    /// Number of rows spanned, minus one
    pub fn height(&self) -> i32 {
        self.bottom.y - self.top.y
    }

    /// Whether a run on the next row continues this quad
    fn accepts(&self, start_x: i32, end_x: i32, center_run: i32) -> bool {
        let bottom = self.bottom;
        let ratio = center_run as f64 / (bottom.end_x - bottom.start_x) as f64;
        (start_x >= bottom.start_x && start_x <= bottom.end_x)
            || (end_x >= bottom.start_x && start_x <= bottom.end_x)
            || (start_x <= bottom.start_x
                && end_x >= bottom.end_x
                && ratio < MAX_QUAD_RATIO
                && ratio > MIN_QUAD_RATIO)
    }
}

/// Closed quads found by a full row scan
#[derive(Debug, Clone, Default)]
pub struct QuadScan {
    /// Finder centre quads at least three rows tall
    pub finder: Vec<Quad>,
    /// Alignment centre quads
    pub alignment: Vec<Quad>,
}

/// Scored finder pattern candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    /// Quad centre
    pub center: Point,
    /// Mean of the top width, bottom width and height of the centre square
    pub size: f64,
    /// Ratio score, lower is better
    pub score: f64,
}

/// Row-scanning finder pattern detector
pub struct FinderDetector;

impl FinderDetector {
    /// Scan every row (and one virtual row/column of padding past each edge)
    /// for finder and alignment centre runs, stacking them into quads.
    pub fn scan(matrix: &BitMatrix) -> QuadScan {
        let width = matrix.width() as i32;
        let height = matrix.height() as i32;
        let mut scan = QuadScan::default();
        let mut active_finder: Vec<Quad> = Vec::new();
        let mut active_alignment: Vec<Quad> = Vec::new();

        for y in 0..=height {
            let mut length = 0i32;
            let mut last_bit = false;
            let mut scans = [0i32; 5];

            for x in -1..=width {
                let v = matrix.get(x, y);
                if v == last_bit {
                    length += 1;
                    continue;
                }
                scans.rotate_left(1);
                scans[4] = length;
                length = 1;
                last_bit = v;

                // Finder patterns are bordered in white, alignment patterns in black
                if !v && Self::is_finder_run(&scans) {
                    let end_x = x - scans[3] - scans[4];
                    let start_x = end_x - scans[2];
                    Self::extend_or_open(&mut active_finder, Line { start_x, end_x, y }, scans[2]);
                }
                if v && Self::is_alignment_run(&scans) {
                    let end_x = x - scans[4];
                    let start_x = end_x - scans[3];
                    Self::extend_or_open(
                        &mut active_alignment,
                        Line { start_x, end_x, y },
                        scans[2],
                    );
                }
            }

            let (open, closed): (Vec<Quad>, Vec<Quad>) = std::mem::take(&mut active_finder)
                .into_iter()
                .partition(|q| q.bottom.y == y);
            scan.finder.extend(closed.into_iter().filter(|q| q.height() >= 2));
            active_finder = open;

            let (open, closed): (Vec<Quad>, Vec<Quad>) = std::mem::take(&mut active_alignment)
                .into_iter()
                .partition(|q| q.bottom.y == y);
            scan.alignment.extend(closed);
            active_alignment = open;
        }

        scan.finder
            .extend(active_finder.into_iter().filter(|q| q.height() >= 2));
        scan.alignment.extend(active_alignment);
        scan
    }

    /// Last five runs match 1:1:3:1:1
    fn is_finder_run(scans: &[i32; 5]) -> bool {
        let average = scans.iter().sum::<i32>() as f64 / 7.0;
        let near = |run: i32, expected: f64| (run as f64 - expected).abs() < expected;
        near(scans[0], average)
            && near(scans[1], average)
            && near(scans[2], 3.0 * average)
            && near(scans[3], average)
            && near(scans[4], average)
    }

    /// Last three runs match 1:1:1
    fn is_alignment_run(scans: &[i32; 5]) -> bool {
        let average = (scans[2] + scans[3] + scans[4]) as f64 / 3.0;
        scans[2..]
            .iter()
            .all(|&run| (run as f64 - average).abs() < average)
    }

    fn extend_or_open(active: &mut Vec<Quad>, line: Line, center_run: i32) {
        match active
            .iter_mut()
            .find(|q| q.accepts(line.start_x, line.end_x, center_run))
        {
            Some(quad) => quad.bottom = line,
            None => active.push(Quad::new(line)),
        }
    }

    /// Score finder quads whose centre lands on a dark pixel, best first
    pub fn score_candidates(matrix: &BitMatrix, quads: &[Quad]) -> Vec<FinderPattern> {
        let mut candidates: Vec<FinderPattern> = quads
            .iter()
            .filter(|q| q.height() >= 2)
            .filter_map(|quad| {
                let center = quad.center();
                let rounded = Point::new(round_half_up(center.x), round_half_up(center.y));
                if !matrix.get(rounded.x as i32, rounded.y as i32) {
                    return None;
                }
                let size = ((quad.top.end_x - quad.top.start_x)
                    + (quad.bottom.end_x - quad.bottom.start_x)
                    + (quad.height() + 1)) as f64
                    / 3.0;
                let score = score_pattern(rounded, &FINDER_RATIOS, matrix);
                Some(FinderPattern {
                    center,
                    size,
                    score,
                })
            })
            .collect();
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        candidates
    }

    /// Pick the three candidates that best form one symbol: each of the top
    /// few candidates is paired with the two others closest to it in score
    /// and size, and the lowest combined score wins.
    pub fn best_group(candidates: &[FinderPattern]) -> Option<[Point; 3]> {
        if candidates.len() < 3 {
            return None;
        }

        (0..candidates.len().min(MAX_FINDER_PATTERNS_TO_SEARCH))
            .map(|i| {
                let point = &candidates[i];
                let mut others: Vec<(f64, Point)> = candidates
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| {
                        let size_penalty = (other.size - point.size).powi(2) / point.size;
                        (other.score + size_penalty, other.center)
                    })
                    .collect();
                others.sort_by(|a, b| a.0.total_cmp(&b.0));
                let score = point.score + others[0].0 + others[1].0;
                (score, [point.center, others[0].1, others[1].1])
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, points)| points)
    }
}
