//! Adaptive regional binarization.
//!
//! The image is split into 8x8 regions. Each region gets a black point from
//! its luminance range, low-contrast regions borrow from their already
//! computed neighbours, and every pixel is thresholded against the mean of
//! the 5x5 block of region black points around it.

use crate::config::GrayscaleWeights;
use crate::error::{DecodeError, check_rgba_len};
use crate::models::BitMatrix;
use crate::utils::grayscale::{rgba_to_grayscale, rgba_to_grayscale_in_place};

const REGION_SIZE: usize = 8;
const MIN_DYNAMIC_RANGE: u8 = 24;
/// Pushes the threshold up so light holes inside finder patterns stay dark
const BLACK_BIAS: f64 = 1.11;

/// Output of the binarizer
#[derive(Debug, Clone)]
pub struct Binarized {
    /// Dark pixels set
    pub binarized: BitMatrix,
    /// Logical complement of `binarized`, when requested
    pub inverted: Option<BitMatrix>,
}

/// Binarize an RGBA buffer.
///
/// Fails with [`DecodeError::MalformedInput`] if `rgba.len() != width * height * 4`.
pub fn binarize(
    rgba: &[u8],
    width: usize,
    height: usize,
    want_inverted: bool,
    weights: &GrayscaleWeights,
) -> Result<Binarized, DecodeError> {
    check_rgba_len(rgba.len(), width, height)?;
    let gray = rgba_to_grayscale(rgba, width, height, weights);
    Ok(binarize_luminance(&gray, width, height, want_inverted))
}

/// Binarize an owned RGBA buffer, reusing its allocation for the luminance plane
pub fn binarize_owned(
    rgba: Vec<u8>,
    width: usize,
    height: usize,
    want_inverted: bool,
    weights: &GrayscaleWeights,
) -> Result<Binarized, DecodeError> {
    check_rgba_len(rgba.len(), width, height)?;
    let gray = rgba_to_grayscale_in_place(rgba, width, height, weights);
    Ok(binarize_luminance(&gray, width, height, want_inverted))
}

/// Store a threshold the way a clamped byte buffer would
#[inline]
fn clamp_to_byte(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0).round_ties_even() as u8
    }
}

/// Per-region black points, row-major over `h_regions x v_regions`
fn region_black_points(
    gray: &[u8],
    width: usize,
    height: usize,
    h_regions: usize,
    v_regions: usize,
) -> Vec<u8> {
    let mut black_points = vec![0u8; h_regions * v_regions];

    for vr in 0..v_regions {
        for hr in 0..h_regions {
            let mut min = u8::MAX;
            let mut max = u8::MIN;
            // A region overhanging the right or bottom edge only reads the
            // pixels inside the image; nothing wraps into the next row.
            let y_end = ((vr + 1) * REGION_SIZE).min(height);
            let x_end = ((hr + 1) * REGION_SIZE).min(width);
            for y in vr * REGION_SIZE..y_end {
                for &lum in &gray[y * width + hr * REGION_SIZE..y * width + x_end] {
                    min = min.min(lum);
                    max = max.max(lum);
                }
            }

            let mut average = ((min as f64 + max as f64) / 2.0 * BLACK_BIAS).min(255.0);
            if max - min <= MIN_DYNAMIC_RANGE {
                // Uniform region: assume background unless the neighbours say otherwise
                average = min as f64 / 2.0;

                if vr > 0 && hr > 0 {
                    let top = black_points[(vr - 1) * h_regions + hr] as f64;
                    let left = black_points[vr * h_regions + hr - 1] as f64;
                    let top_left = black_points[(vr - 1) * h_regions + hr - 1] as f64;
                    let neighbour_average = (top + 2.0 * left + top_left) / 4.0;
                    if (min as f64) < neighbour_average {
                        average = neighbour_average;
                    }
                }
            }
            black_points[vr * h_regions + hr] = clamp_to_byte(average);
        }
    }

    black_points
}

/// Centre of the 5x5 window for region `index`, kept two regions away from the edges
#[inline]
fn window_center(index: usize, count: usize) -> usize {
    // Fewer than five regions on an axis: the window stays on the region
    // and its reads are clamped to the grid, so small images still get a
    // threshold from their own content rather than coming out white.
    if count < 5 {
        index
    } else {
        index.clamp(2, count - 3)
    }
}

/// Binarize a luminance plane (`width * height` bytes)
pub fn binarize_luminance(
    gray: &[u8],
    width: usize,
    height: usize,
    want_inverted: bool,
) -> Binarized {
    let h_regions = width.div_ceil(REGION_SIZE);
    let v_regions = height.div_ceil(REGION_SIZE);
    let black_points = region_black_points(gray, width, height, h_regions, v_regions);

    let mut binarized = BitMatrix::new(width, height);
    let mut inverted = want_inverted.then(|| BitMatrix::new(width, height));

    for vr in 0..v_regions {
        for hr in 0..h_regions {
            let left = window_center(hr, h_regions) as i64;
            let top = window_center(vr, v_regions) as i64;
            let mut sum = 0u32;
            for dx in -2..=2i64 {
                for dy in -2..=2i64 {
                    let rx = (left + dx).clamp(0, h_regions as i64 - 1) as usize;
                    let ry = (top + dy).clamp(0, v_regions as i64 - 1) as usize;
                    sum += black_points[ry * h_regions + rx] as u32;
                }
            }
            let threshold = sum as f64 / 25.0;

            let y_end = ((vr + 1) * REGION_SIZE).min(height);
            let x_end = ((hr + 1) * REGION_SIZE).min(width);
            for y in vr * REGION_SIZE..y_end {
                for x in hr * REGION_SIZE..x_end {
                    let dark = gray[y * width + x] as f64 <= threshold;
                    binarized.set(x as i32, y as i32, dark);
                    if let Some(inv) = inverted.as_mut() {
                        inv.set(x as i32, y as i32, !dark);
                    }
                }
            }
        }
    }

    log::trace!(
        "binarized {}x{} image over {}x{} regions",
        width,
        height,
        h_regions,
        v_regions
    );

    Binarized {
        binarized,
        inverted,
    }
}
