use crate::error::DecodeError;
use crate::models::BitMatrix;
use image::GenericImageView;
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    match env::var("QR_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGBA bytes along with its dimensions.
///
/// Images larger than `QR_MAX_DIM` on either side are scaled down first.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), DecodeError> {
    let img = image::open(path)?;
    let rgba = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgba8(),
        _ => img.to_rgba8(),
    };
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width as usize, height as usize))
}

/// Write a bit matrix as a black and white PNG (dark = black)
pub fn save_binary_png<P: AsRef<Path>>(matrix: &BitMatrix, path: P) -> Result<(), DecodeError> {
    let width = matrix.width() as u32;
    let height = matrix.height() as u32;
    let img = image::GrayImage::from_fn(width, height, |x, y| {
        let dark = matrix.get(x as i32, y as i32);
        image::Luma([if dark { 0 } else { 255 }])
    });
    img.save(path)?;
    Ok(())
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let black = binary.count_ones();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}
