//! Helpers for rendering encoded symbols into RGBA buffers.

#![allow(dead_code)]

use qr_scanner::utils::geometry::PerspectiveTransform;
use qr_scanner::{BitMatrix, Point};
use qrcode::{Color, QrCode};

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// An RGBA buffer with its dimensions
pub struct Rendered {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Module grid of an encoded symbol (true = dark)
pub fn modules(code: &QrCode) -> BitMatrix {
    let size = code.width();
    let mut matrix = BitMatrix::new(size, size);
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color == Color::Dark {
            matrix.set((i % size) as i32, (i / size) as i32, true);
        }
    }
    matrix
}

/// Quarter turn clockwise
pub fn rotate(matrix: &BitMatrix) -> BitMatrix {
    let size = matrix.width();
    let mut rotated = BitMatrix::new(size, size);
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            if matrix.get(x, y) {
                rotated.set(size as i32 - 1 - y, x, true);
            }
        }
    }
    rotated
}

/// Draw `matrix` with `scale` pixels per module and `quiet` light modules
/// of margin on every side
pub fn render_matrix(
    matrix: &BitMatrix,
    scale: usize,
    quiet: usize,
    dark: [u8; 3],
    light: [u8; 3],
) -> Rendered {
    let size = matrix.width();
    let side = (size + 2 * quiet) * scale;
    let mut pixels = Vec::with_capacity(side * side * 4);
    for py in 0..side {
        for px in 0..side {
            let mx = (px / scale) as i32 - quiet as i32;
            let my = (py / scale) as i32 - quiet as i32;
            let rgb = if matrix.get(mx, my) { dark } else { light };
            pixels.extend_from_slice(&rgb);
            pixels.push(255);
        }
    }
    Rendered {
        pixels,
        width: side,
        height: side,
    }
}

/// Black on white with a four-module quiet zone
pub fn render(code: &QrCode, scale: usize) -> Rendered {
    render_matrix(&modules(code), scale, 4, BLACK, WHITE)
}

/// Draw `matrix` plus `quiet` light modules of margin onto a white canvas,
/// warping the padded square onto `corners` (top-left, top-right,
/// bottom-right, bottom-left). Each pixel takes the module under its centre.
pub fn render_warped(
    matrix: &BitMatrix,
    quiet: usize,
    corners: [Point; 4],
    width: usize,
    height: usize,
) -> Rendered {
    let [tl, tr, br, bl] = corners;
    let to_square = PerspectiveTransform::quadrilateral_to_square(tl, tr, br, bl);
    let padded = (matrix.width() + 2 * quiet) as f64;
    let mut pixels = Vec::with_capacity(width * height * 4);
    for py in 0..height {
        for px in 0..width {
            let p = to_square.transform(px as f64 + 0.5, py as f64 + 0.5);
            let inside = (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y);
            let dark = inside && {
                let mx = (p.x * padded).floor() as i32 - quiet as i32;
                let my = (p.y * padded).floor() as i32 - quiet as i32;
                matrix.get(mx, my)
            };
            pixels.extend_from_slice(if dark { &BLACK } else { &WHITE });
            pixels.push(255);
        }
    }
    Rendered {
        pixels,
        width,
        height,
    }
}
