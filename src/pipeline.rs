//! Locate, extract and decode over every hypothesis of a binarized image.

use crate::config::InversionAttempts;
use crate::decoder::qr_decoder::QrDecoder;
use crate::detector::locate;
use crate::detector::transform::extract;
use crate::models::{BitMatrix, CodeLocation, QRCode};
use crate::utils::binarization::Binarized;

/// Decode the first location hypothesis of `matrix` that yields a symbol
pub fn scan(matrix: &BitMatrix) -> Option<QRCode> {
    let locations = locate(matrix)?;

    for location in locations {
        let extracted = extract(matrix, &location);
        let Some(decoded) = QrDecoder::decode(&extracted.matrix) else {
            continue;
        };

        let d = location.dimension as f64;
        let code_location = CodeLocation {
            top_right_corner: extracted.mapping(d, 0.0),
            top_left_corner: extracted.mapping(0.0, 0.0),
            bottom_right_corner: extracted.mapping(d, d),
            bottom_left_corner: extracted.mapping(0.0, d),
            top_right_finder_pattern: location.top_right,
            top_left_finder_pattern: location.top_left,
            bottom_left_finder_pattern: location.bottom_left,
            bottom_right_alignment_pattern: location.alignment_pattern,
        };
        let matrix = if decoded.mirrored {
            extracted.matrix.transposed()
        } else {
            extracted.matrix
        };

        log::debug!(
            "decoded version {} {:?} symbol with {} chunk(s)",
            decoded.version,
            decoded.error_correction,
            decoded.chunks.len()
        );
        return Some(QRCode {
            binary_data: decoded.bytes,
            data: decoded.text,
            chunks: decoded.chunks,
            version: decoded.version,
            error_correction: decoded.error_correction,
            mask_pattern: decoded.mask,
            location: code_location,
            matrix,
        });
    }

    None
}

/// Scan the normal and inverted grids in the order `attempts` asks for.
///
/// The second grid is only scanned when the first yields nothing and the
/// policy allows both.
pub fn run(grids: &Binarized, attempts: InversionAttempts) -> Option<QRCode> {
    let normal = Some(&grids.binarized);
    let inverted = grids.inverted.as_ref();
    let (first, second) = if attempts.inverted_first() {
        (inverted, normal)
    } else {
        (normal, inverted)
    };

    if let Some(code) = first.and_then(scan) {
        return Some(code);
    }
    if attempts.tries_both() {
        log::debug!("first grid yielded nothing, scanning the other");
        return second.and_then(scan);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: [&str; 21] = [
        "#######.....#.#######",
        "#.....#..#....#.....#",
        "#.###.#...##..#.###.#",
        "#.###.#...#...#.###.#",
        "#.###.#..####.#.###.#",
        "#.....#.#.#...#.....#",
        "#######.#.#.#.#######",
        ".........#...........",
        "#..#.##.######.#.....",
        "###.#..##..#.#.#.##..",
        "#..#.####.##..###...#",
        "..#.#..#....#####....",
        "..#...##.#.#.###.##..",
        "........#.#..####.##.",
        "#######...###.#.####.",
        "#.....#.#.....##....#",
        "#.###.#..##.###..#.##",
        "#.###.#.#.#..####..##",
        "#.###.#..###.###.#..#",
        "#.....#..####..##..#.",
        "#######.###..#.###...",
    ];

    /// Golden symbol at 4 pixels per module with a 4-module quiet zone
    fn rendered_golden() -> (BitMatrix, BitMatrix) {
        let modules = BitMatrix::from_rows(&GOLDEN);
        let scale = 4;
        let margin = 16;
        let size = 21 * scale + 2 * margin;
        let mut image = BitMatrix::new(size as usize, size as usize);
        for y in 0..21 {
            for x in 0..21 {
                if modules.get(x, y) {
                    image.set_region(margin + x * scale, margin + y * scale, scale, scale, true);
                }
            }
        }
        (modules, image)
    }

    #[test]
    fn test_scan_rendered_symbol() {
        let (modules, image) = rendered_golden();
        let code = scan(&image).unwrap();
        assert_eq!(code.data, "4376471154038");
        assert_eq!(code.version, 1);
        assert_eq!(code.matrix, modules);

        let location = code.location;
        assert!((location.top_left_finder_pattern.x - 30.0).abs() <= 0.5);
        assert!((location.top_left_finder_pattern.y - 30.0).abs() <= 0.5);
        assert!((location.top_left_corner.x - 16.0).abs() < 1e-6);
        assert!((location.top_left_corner.y - 16.0).abs() < 1e-6);
        assert!((location.bottom_right_corner.x - 100.0).abs() < 1e-6);
        assert!((location.bottom_right_corner.y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_inversion_order() {
        let (_, image) = rendered_golden();
        let dark_on_light = Binarized {
            binarized: image.clone(),
            inverted: Some(image.inverted()),
        };
        let light_on_dark = Binarized {
            binarized: image.inverted(),
            inverted: Some(image.clone()),
        };

        assert!(run(&dark_on_light, InversionAttempts::DontInvert).is_some());
        assert!(run(&dark_on_light, InversionAttempts::AttemptBoth).is_some());
        assert!(run(&dark_on_light, InversionAttempts::InvertFirst).is_some());
        assert!(run(&dark_on_light, InversionAttempts::OnlyInvert).is_none());

        assert!(run(&light_on_dark, InversionAttempts::DontInvert).is_none());
        assert!(run(&light_on_dark, InversionAttempts::OnlyInvert).is_some());
        assert!(run(&light_on_dark, InversionAttempts::AttemptBoth).is_some());
    }

    #[test]
    fn test_scan_empty() {
        assert!(scan(&BitMatrix::new(80, 80)).is_none());
        let grids = Binarized {
            binarized: BitMatrix::new(80, 80),
            inverted: None,
        };
        assert!(run(&grids, InversionAttempts::AttemptBoth).is_none());
    }
}
