//! Rendered symbols decoded through the full pipeline.

mod common;

use common::{BLACK, WHITE, modules, render, render_matrix, render_warped, rotate};
use qr_scanner::utils::geometry::PerspectiveTransform;
use qr_scanner::{
    Chunk, DecodeError, DecodeOptions, Decoder, EciAssignment, Frame, FrameScanner,
    GrayscaleWeights, InversionAttempts, Point, QRCode, decode_batch, decode_image, decode_image_owned,
};
use qrcode::bits::Bits;
use qrcode::{EcLevel, QrCode, Version};

fn decode(pixels: &[u8], width: usize, height: usize) -> Option<QRCode> {
    decode_image(pixels, width, height, &DecodeOptions::default()).unwrap()
}

fn decode_with(
    pixels: &[u8],
    width: usize,
    height: usize,
    inversion: InversionAttempts,
) -> Option<QRCode> {
    let options = DecodeOptions::default().with_inversion_attempts(inversion);
    decode_image(pixels, width, height, &options).unwrap()
}

fn assert_close(actual: f64, expected: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= 1.0,
        "{}: expected {}, got {}",
        label,
        expected,
        actual
    );
}

#[test]
fn test_numeric_segment() {
    let mut bits = Bits::new(Version::Normal(1));
    bits.push_numeric_data(b"0123456789").unwrap();
    bits.push_terminator(EcLevel::M).unwrap();
    let code = QrCode::with_bits(bits, EcLevel::M).unwrap();

    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "0123456789");
    assert_eq!(qr.binary_data, b"0123456789".to_vec());
    assert_eq!(
        qr.chunks,
        vec![Chunk::Numeric {
            text: "0123456789".to_string()
        }]
    );
    assert_eq!(qr.version, 1);
    assert_eq!(qr.matrix, modules(&code));
}

#[test]
fn test_alphanumeric_segment() {
    let mut bits = Bits::new(Version::Normal(1));
    bits.push_alphanumeric_data(b"HELLO WORLD $%*+-./:").unwrap();
    bits.push_terminator(EcLevel::L).unwrap();
    let code = QrCode::with_bits(bits, EcLevel::L).unwrap();

    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "HELLO WORLD $%*+-./:");
    assert_eq!(
        qr.chunks,
        vec![Chunk::Alphanumeric {
            text: "HELLO WORLD $%*+-./:".to_string()
        }]
    );
    assert_eq!(qr.error_correction, qr_scanner::ECLevel::L);
}

#[test]
fn test_byte_segment() {
    let mut bits = Bits::new(Version::Normal(1));
    bits.push_byte_data(b"Test").unwrap();
    bits.push_terminator(EcLevel::H).unwrap();
    let code = QrCode::with_bits(bits, EcLevel::H).unwrap();

    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "Test");
    assert_eq!(qr.binary_data, vec![84, 101, 115, 116]);
    assert_eq!(
        qr.chunks,
        vec![Chunk::Byte {
            bytes: vec![84, 101, 115, 116],
            text: "Test".to_string()
        }]
    );
    assert_eq!(qr.error_correction, qr_scanner::ECLevel::H);
}

#[test]
fn test_kanji_segment() {
    let mut bits = Bits::new(Version::Normal(1));
    bits.push_kanji_data(b"\x93\x5f\xe4\xaa").unwrap();
    bits.push_terminator(EcLevel::M).unwrap();
    let code = QrCode::with_bits(bits, EcLevel::M).unwrap();

    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "点茗");
    assert_eq!(qr.binary_data, vec![0x93, 0x5f, 0xe4, 0xaa]);
    assert_eq!(
        qr.chunks,
        vec![Chunk::Kanji {
            bytes: vec![0x93, 0x5f, 0xe4, 0xaa],
            text: "点茗".to_string()
        }]
    );
}

#[test]
fn test_mixed_segments_with_eci() {
    let mut bits = Bits::new(Version::Normal(2));
    bits.push_eci_designator(26).unwrap();
    bits.push_numeric_data(b"0123").unwrap();
    bits.push_alphanumeric_data(b"AB-C").unwrap();
    bits.push_byte_data("é!".as_bytes()).unwrap();
    bits.push_terminator(EcLevel::Q).unwrap();
    let code = QrCode::with_bits(bits, EcLevel::Q).unwrap();

    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "0123AB-Cé!");
    assert_eq!(qr.version, 2);
    assert_eq!(
        qr.chunks,
        vec![
            Chunk::Eci {
                assignment: EciAssignment::Number(26)
            },
            Chunk::Numeric {
                text: "0123".to_string()
            },
            Chunk::Alphanumeric {
                text: "AB-C".to_string()
            },
            Chunk::Byte {
                bytes: vec![0xc3, 0xa9, b'!'],
                text: "é!".to_string()
            },
        ]
    );
}

#[test]
fn test_version_info_symbol() {
    let text = "https://example.com/some/longer/path?with=query&and=more#fragment";
    let code = QrCode::with_version(text, Version::Normal(7), EcLevel::M).unwrap();
    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, text);
    assert_eq!(qr.version, 7);
    assert_eq!(qr.matrix.width(), 45);
}

#[test]
fn test_largest_version() {
    let text: String = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
        .repeat(30)
        .chars()
        .take(1500)
        .collect();
    let code = QrCode::with_version(&text, Version::Normal(40), EcLevel::L).unwrap();
    let image = render(&code, 3);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.version, 40);
    assert_eq!(qr.matrix.width(), 177);
    assert_eq!(qr.data, text);

    // 12px margin, 3px modules
    let loc = &qr.location;
    assert_close(loc.top_left_corner.x, 12.0, "top-left x");
    assert_close(loc.top_left_corner.y, 12.0, "top-left y");
    assert_close(loc.bottom_right_corner.x, 543.0, "bottom-right x");
    assert_close(loc.bottom_right_corner.y, 543.0, "bottom-right y");
}

#[test]
fn test_location_of_scaled_render() {
    let code = QrCode::with_error_correction_level("scaled", EcLevel::M).unwrap();
    let size = code.width();
    let image = render(&code, 5);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();

    let start = 20.0;
    let end = start + (size * 5) as f64;
    let loc = &qr.location;
    assert_close(loc.top_left_corner.x, start, "top-left x");
    assert_close(loc.top_left_corner.y, start, "top-left y");
    assert_close(loc.top_right_corner.x, end, "top-right x");
    assert_close(loc.top_right_corner.y, start, "top-right y");
    assert_close(loc.bottom_left_corner.x, start, "bottom-left x");
    assert_close(loc.bottom_left_corner.y, end, "bottom-left y");
    assert_close(loc.bottom_right_corner.x, end, "bottom-right x");
    assert_close(loc.bottom_right_corner.y, end, "bottom-right y");

    // Finder centres sit 3.5 modules in from the corners
    assert_close(loc.top_left_finder_pattern.x, start + 17.5, "finder x");
    assert_close(loc.top_left_finder_pattern.y, start + 17.5, "finder y");
    assert_close(loc.top_right_finder_pattern.x, end - 17.5, "top-right finder x");
    assert_close(loc.bottom_left_finder_pattern.y, end - 17.5, "bottom-left finder y");
}

#[test]
fn test_perspective_warped_symbol() {
    let text = "tilted away from the camera";
    let code = QrCode::with_version(text, Version::Normal(7), EcLevel::M).unwrap();
    let original = modules(&code);
    let corners = [
        Point::new(40.0, 30.0),
        Point::new(360.0, 62.0),
        Point::new(338.0, 372.0),
        Point::new(28.0, 338.0),
    ];
    let image = render_warped(&original, 4, corners, 400, 400);

    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, text);
    assert_eq!(qr.version, 7);
    assert_eq!(qr.matrix.width(), original.width());

    // The padded square is 53 modules; the symbol spans 4..49 of them.
    // Modules are about 6px here, so allow half a module.
    let to_image = PerspectiveTransform::square_to_quadrilateral(
        corners[0], corners[1], corners[2], corners[3],
    );
    let (near, far) = (4.0 / 53.0, 49.0 / 53.0);
    let expected = [
        (qr.location.top_left_corner, to_image.transform(near, near), "top-left"),
        (qr.location.top_right_corner, to_image.transform(far, near), "top-right"),
        (qr.location.bottom_right_corner, to_image.transform(far, far), "bottom-right"),
        (qr.location.bottom_left_corner, to_image.transform(near, far), "bottom-left"),
    ];
    for (actual, want, label) in expected {
        assert!(
            actual.distance(&want) <= 3.0,
            "{}: expected ({:.2}, {:.2}), got ({:.2}, {:.2})",
            label,
            want.x,
            want.y,
            actual.x,
            actual.y
        );
    }
}

#[test]
fn test_inverted_image() {
    let code = QrCode::new("inverted colours").unwrap();
    let image = render_matrix(&modules(&code), 4, 4, WHITE, BLACK);

    for inversion in [
        InversionAttempts::AttemptBoth,
        InversionAttempts::InvertFirst,
        InversionAttempts::OnlyInvert,
    ] {
        let qr = decode_with(&image.pixels, image.width, image.height, inversion)
            .unwrap_or_else(|| panic!("{:?} should decode", inversion));
        assert_eq!(qr.data, "inverted colours");
    }
    assert!(
        decode_with(
            &image.pixels,
            image.width,
            image.height,
            InversionAttempts::DontInvert
        )
        .is_none()
    );
}

#[test]
fn test_only_invert_skips_normal_image() {
    let code = QrCode::new("normal colours").unwrap();
    let image = render(&code, 4);
    assert!(
        decode_with(
            &image.pixels,
            image.width,
            image.height,
            InversionAttempts::OnlyInvert
        )
        .is_none()
    );
    let qr = decode_with(
        &image.pixels,
        image.width,
        image.height,
        InversionAttempts::DontInvert,
    )
    .unwrap();
    assert_eq!(qr.data, "normal colours");
}

#[test]
fn test_mirrored_image() {
    let code = QrCode::new("mirror image").unwrap();
    let original = modules(&code);
    let image = render_matrix(&original.transposed(), 4, 4, BLACK, WHITE);

    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(qr.data, "mirror image");
    assert_eq!(qr.matrix, original);
}

#[test]
fn test_rotated_image() {
    let code = QrCode::new("quarter turn").unwrap();
    let original = modules(&code);
    let mut rotated = original.clone();
    for turns in 1..4 {
        rotated = rotate(&rotated);
        let image = render_matrix(&rotated, 4, 4, BLACK, WHITE);
        let qr = decode(&image.pixels, image.width, image.height)
            .unwrap_or_else(|| panic!("{} turns should decode", turns));
        assert_eq!(qr.data, "quarter turn");
        assert_eq!(qr.matrix, original);
    }
}

#[test]
fn test_coloured_image_with_integer_weights() {
    let code = QrCode::new("navy on cream").unwrap();
    let image = render_matrix(&modules(&code), 4, 4, [0, 0, 128], [255, 255, 200]);

    let float = decode(&image.pixels, image.width, image.height).unwrap();
    let options = DecodeOptions::default().with_grayscale_weights(GrayscaleWeights::INTEGER);
    let integer = decode_image(&image.pixels, image.width, image.height, &options)
        .unwrap()
        .unwrap();
    assert_eq!(float.data, "navy on cream");
    assert_eq!(integer.data, float.data);
}

#[test]
fn test_noise_has_no_code() {
    let (width, height) = (120, 90);
    let mut state = 0x2545_f491u32;
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let value = (state & 0xff) as u8;
        pixels.extend_from_slice(&[value, value, value, 255]);
    }
    assert!(decode(&pixels, width, height).is_none());
}

#[test]
fn test_missing_finder_has_no_code() {
    let code = QrCode::new("three finders needed").unwrap();
    let mut matrix = modules(&code);
    matrix.set_region(0, 0, 8, 8, false);
    let image = render_matrix(&matrix, 4, 4, BLACK, WHITE);
    assert!(decode(&image.pixels, image.width, image.height).is_none());
}

#[test]
fn test_decode_is_deterministic() {
    let code = QrCode::new("same answer twice").unwrap();
    let image = render(&code, 3);
    let first = decode(&image.pixels, image.width, image.height).unwrap();
    let second = decode(&image.pixels, image.width, image.height).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_owned_decode_matches_borrowed() {
    let code = QrCode::new("owned buffer").unwrap();
    let image = render(&code, 4);
    let options = DecodeOptions::default().with_can_overwrite_image(true);
    let borrowed = decode_image(&image.pixels, image.width, image.height, &options).unwrap();
    let owned = decode_image_owned(image.pixels.clone(), image.width, image.height, &options)
        .unwrap();
    assert!(borrowed.is_some());
    assert_eq!(borrowed, owned);
}

#[test]
fn test_malformed_buffer() {
    let result = decode_image(&[0u8; 12], 2, 2, &DecodeOptions::default());
    assert!(matches!(
        result,
        Err(DecodeError::MalformedInput {
            expected: 16,
            actual: 12
        })
    ));
}

#[test]
fn test_batch_and_scanner() {
    let code = QrCode::new("frame").unwrap();
    let image = render(&code, 4);
    let frames = vec![
        Frame::new(vec![255; 32 * 32 * 4], 32, 32),
        Frame::new(image.pixels.clone(), image.width, image.height),
    ];
    let results = decode_batch(&frames, &DecodeOptions::default());
    assert!(matches!(results[0], Ok(None)));
    assert_eq!(results[1].as_ref().unwrap().as_ref().unwrap().data, "frame");

    let batch = Decoder::new().decode_batch(&frames);
    assert_eq!(batch.len(), 2);

    let mut scanner = FrameScanner::default();
    let id = scanner
        .submit(Frame::new(image.pixels, image.width, image.height))
        .unwrap();
    let (done, result) = scanner.wait().unwrap();
    assert_eq!(done, id);
    assert_eq!(result.unwrap().unwrap().data, "frame");
}

#[test]
fn test_result_json() {
    let code = QrCode::new("json").unwrap();
    let image = render(&code, 4);
    let qr = decode(&image.pixels, image.width, image.height).unwrap();
    let json = serde_json::to_string(&qr).unwrap();
    assert!(json.contains("\"binaryData\""));
    assert!(json.contains("\"topRightCorner\""));
    assert!(json.contains("\"data\":\"json\""));
}
