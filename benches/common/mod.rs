use qrcode::{Color, QrCode};

/// Render `data` as RGBA with `scale` pixels per module and a 4-module quiet zone
pub fn render_rgba(data: &str, scale: usize) -> (Vec<u8>, usize, usize) {
    let code = QrCode::new(data.as_bytes()).expect("encodable payload");
    let modules = code.width();
    let colors = code.to_colors();
    let size = (modules + 8) * scale;
    let mut rgba = vec![255u8; size * size * 4];
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let (mx, my) = (i % modules + 4, i / modules + 4);
        for y in my * scale..(my + 1) * scale {
            for x in mx * scale..(mx + 1) * scale {
                let base = (y * size + x) * 4;
                rgba[base..base + 3].fill(0);
            }
        }
    }
    (rgba, size, size)
}
