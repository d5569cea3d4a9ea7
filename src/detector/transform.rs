/// Module grid sampling through a perspective transform
use crate::models::{BitMatrix, Point, QRLocation};
use crate::utils::geometry::PerspectiveTransform;

/// Sampled module matrix plus the module-to-image mapping that produced it
#[derive(Debug, Clone)]
pub struct Extracted {
    /// `dimension x dimension` modules, dark set
    pub matrix: BitMatrix,
    transform: PerspectiveTransform,
}

impl Extracted {
    /// Map module-space coordinates to image pixels
    pub fn mapping(&self, x: f64, y: f64) -> Point {
        self.transform.transform(x, y)
    }
}

/// Build the module-to-image transform for a location.
///
/// The three finder centres sit at module (3.5, 3.5), (d-3.5, 3.5) and
/// (3.5, d-3.5); the alignment point is taken to be at (d-6.5, d-6.5).
pub fn module_transform(location: &QRLocation) -> PerspectiveTransform {
    let d = location.dimension as f64;
    let q_to_s = PerspectiveTransform::quadrilateral_to_square(
        Point::new(3.5, 3.5),
        Point::new(d - 3.5, 3.5),
        Point::new(d - 6.5, d - 6.5),
        Point::new(3.5, d - 3.5),
    );
    let s_to_q = PerspectiveTransform::square_to_quadrilateral(
        location.top_left,
        location.top_right,
        location.alignment_pattern,
        location.bottom_left,
    );
    s_to_q.times(&q_to_s)
}

/// Sample each module centre of the located symbol from `image`
pub fn extract(image: &BitMatrix, location: &QRLocation) -> Extracted {
    let transform = module_transform(location);
    let dimension = location.dimension;
    let mut matrix = BitMatrix::new(dimension, dimension);

    for y in 0..dimension {
        for x in 0..dimension {
            let p = transform.transform(x as f64 + 0.5, y as f64 + 0.5);
            // Points at infinity read as light
            if p.x.is_finite() && p.y.is_finite() && image.get(p.x.floor() as i32, p.y.floor() as i32) {
                matrix.set(x as i32, y as i32, true);
            }
        }
    }

    Extracted { matrix, transform }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(dimension: usize) -> QRLocation {
        let d = dimension as f64;
        QRLocation {
            top_left: Point::new(3.5, 3.5),
            top_right: Point::new(d - 3.5, 3.5),
            bottom_left: Point::new(3.5, d - 3.5),
            alignment_pattern: Point::new(d - 6.5, d - 6.5),
            dimension,
        }
    }

    #[test]
    fn test_identity_extraction() {
        let mut image = BitMatrix::new(25, 25);
        for y in 0..25 {
            for x in 0..25 {
                image.set(x, y, (x * 7 + y * 3) % 5 < 2);
            }
        }
        let extracted = extract(&image, &location(25));
        assert_eq!(extracted.matrix, image);
    }

    #[test]
    fn test_scaled_extraction() {
        // 21 modules at 3px each, offset by 10px
        let mut modules = BitMatrix::new(21, 21);
        modules.set_region(0, 0, 7, 7, true);
        modules.set(10, 4, true);
        modules.set(20, 20, true);
        let mut image = BitMatrix::new(83, 83);
        for y in 0..21 {
            for x in 0..21 {
                if modules.get(x, y) {
                    image.set_region(10 + x * 3, 10 + y * 3, 3, 3, true);
                }
            }
        }
        let scaled = |m: f64| 10.0 + m * 3.0;
        let loc = QRLocation {
            top_left: Point::new(scaled(3.5), scaled(3.5)),
            top_right: Point::new(scaled(17.5), scaled(3.5)),
            bottom_left: Point::new(scaled(3.5), scaled(17.5)),
            alignment_pattern: Point::new(scaled(14.5), scaled(14.5)),
            dimension: 21,
        };
        let extracted = extract(&image, &loc);
        assert_eq!(extracted.matrix, modules);

        let corner = extracted.mapping(21.0, 21.0);
        assert!((corner.x - 73.0).abs() < 1e-9 && (corner.y - 73.0).abs() < 1e-9);
        let origin = extracted.mapping(0.0, 0.0);
        assert!((origin.x - 10.0).abs() < 1e-9 && (origin.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_image_reads_light() {
        let image = BitMatrix::new(4, 4);
        let mut loc = location(21);
        loc.top_left = Point::new(-500.0, -500.0);
        let extracted = extract(&image, &loc);
        assert_eq!(extracted.matrix.count_ones(), 0);
    }
}
