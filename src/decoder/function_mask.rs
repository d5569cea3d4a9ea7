use crate::decoder::version::Version;
use crate::models::BitMatrix;

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Mark finders with separators and format areas, alignment patterns,
    /// timing patterns and, from version 7, both version blocks
    pub fn new(version: &Version) -> Self {
        let size = version.dimension();
        let d = size as i32;
        let mut mask = BitMatrix::new(size, size);

        // Finder patterns, separators and format information
        mask.set_region(0, 0, 9, 9, true);
        mask.set_region(d - 8, 0, 8, 9, true);
        mask.set_region(0, d - 8, 9, 8, true);

        // Alignment patterns, except where they would overlap a finder
        let centers = version.alignment_pattern_centers;
        let last = centers.last().copied();
        for &x in centers {
            for &y in centers {
                let overlaps_finder = (x == 6 && y == 6)
                    || (x == 6 && Some(y) == last)
                    || (Some(x) == last && y == 6);
                if !overlaps_finder {
                    mask.set_region(x as i32 - 2, y as i32 - 2, 5, 5, true);
                }
            }
        }

        // Timing patterns
        mask.set_region(6, 9, 1, d - 17, true);
        mask.set_region(9, 6, d - 17, 1, true);

        if version.number > 6 {
            mask.set_region(d - 11, 0, 3, 6, true);
            mask.set_region(0, d - 11, 6, 3, true);
        }

        Self { mask }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Whether the module at column `x`, row `y` carries no data
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x as i32, y as i32)
    }

    /// Modules left over for codewords and remainder bits
    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }
}
