/// Format information extraction from QR code
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Maximum number of differing bits for a format field to still match
const MAX_FORMAT_BIT_ERRORS: u32 = 3;

/// Masked 15-bit format words with their EC level index and mask id
const FORMAT_INFO_TABLE: [(u16, u8, u8); 32] = [
    (0x5412, 1, 0),
    (0x5125, 1, 1),
    (0x5E7C, 1, 2),
    (0x5B4B, 1, 3),
    (0x45F9, 1, 4),
    (0x40CE, 1, 5),
    (0x4F97, 1, 6),
    (0x4AA0, 1, 7),
    (0x77C4, 0, 0),
    (0x72F3, 0, 1),
    (0x7DAA, 0, 2),
    (0x789D, 0, 3),
    (0x662F, 0, 4),
    (0x6318, 0, 5),
    (0x6C41, 0, 6),
    (0x6976, 0, 7),
    (0x1689, 3, 0),
    (0x13BE, 3, 1),
    (0x1CE7, 3, 2),
    (0x19D0, 3, 3),
    (0x0762, 3, 4),
    (0x0255, 3, 5),
    (0x0D0C, 3, 6),
    (0x083B, 3, 7),
    (0x355F, 2, 0),
    (0x3068, 2, 1),
    (0x3F31, 2, 2),
    (0x3A06, 2, 3),
    (0x24B4, 2, 4),
    (0x2183, 2, 5),
    (0x2EDA, 2, 6),
    (0x2BED, 2, 7),
];

/// Format info is 15 bits (5 data + 10 ECC), stored twice around the finders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    fn from_entry(ec_index: u8, mask: u8) -> Option<Self> {
        Some(Self {
            ec_level: ECLevel::from_index(ec_index)?,
            mask_pattern: MaskPattern::from_bits(mask)?,
        })
    }

    /// Read both format fields and match them against the table.
    ///
    /// An exact match on either copy wins; otherwise the closest entry within
    /// three bit errors. The second copy only competes when it differs from
    /// the first.
    pub fn read(matrix: &BitMatrix) -> Option<Self> {
        let (top_left_bits, other_bits) = Self::read_bits(matrix);

        let mut best: Option<(u8, u8, u32)> = None;
        for &(bits, ec_index, mask) in FORMAT_INFO_TABLE.iter() {
            if bits == top_left_bits || bits == other_bits {
                return Self::from_entry(ec_index, mask);
            }
            let mut consider = |word: u16| {
                let difference = (word ^ bits).count_ones();
                if best.is_none_or(|(_, _, best_difference)| difference < best_difference) {
                    best = Some((ec_index, mask, difference));
                }
            };
            consider(top_left_bits);
            if top_left_bits != other_bits {
                consider(other_bits);
            }
        }

        match best {
            Some((ec_index, mask, difference)) if difference <= MAX_FORMAT_BIT_ERRORS => {
                Self::from_entry(ec_index, mask)
            }
            _ => None,
        }
    }

    /// Both 15-bit copies: around the top-left finder, and split between
    /// the bottom-left and top-right finders
    fn read_bits(matrix: &BitMatrix) -> (u16, u16) {
        let push = |acc: u16, x: i32, y: i32| (acc << 1) | matrix.get(x, y) as u16;

        let mut top_left = 0u16;
        for x in (0..=8).filter(|&x| x != 6) {
            top_left = push(top_left, x, 8);
        }
        for y in (0..=7).rev().filter(|&y| y != 6) {
            top_left = push(top_left, 8, y);
        }

        let dimension = matrix.height() as i32;
        let mut other = 0u16;
        for y in (dimension - 7..=dimension - 1).rev() {
            other = push(other, 8, y);
        }
        for x in dimension - 8..dimension {
            other = push(other, x, 8);
        }

        (top_left, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a format word into both copies
    fn write_format(matrix: &mut BitMatrix, word: u16) {
        let bit = |k: usize| (word >> (14 - k)) & 1 == 1;
        let mut k = 0;
        for x in (0..=8).filter(|&x| x != 6) {
            matrix.set(x, 8, bit(k));
            k += 1;
        }
        for y in (0..=7).rev().filter(|&y| y != 6) {
            matrix.set(8, y, bit(k));
            k += 1;
        }
        let d = matrix.height() as i32;
        let mut k = 0;
        for y in (d - 7..=d - 1).rev() {
            matrix.set(8, y, bit(k));
            k += 1;
        }
        for x in d - 8..d {
            matrix.set(x, 8, bit(k));
            k += 1;
        }
    }

    #[test]
    fn test_every_entry_reads_back() {
        for &(word, ec_index, mask) in FORMAT_INFO_TABLE.iter() {
            let mut matrix = BitMatrix::new(21, 21);
            write_format(&mut matrix, word);
            let info = FormatInfo::read(&matrix).unwrap();
            assert_eq!(info.ec_level.index(), ec_index as usize);
            assert_eq!(info.mask_pattern as u8, mask);
        }
    }

    #[test]
    fn test_corrects_three_bit_errors() {
        let mut matrix = BitMatrix::new(25, 25);
        write_format(&mut matrix, 0x5B4B);
        matrix.toggle(0, 8);
        matrix.toggle(8, 0);
        matrix.toggle(4, 8);
        matrix.toggle(8, 24);
        matrix.toggle(24, 8);
        let info = FormatInfo::read(&matrix).unwrap();
        assert_eq!(info.ec_level, ECLevel::M);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern3);
    }

    #[test]
    fn test_second_copy_used_when_first_destroyed() {
        let mut matrix = BitMatrix::new(21, 21);
        write_format(&mut matrix, 0x1689);
        matrix.set_region(0, 8, 9, 1, true);
        matrix.set_region(8, 0, 1, 8, true);
        let info = FormatInfo::read(&matrix).unwrap();
        assert_eq!(info.ec_level, ECLevel::H);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern0);
    }

    #[test]
    fn test_unreadable_format() {
        // All ones is at least five bits from every entry
        let mut matrix = BitMatrix::new(21, 21);
        matrix.set_region(0, 0, 21, 21, true);
        assert!(FormatInfo::read(&matrix).is_none());
    }
}
