/// Version table and version information extraction
use crate::models::{BitMatrix, ECLevel};

/// A run of equally sized blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlock {
    /// How many blocks of this size
    pub num_blocks: usize,
    /// Data codewords in each block
    pub data_codewords_per_block: usize,
}

/// Block layout for one version at one error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcLevelInfo {
    /// EC codewords appended to every block
    pub ec_codewords_per_block: usize,
    /// Short blocks first, then long blocks (one extra data codeword)
    pub ec_blocks: &'static [EcBlock],
}

impl EcLevelInfo {
    /// Total data plus EC codewords
    pub fn total_codewords(&self) -> usize {
        self.ec_blocks
            .iter()
            .map(|b| b.num_blocks * (b.data_codewords_per_block + self.ec_codewords_per_block))
            .sum()
    }

    /// Total data codewords
    pub fn data_codewords(&self) -> usize {
        self.ec_blocks
            .iter()
            .map(|b| b.num_blocks * b.data_codewords_per_block)
            .sum()
    }
}

/// One of the 40 QR versions
#[derive(Debug, PartialEq, Eq)]
pub struct Version {
    /// 1-40
    pub number: u8,
    /// 18-bit BCH-coded version field (0 below version 7)
    pub info_bits: u32,
    /// Row/column coordinates of alignment pattern centres
    pub alignment_pattern_centers: &'static [usize],
    /// Block layouts indexed by [`ECLevel::index`]
    pub error_correction_levels: [EcLevelInfo; 4],
}

const fn level(ec_codewords_per_block: usize, ec_blocks: &'static [EcBlock]) -> EcLevelInfo {
    EcLevelInfo {
        ec_codewords_per_block,
        ec_blocks,
    }
}

const fn blocks(num_blocks: usize, data_codewords_per_block: usize) -> EcBlock {
    EcBlock {
        num_blocks,
        data_codewords_per_block,
    }
}

/// Maximum number of differing bits for a version field to still match
const MAX_VERSION_BIT_ERRORS: u32 = 3;

impl Version {
    /// Look up a version by number
    pub fn from_number(number: u8) -> Option<&'static Version> {
        VERSIONS.get((number as usize).checked_sub(1)?)
    }

    /// Modules per side
    pub fn dimension(&self) -> usize {
        17 + 4 * self.number as usize
    }

    /// Block layout for an EC level
    pub fn ec_level(&self, level: ECLevel) -> &EcLevelInfo {
        &self.error_correction_levels[level.index()]
    }

    /// Determine the version of a sampled symbol.
    ///
    /// Below version 7 the version follows from the dimension alone. From
    /// version 7 on, both 18-bit version fields are read and matched against
    /// the table: an exact match on either wins, otherwise the closest entry
    /// within three bit errors.
    pub fn read(matrix: &BitMatrix) -> Option<&'static Version> {
        let dimension = matrix.height() as i32;
        let provisional = (dimension - 17).div_euclid(4);
        if provisional < 1 {
            return None;
        }
        if provisional <= 6 {
            return Self::from_number(provisional as u8);
        }

        let mut top_right_bits = 0u32;
        for y in (0..=5).rev() {
            for x in (dimension - 11..=dimension - 9).rev() {
                top_right_bits = (top_right_bits << 1) | matrix.get(x, y) as u32;
            }
        }

        let mut bottom_left_bits = 0u32;
        for x in (0..=5).rev() {
            for y in (dimension - 11..=dimension - 9).rev() {
                bottom_left_bits = (bottom_left_bits << 1) | matrix.get(x, y) as u32;
            }
        }

        let mut best: Option<(&'static Version, u32)> = None;
        for version in VERSIONS.iter() {
            if version.info_bits == top_right_bits || version.info_bits == bottom_left_bits {
                return Some(version);
            }
            for bits in [top_right_bits, bottom_left_bits] {
                let difference = (bits ^ version.info_bits).count_ones();
                if best.is_none_or(|(_, best_difference)| difference < best_difference) {
                    best = Some((version, difference));
                }
            }
        }

        best.filter(|&(_, difference)| difference <= MAX_VERSION_BIT_ERRORS)
            .map(|(version, _)| version)
    }
}

/// Versions 1-40 in order
pub static VERSIONS: [Version; 40] = [
    Version {
        number: 1,
        info_bits: 0x00000,
        alignment_pattern_centers: &[],
        error_correction_levels: [
            level(7, &[blocks(1, 19)]),
            level(10, &[blocks(1, 16)]),
            level(13, &[blocks(1, 13)]),
            level(17, &[blocks(1, 9)]),
        ],
    },
    Version {
        number: 2,
        info_bits: 0x00000,
        alignment_pattern_centers: &[6, 18],
        error_correction_levels: [
            level(10, &[blocks(1, 34)]),
            level(16, &[blocks(1, 28)]),
            level(22, &[blocks(1, 22)]),
            level(28, &[blocks(1, 16)]),
        ],
    },
    Version {
        number: 3,
        info_bits: 0x00000,
        alignment_pattern_centers: &[6, 22],
        error_correction_levels: [
            level(15, &[blocks(1, 55)]),
            level(26, &[blocks(1, 44)]),
            level(18, &[blocks(2, 17)]),
            level(22, &[blocks(2, 13)]),
        ],
    },
    Version {
        number: 4,
        info_bits: 0x00000,
        alignment_pattern_centers: &[6, 26],
        error_correction_levels: [
            level(20, &[blocks(1, 80)]),
            level(18, &[blocks(2, 32)]),
            level(26, &[blocks(2, 24)]),
            level(16, &[blocks(4, 9)]),
        ],
    },
    Version {
        number: 5,
        info_bits: 0x00000,
        alignment_pattern_centers: &[6, 30],
        error_correction_levels: [
            level(26, &[blocks(1, 108)]),
            level(24, &[blocks(2, 43)]),
            level(18, &[blocks(2, 15), blocks(2, 16)]),
            level(22, &[blocks(2, 11), blocks(2, 12)]),
        ],
    },
    Version {
        number: 6,
        info_bits: 0x00000,
        alignment_pattern_centers: &[6, 34],
        error_correction_levels: [
            level(18, &[blocks(2, 68)]),
            level(16, &[blocks(4, 27)]),
            level(24, &[blocks(4, 19)]),
            level(28, &[blocks(4, 15)]),
        ],
    },
    Version {
        number: 7,
        info_bits: 0x07C94,
        alignment_pattern_centers: &[6, 22, 38],
        error_correction_levels: [
            level(20, &[blocks(2, 78)]),
            level(18, &[blocks(4, 31)]),
            level(18, &[blocks(2, 14), blocks(4, 15)]),
            level(26, &[blocks(4, 13), blocks(1, 14)]),
        ],
    },
    Version {
        number: 8,
        info_bits: 0x085BC,
        alignment_pattern_centers: &[6, 24, 42],
        error_correction_levels: [
            level(24, &[blocks(2, 97)]),
            level(22, &[blocks(2, 38), blocks(2, 39)]),
            level(22, &[blocks(4, 18), blocks(2, 19)]),
            level(26, &[blocks(4, 14), blocks(2, 15)]),
        ],
    },
    Version {
        number: 9,
        info_bits: 0x09A99,
        alignment_pattern_centers: &[6, 26, 46],
        error_correction_levels: [
            level(30, &[blocks(2, 116)]),
            level(22, &[blocks(3, 36), blocks(2, 37)]),
            level(20, &[blocks(4, 16), blocks(4, 17)]),
            level(24, &[blocks(4, 12), blocks(4, 13)]),
        ],
    },
    Version {
        number: 10,
        info_bits: 0x0A4D3,
        alignment_pattern_centers: &[6, 28, 50],
        error_correction_levels: [
            level(18, &[blocks(2, 68), blocks(2, 69)]),
            level(26, &[blocks(4, 43), blocks(1, 44)]),
            level(24, &[blocks(6, 19), blocks(2, 20)]),
            level(28, &[blocks(6, 15), blocks(2, 16)]),
        ],
    },
    Version {
        number: 11,
        info_bits: 0x0BBF6,
        alignment_pattern_centers: &[6, 30, 54],
        error_correction_levels: [
            level(20, &[blocks(4, 81)]),
            level(30, &[blocks(1, 50), blocks(4, 51)]),
            level(28, &[blocks(4, 22), blocks(4, 23)]),
            level(24, &[blocks(3, 12), blocks(8, 13)]),
        ],
    },
    Version {
        number: 12,
        info_bits: 0x0C762,
        alignment_pattern_centers: &[6, 32, 58],
        error_correction_levels: [
            level(24, &[blocks(2, 92), blocks(2, 93)]),
            level(22, &[blocks(6, 36), blocks(2, 37)]),
            level(26, &[blocks(4, 20), blocks(6, 21)]),
            level(28, &[blocks(7, 14), blocks(4, 15)]),
        ],
    },
    Version {
        number: 13,
        info_bits: 0x0D847,
        alignment_pattern_centers: &[6, 34, 62],
        error_correction_levels: [
            level(26, &[blocks(4, 107)]),
            level(22, &[blocks(8, 37), blocks(1, 38)]),
            level(24, &[blocks(8, 20), blocks(4, 21)]),
            level(22, &[blocks(12, 11), blocks(4, 12)]),
        ],
    },
    Version {
        number: 14,
        info_bits: 0x0E60D,
        alignment_pattern_centers: &[6, 26, 46, 66],
        error_correction_levels: [
            level(30, &[blocks(3, 115), blocks(1, 116)]),
            level(24, &[blocks(4, 40), blocks(5, 41)]),
            level(20, &[blocks(11, 16), blocks(5, 17)]),
            level(24, &[blocks(11, 12), blocks(5, 13)]),
        ],
    },
    Version {
        number: 15,
        info_bits: 0x0F928,
        alignment_pattern_centers: &[6, 26, 48, 70],
        error_correction_levels: [
            level(22, &[blocks(5, 87), blocks(1, 88)]),
            level(24, &[blocks(5, 41), blocks(5, 42)]),
            level(30, &[blocks(5, 24), blocks(7, 25)]),
            level(24, &[blocks(11, 12), blocks(7, 13)]),
        ],
    },
    Version {
        number: 16,
        info_bits: 0x10B78,
        alignment_pattern_centers: &[6, 26, 50, 74],
        error_correction_levels: [
            level(24, &[blocks(5, 98), blocks(1, 99)]),
            level(28, &[blocks(7, 45), blocks(3, 46)]),
            level(24, &[blocks(15, 19), blocks(2, 20)]),
            level(30, &[blocks(3, 15), blocks(13, 16)]),
        ],
    },
    Version {
        number: 17,
        info_bits: 0x1145D,
        alignment_pattern_centers: &[6, 30, 54, 78],
        error_correction_levels: [
            level(28, &[blocks(1, 107), blocks(5, 108)]),
            level(28, &[blocks(10, 46), blocks(1, 47)]),
            level(28, &[blocks(1, 22), blocks(15, 23)]),
            level(28, &[blocks(2, 14), blocks(17, 15)]),
        ],
    },
    Version {
        number: 18,
        info_bits: 0x12A17,
        alignment_pattern_centers: &[6, 30, 56, 82],
        error_correction_levels: [
            level(30, &[blocks(5, 120), blocks(1, 121)]),
            level(26, &[blocks(9, 43), blocks(4, 44)]),
            level(28, &[blocks(17, 22), blocks(1, 23)]),
            level(28, &[blocks(2, 14), blocks(19, 15)]),
        ],
    },
    Version {
        number: 19,
        info_bits: 0x13532,
        alignment_pattern_centers: &[6, 30, 58, 86],
        error_correction_levels: [
            level(28, &[blocks(3, 113), blocks(4, 114)]),
            level(26, &[blocks(3, 44), blocks(11, 45)]),
            level(26, &[blocks(17, 21), blocks(4, 22)]),
            level(26, &[blocks(9, 13), blocks(16, 14)]),
        ],
    },
    Version {
        number: 20,
        info_bits: 0x149A6,
        alignment_pattern_centers: &[6, 34, 62, 90],
        error_correction_levels: [
            level(28, &[blocks(3, 107), blocks(5, 108)]),
            level(26, &[blocks(3, 41), blocks(13, 42)]),
            level(30, &[blocks(15, 24), blocks(5, 25)]),
            level(28, &[blocks(15, 15), blocks(10, 16)]),
        ],
    },
    Version {
        number: 21,
        info_bits: 0x15683,
        alignment_pattern_centers: &[6, 28, 50, 72, 94],
        error_correction_levels: [
            level(28, &[blocks(4, 116), blocks(4, 117)]),
            level(26, &[blocks(17, 42)]),
            level(28, &[blocks(17, 22), blocks(6, 23)]),
            level(30, &[blocks(19, 16), blocks(6, 17)]),
        ],
    },
    Version {
        number: 22,
        info_bits: 0x168C9,
        alignment_pattern_centers: &[6, 26, 50, 74, 98],
        error_correction_levels: [
            level(28, &[blocks(2, 111), blocks(7, 112)]),
            level(28, &[blocks(17, 46)]),
            level(30, &[blocks(7, 24), blocks(16, 25)]),
            level(24, &[blocks(34, 13)]),
        ],
    },
    Version {
        number: 23,
        info_bits: 0x177EC,
        alignment_pattern_centers: &[6, 30, 54, 78, 102],
        error_correction_levels: [
            level(30, &[blocks(4, 121), blocks(5, 122)]),
            level(28, &[blocks(4, 47), blocks(14, 48)]),
            level(30, &[blocks(11, 24), blocks(14, 25)]),
            level(30, &[blocks(16, 15), blocks(14, 16)]),
        ],
    },
    Version {
        number: 24,
        info_bits: 0x18EC4,
        alignment_pattern_centers: &[6, 28, 54, 80, 106],
        error_correction_levels: [
            level(30, &[blocks(6, 117), blocks(4, 118)]),
            level(28, &[blocks(6, 45), blocks(14, 46)]),
            level(30, &[blocks(11, 24), blocks(16, 25)]),
            level(30, &[blocks(30, 16), blocks(2, 17)]),
        ],
    },
    Version {
        number: 25,
        info_bits: 0x191E1,
        alignment_pattern_centers: &[6, 32, 58, 84, 110],
        error_correction_levels: [
            level(26, &[blocks(8, 106), blocks(4, 107)]),
            level(28, &[blocks(8, 47), blocks(13, 48)]),
            level(30, &[blocks(7, 24), blocks(22, 25)]),
            level(30, &[blocks(22, 15), blocks(13, 16)]),
        ],
    },
    Version {
        number: 26,
        info_bits: 0x1AFAB,
        alignment_pattern_centers: &[6, 30, 58, 86, 114],
        error_correction_levels: [
            level(28, &[blocks(10, 114), blocks(2, 115)]),
            level(28, &[blocks(19, 46), blocks(4, 47)]),
            level(28, &[blocks(28, 22), blocks(6, 23)]),
            level(30, &[blocks(33, 16), blocks(4, 17)]),
        ],
    },
    Version {
        number: 27,
        info_bits: 0x1B08E,
        alignment_pattern_centers: &[6, 34, 62, 90, 118],
        error_correction_levels: [
            level(30, &[blocks(8, 122), blocks(4, 123)]),
            level(28, &[blocks(22, 45), blocks(3, 46)]),
            level(30, &[blocks(8, 23), blocks(26, 24)]),
            level(30, &[blocks(12, 15), blocks(28, 16)]),
        ],
    },
    Version {
        number: 28,
        info_bits: 0x1CC1A,
        alignment_pattern_centers: &[6, 26, 50, 74, 98, 122],
        error_correction_levels: [
            level(30, &[blocks(3, 117), blocks(10, 118)]),
            level(28, &[blocks(3, 45), blocks(23, 46)]),
            level(30, &[blocks(4, 24), blocks(31, 25)]),
            level(30, &[blocks(11, 15), blocks(31, 16)]),
        ],
    },
    Version {
        number: 29,
        info_bits: 0x1D33F,
        alignment_pattern_centers: &[6, 30, 54, 78, 102, 126],
        error_correction_levels: [
            level(30, &[blocks(7, 116), blocks(7, 117)]),
            level(28, &[blocks(21, 45), blocks(7, 46)]),
            level(30, &[blocks(1, 23), blocks(37, 24)]),
            level(30, &[blocks(19, 15), blocks(26, 16)]),
        ],
    },
    Version {
        number: 30,
        info_bits: 0x1ED75,
        alignment_pattern_centers: &[6, 26, 52, 78, 104, 130],
        error_correction_levels: [
            level(30, &[blocks(5, 115), blocks(10, 116)]),
            level(28, &[blocks(19, 47), blocks(10, 48)]),
            level(30, &[blocks(15, 24), blocks(25, 25)]),
            level(30, &[blocks(23, 15), blocks(25, 16)]),
        ],
    },
    Version {
        number: 31,
        info_bits: 0x1F250,
        alignment_pattern_centers: &[6, 30, 56, 82, 108, 134],
        error_correction_levels: [
            level(30, &[blocks(13, 115), blocks(3, 116)]),
            level(28, &[blocks(2, 46), blocks(29, 47)]),
            level(30, &[blocks(42, 24), blocks(1, 25)]),
            level(30, &[blocks(23, 15), blocks(28, 16)]),
        ],
    },
    Version {
        number: 32,
        info_bits: 0x209D5,
        alignment_pattern_centers: &[6, 34, 60, 86, 112, 138],
        error_correction_levels: [
            level(30, &[blocks(17, 115)]),
            level(28, &[blocks(10, 46), blocks(23, 47)]),
            level(30, &[blocks(10, 24), blocks(35, 25)]),
            level(30, &[blocks(19, 15), blocks(35, 16)]),
        ],
    },
    Version {
        number: 33,
        info_bits: 0x216F0,
        alignment_pattern_centers: &[6, 30, 58, 86, 114, 142],
        error_correction_levels: [
            level(30, &[blocks(17, 115), blocks(1, 116)]),
            level(28, &[blocks(14, 46), blocks(21, 47)]),
            level(30, &[blocks(29, 24), blocks(19, 25)]),
            level(30, &[blocks(11, 15), blocks(46, 16)]),
        ],
    },
    Version {
        number: 34,
        info_bits: 0x228BA,
        alignment_pattern_centers: &[6, 34, 62, 90, 118, 146],
        error_correction_levels: [
            level(30, &[blocks(13, 115), blocks(6, 116)]),
            level(28, &[blocks(14, 46), blocks(23, 47)]),
            level(30, &[blocks(44, 24), blocks(7, 25)]),
            level(30, &[blocks(59, 16), blocks(1, 17)]),
        ],
    },
    Version {
        number: 35,
        info_bits: 0x2379F,
        alignment_pattern_centers: &[6, 30, 54, 78, 102, 126, 150],
        error_correction_levels: [
            level(30, &[blocks(12, 121), blocks(7, 122)]),
            level(28, &[blocks(12, 47), blocks(26, 48)]),
            level(30, &[blocks(39, 24), blocks(14, 25)]),
            level(30, &[blocks(22, 15), blocks(41, 16)]),
        ],
    },
    Version {
        number: 36,
        info_bits: 0x24B0B,
        alignment_pattern_centers: &[6, 24, 50, 76, 102, 128, 154],
        error_correction_levels: [
            level(30, &[blocks(6, 121), blocks(14, 122)]),
            level(28, &[blocks(6, 47), blocks(34, 48)]),
            level(30, &[blocks(46, 24), blocks(10, 25)]),
            level(30, &[blocks(2, 15), blocks(64, 16)]),
        ],
    },
    Version {
        number: 37,
        info_bits: 0x2542E,
        alignment_pattern_centers: &[6, 28, 54, 80, 106, 132, 158],
        error_correction_levels: [
            level(30, &[blocks(17, 122), blocks(4, 123)]),
            level(28, &[blocks(29, 46), blocks(14, 47)]),
            level(30, &[blocks(49, 24), blocks(10, 25)]),
            level(30, &[blocks(24, 15), blocks(46, 16)]),
        ],
    },
    Version {
        number: 38,
        info_bits: 0x26A64,
        alignment_pattern_centers: &[6, 32, 58, 84, 110, 136, 162],
        error_correction_levels: [
            level(30, &[blocks(4, 122), blocks(18, 123)]),
            level(28, &[blocks(13, 46), blocks(32, 47)]),
            level(30, &[blocks(48, 24), blocks(14, 25)]),
            level(30, &[blocks(42, 15), blocks(32, 16)]),
        ],
    },
    Version {
        number: 39,
        info_bits: 0x27541,
        alignment_pattern_centers: &[6, 26, 54, 82, 110, 138, 166],
        error_correction_levels: [
            level(30, &[blocks(20, 117), blocks(4, 118)]),
            level(28, &[blocks(40, 47), blocks(7, 48)]),
            level(30, &[blocks(43, 24), blocks(22, 25)]),
            level(30, &[blocks(10, 15), blocks(67, 16)]),
        ],
    },
    Version {
        number: 40,
        info_bits: 0x28C69,
        alignment_pattern_centers: &[6, 30, 58, 86, 114, 142, 170],
        error_correction_levels: [
            level(30, &[blocks(19, 118), blocks(6, 119)]),
            level(28, &[blocks(18, 47), blocks(31, 48)]),
            level(30, &[blocks(34, 24), blocks(34, 25)]),
            level(30, &[blocks(20, 15), blocks(61, 16)]),
        ],
    },
];
