//! QR code data mode decoders
//!
//! This module turns corrected data codewords into text and segments:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Letters, numbers, and symbols
//! - Byte: 8-bit data (UTF-8, binary, etc.)
//! - Kanji: Shift-JIS double-byte characters
//! - ECI and structured append headers

/// Alphanumeric segments
pub mod alphanumeric;
/// Byte segments
pub mod byte;
/// ECI designators
pub mod eci;
/// Kanji segments
pub mod kanji;
/// Numeric segments
pub mod numeric;
/// Bit-level cursor over data codewords
pub mod reader;
/// Structured append headers
pub mod structured_append;

use crate::models::Chunk;
use alphanumeric::AlphanumericDecoder;
use byte::ByteDecoder;
use kanji::KanjiDecoder;
use numeric::NumericDecoder;
use reader::BitReader;
use structured_append::StructuredAppendHeader;

/// Segment mode indicator (4 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// End of data
    Terminator,
    /// Digits
    Numeric,
    /// 45-character set
    Alphanumeric,
    /// Structured append header
    StructuredAppend,
    /// 8-bit bytes
    Byte,
    /// Extended channel interpretation
    Eci,
    /// Shift-JIS double-byte characters
    Kanji,
}

impl Mode {
    /// Mode for a 4-bit indicator; `None` for indicators this decoder skips
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0x0 => Some(Mode::Terminator),
            0x1 => Some(Mode::Numeric),
            0x2 => Some(Mode::Alphanumeric),
            0x3 => Some(Mode::StructuredAppend),
            0x4 => Some(Mode::Byte),
            0x7 => Some(Mode::Eci),
            0x8 => Some(Mode::Kanji),
            _ => None,
        }
    }

    /// Width of the character count field, by version tier (1-9, 10-26, 27-40)
    pub fn character_count_bits(self, version: u8) -> usize {
        let tier = match version {
            0..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
            Mode::Kanji => [8, 10, 12][tier],
            Mode::Terminator | Mode::StructuredAppend | Mode::Eci => 0,
        }
    }
}

/// Text, bytes and segments recovered from a data codeword stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedData {
    /// Concatenated text of the text-bearing segments
    pub text: String,
    /// Concatenated bytes of the text-bearing segments
    pub bytes: Vec<u8>,
    /// Every segment in stream order
    pub chunks: Vec<Chunk>,
}

/// Decode the corrected data codewords of a symbol of the given version.
///
/// Segments are read until a terminator or until fewer than four bits
/// remain. Unknown mode indicators are skipped. Any malformed segment, a
/// read past the end, or non-zero leftover bits fails the decode.
pub fn decode_data(data: &[u8], version: u8) -> Option<DecodedData> {
    let mut reader = BitReader::new(data);
    let mut result = DecodedData::default();

    while reader.available() >= 4 {
        let indicator = reader.read_bits(4)?;
        let Some(mode) = Mode::from_bits(indicator) else {
            log::trace!("skipping unknown mode indicator {:#x}", indicator);
            continue;
        };

        let count = match mode.character_count_bits(version) {
            0 => 0,
            width => reader.read_bits(width)? as usize,
        };

        match mode {
            Mode::Terminator => return Some(result),
            Mode::Numeric => {
                let text = NumericDecoder::decode(&mut reader, count)?;
                result.bytes.extend_from_slice(text.as_bytes());
                result.text.push_str(&text);
                result.chunks.push(Chunk::Numeric { text });
            }
            Mode::Alphanumeric => {
                let text = AlphanumericDecoder::decode(&mut reader, count)?;
                result.bytes.extend_from_slice(text.as_bytes());
                result.text.push_str(&text);
                result.chunks.push(Chunk::Alphanumeric { text });
            }
            Mode::Byte => {
                let (bytes, text) = ByteDecoder::decode(&mut reader, count)?;
                result.bytes.extend_from_slice(&bytes);
                result.text.push_str(&text);
                result.chunks.push(Chunk::Byte { bytes, text });
            }
            Mode::Kanji => {
                let (bytes, text) = KanjiDecoder::decode(&mut reader, count)?;
                result.bytes.extend_from_slice(&bytes);
                result.text.push_str(&text);
                result.chunks.push(Chunk::Kanji { bytes, text });
            }
            Mode::Eci => {
                let assignment = eci::read_assignment(&mut reader)?;
                result.chunks.push(Chunk::Eci { assignment });
            }
            Mode::StructuredAppend => {
                let header = StructuredAppendHeader::read(&mut reader)?;
                result.chunks.push(Chunk::StructuredAppend {
                    current_sequence: header.current_sequence,
                    total_sequence: header.total_sequence,
                    parity: header.parity,
                });
            }
        }
    }

    // Streams may end without a terminator if the leftover bits are zero
    let leftover = reader.available();
    if leftover == 0 || reader.read_bits(leftover)? == 0 {
        Some(result)
    } else {
        log::debug!("{} trailing bits are not zero", leftover);
        None
    }
}
