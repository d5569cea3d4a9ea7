/// Structured append header decoder (Mode 0011)
use super::reader::BitReader;

/// Sequence position and parity of one symbol in a structured-append set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredAppendHeader {
    /// Index of this symbol
    pub current_sequence: u8,
    /// Index of the last symbol
    pub total_sequence: u8,
    /// Parity of the whole message
    pub parity: u8,
}

impl StructuredAppendHeader {
    /// Read the 4-bit index, 4-bit total and 8-bit parity
    pub fn read(reader: &mut BitReader) -> Option<Self> {
        Some(Self {
            current_sequence: reader.read_bits(4)? as u8,
            total_sequence: reader.read_bits(4)? as u8,
            parity: reader.read_bits(8)? as u8,
        })
    }
}
