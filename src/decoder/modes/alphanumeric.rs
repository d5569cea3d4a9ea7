/// Alphanumeric mode decoder (Mode 0010)
use super::reader::BitReader;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Decode alphanumeric data
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Decode `character_count` characters; an index past the table fails
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining >= 2 {
            let value = reader.read_bits(11)? as usize;
            result.push(Self::lookup(value / 45)?);
            result.push(Self::lookup(value % 45)?);
            chars_remaining -= 2;
        }

        if chars_remaining == 1 {
            let value = reader.read_bits(6)? as usize;
            result.push(Self::lookup(value)?);
        }

        Some(result)
    }

    fn lookup(index: usize) -> Option<char> {
        ALPHANUMERIC_TABLE.get(index).copied()
    }
}
