/// Numeric mode decoder (Mode 0001)
use super::reader::BitReader;

/// Decode numeric mode data
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `character_count` digits. A group whose value has more digits
    /// than the group holds fails the decode.
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining >= 3 {
            let value = reader.read_bits(10)?;
            if value >= 1000 {
                return None;
            }
            Self::push_digits(&mut result, value, 3);
            chars_remaining -= 3;
        }

        match chars_remaining {
            2 => {
                let value = reader.read_bits(7)?;
                if value >= 100 {
                    return None;
                }
                Self::push_digits(&mut result, value, 2);
            }
            1 => {
                let value = reader.read_bits(4)?;
                if value >= 10 {
                    return None;
                }
                Self::push_digits(&mut result, value, 1);
            }
            _ => {}
        }

        Some(result)
    }

    fn push_digits(result: &mut String, value: u32, width: usize) {
        result.push_str(&format!("{:0width$}", value, width = width));
    }
}
