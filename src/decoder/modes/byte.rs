/// Byte mode decoder (Mode 0100) for 8-bit data
use super::reader::BitReader;

/// Decode byte mode data (8 bits per character)
pub struct ByteDecoder;

impl ByteDecoder {
    /// Read `character_count` raw bytes. The text is their UTF-8 reading, or
    /// empty when they are not valid UTF-8; the bytes are kept either way.
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<(Vec<u8>, String)> {
        let mut bytes = Vec::with_capacity(character_count);
        for _ in 0..character_count {
            bytes.push(reader.read_bits(8)? as u8);
        }

        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text.to_string(),
            Err(e) => {
                log::trace!("byte segment is not UTF-8: {}", e);
                String::new()
            }
        };
        Some((bytes, text))
    }
}
