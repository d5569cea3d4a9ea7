/// Kanji mode decoder (Mode 1000)
use super::reader::BitReader;
use encoding_rs::SHIFT_JIS;

/// Decode Kanji mode data: 13 bits per character, mapped back into the
/// Shift-JIS double-byte ranges
pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Returns the Shift-JIS bytes and their decoded text
    pub fn decode(reader: &mut BitReader, character_count: usize) -> Option<(Vec<u8>, String)> {
        let mut bytes = Vec::with_capacity(character_count * 2);
        for _ in 0..character_count {
            let k = reader.read_bits(13)?;
            let mut c = ((k / 0xC0) << 8) | (k % 0xC0);
            if c < 0x1F00 {
                c += 0x8140;
            } else {
                c += 0xC140;
            }
            bytes.push((c >> 8) as u8);
            bytes.push(c as u8);
        }

        let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
        if had_errors {
            log::trace!("kanji segment has unmappable Shift-JIS pairs");
        }
        let text = text.into_owned();
        Some((bytes, text))
    }
}
