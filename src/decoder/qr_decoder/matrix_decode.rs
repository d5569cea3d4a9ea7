use crate::decoder::bitstream::read_codewords;
use crate::decoder::data_block::get_data_blocks;
use crate::decoder::format::FormatInfo;
use crate::decoder::modes::decode_data;
use crate::decoder::reed_solomon;
use crate::decoder::version::Version;
use crate::models::{BitMatrix, DecodedQr};

/// Version, format, codewords, per-block correction and data decoding of
/// one matrix orientation
pub(super) fn decode_matrix(matrix: &BitMatrix) -> Option<DecodedQr> {
    let Some(version) = Version::read(matrix) else {
        log::debug!("no version matches a {}x{} matrix", matrix.width(), matrix.height());
        return None;
    };
    let Some(format) = FormatInfo::read(matrix) else {
        log::debug!("format information unreadable");
        return None;
    };

    let codewords = read_codewords(matrix, version, &format);
    let ec_info = version.ec_level(format.ec_level);
    let blocks = get_data_blocks(&codewords, ec_info)?;

    let mut data = Vec::with_capacity(ec_info.data_codewords());
    for (index, block) in blocks.iter().enumerate() {
        let two_s = block.codewords.len() - block.num_data_codewords;
        let Some(corrected) = reed_solomon::decode(&block.codewords, two_s) else {
            log::debug!(
                "block {} of {} is uncorrectable (version {}, {:?})",
                index + 1,
                blocks.len(),
                version.number,
                format.ec_level
            );
            return None;
        };
        data.extend_from_slice(&corrected[..block.num_data_codewords]);
    }

    let decoded = decode_data(&data, version.number)?;
    Some(DecodedQr {
        text: decoded.text,
        bytes: decoded.bytes,
        chunks: decoded.chunks,
        version: version.number,
        error_correction: format.ec_level,
        mask: format.mask_pattern,
        mirrored: false,
    })
}
