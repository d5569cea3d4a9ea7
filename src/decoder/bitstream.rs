/// Codeword extraction from QR code matrix
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::version::Version;
use crate::models::BitMatrix;

/// Read the data and EC codewords in placement order.
///
/// Walks two-module columns from the right edge, alternating upward and
/// downward, skipping the vertical timing column and every function module.
/// Each data bit is unmasked before being packed MSB first. Trailing
/// remainder bits that do not fill a byte are dropped.
pub fn read_codewords(matrix: &BitMatrix, version: &Version, format: &FormatInfo) -> Vec<u8> {
    let function_mask = FunctionMask::new(version);
    let dimension = matrix.height();

    let mut codewords = Vec::with_capacity(dimension * dimension / 8);
    let mut current_byte = 0u8;
    let mut bits_read = 0;
    let mut reading_up = true;

    let mut column = dimension as i32 - 1;
    while column > 0 {
        if column == 6 {
            column -= 1;
        }
        for i in 0..dimension {
            let y = if reading_up { dimension - 1 - i } else { i };
            for column_offset in 0..2 {
                let x = (column - column_offset) as usize;
                if function_mask.is_function(x, y) {
                    continue;
                }
                let mut bit = matrix.get(x as i32, y as i32);
                if format.mask_pattern.is_masked(x, y) {
                    bit = !bit;
                }
                current_byte = (current_byte << 1) | bit as u8;
                bits_read += 1;
                if bits_read == 8 {
                    codewords.push(current_byte);
                    bits_read = 0;
                    current_byte = 0;
                }
            }
        }
        reading_up = !reading_up;
        column -= 2;
    }

    codewords
}
