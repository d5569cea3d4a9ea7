//! QR code decoding modules
//!
//! This module contains all the logic for decoding a sampled module matrix:
//! - Version and format information recovery
//! - Codeword readout and block de-interleaving
//! - Reed-Solomon error correction
//! - Data mode decoding (numeric, alphanumeric, byte, kanji, ECI)

/// Codeword readout from a module matrix
pub mod bitstream;
/// Splitting codewords into error correction blocks
pub mod data_block;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders
pub mod modes;
/// Matrix decoder with mirror fallback
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Version table and version information extraction
pub mod version;
