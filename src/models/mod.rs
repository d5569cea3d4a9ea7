//! Core data structures shared by the detector, decoder and public API

/// Decoded payload segments
pub mod chunk;
/// RGBA input frames
pub mod frame;
/// Locator hypotheses
pub mod location;
/// Packed bit matrix
pub mod matrix;
/// Sub-pixel points
pub mod point;
/// Decode results, EC levels and mask patterns
pub mod qr_code;

pub use chunk::{Chunk, EciAssignment};
pub use frame::Frame;
pub use location::QRLocation;
pub use matrix::BitMatrix;
pub use point::Point;
pub use qr_code::{CodeLocation, DecodedQr, ECLevel, MaskPattern, QRCode};
