use serde::Serialize;

/// Assignment number carried by an ECI segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EciAssignment {
    /// A well-formed 7, 14 or 21 bit designator
    Number(u32),
    /// The length prefix was `111`, which no valid designator uses
    Corrupted,
}

/// One mode segment of a decoded payload, in stream order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Chunk {
    /// Digits 0-9
    Numeric {
        /// Decoded digits
        text: String,
    },
    /// The 45-symbol alphanumeric set
    Alphanumeric {
        /// Decoded characters
        text: String,
    },
    /// Raw 8-bit data
    Byte {
        /// Raw bytes as stored in the symbol
        bytes: Vec<u8>,
        /// UTF-8 text, or empty if the bytes are not valid UTF-8
        text: String,
    },
    /// Shift-JIS double-byte characters
    Kanji {
        /// Shift-JIS bytes
        bytes: Vec<u8>,
        /// Decoded text
        text: String,
    },
    /// Extended Channel Interpretation designator
    #[serde(rename = "eci")]
    Eci {
        /// Designator value
        assignment: EciAssignment,
    },
    /// Position of this symbol in a structured-append sequence
    #[serde(rename = "structuredappend", rename_all = "camelCase")]
    StructuredAppend {
        /// Index of this symbol
        current_sequence: u8,
        /// Index of the last symbol in the sequence
        total_sequence: u8,
        /// Parity byte shared by the sequence
        parity: u8,
    },
}
