//! Error types for alphabet construction and decoding.
//!
//! Encoding is total and has no error type.

use thiserror::Error;

/// Errors that can occur while building an [`Alphabet`](crate::Alphabet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Alphabet spec is not exactly 32 bytes long
    #[error("invalid length {0} - must be 32 bytes")]
    InvalidLength(usize),

    /// Symbol outside the printable ASCII range 0x20-0x7E
    #[error("unprintable byte {byte:#04x} at position {position}")]
    UnprintableSymbol { byte: u8, position: usize },

    /// Symbol already used earlier in the spec
    #[error("duplicated byte {byte:#04x} at position {position}")]
    DuplicateSymbol { byte: u8, position: usize },
}

/// Errors that can occur while decoding base32 input.
///
/// Every variant carries the zero-based offset into the encoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte is not one of the alphabet's 32 symbols
    #[error("invalid byte at offset {offset}, byte {byte:#04x}")]
    InvalidSymbol { offset: usize, byte: u8 },

    /// Final symbol does not complete an output byte (strict mode only)
    #[error("trailing symbol at offset {offset} does not complete a byte")]
    TrailingSymbol { offset: usize },

    /// Discarded trailing bits are not zero (strict mode only)
    #[error("non-zero trailing bits in symbol at offset {offset}")]
    TrailingBits { offset: usize },
}

impl DecodeError {
    /// Offset into the encoded input where decoding stopped.
    pub fn offset(&self) -> usize {
        match *self {
            Self::InvalidSymbol { offset, .. }
            | Self::TrailingSymbol { offset }
            | Self::TrailingBits { offset } => offset,
        }
    }

    /// The offending raw byte, if the error was caused by one.
    pub fn byte(&self) -> Option<u8> {
        match *self {
            Self::InvalidSymbol { byte, .. } => Some(byte),
            Self::TrailingSymbol { .. } | Self::TrailingBits { .. } => None,
        }
    }
}
