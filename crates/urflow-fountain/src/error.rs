//! Fountain coding error types.

use thiserror::Error;

/// Encoder construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Empty messages cannot be encoded.
    #[error("cannot encode an empty message")]
    EmptyMessage,

    /// The maximum fragment length must be at least 1.
    #[error("invalid maximum fragment length: {0}")]
    InvalidFragmentLength(usize),

    /// The message length must fit the 32-bit wire header.
    #[error("message too large: {len} bytes exceeds {max} bytes")]
    MessageTooLarge {
        /// Actual message length.
        len: usize,
        /// Maximum encodable length.
        max: usize,
    },
}

/// Decoder errors.
///
/// Individual malformed or foreign parts never surface here - the decoder
/// discards them and keeps accumulating. Only the final integrity check can
/// fail, and that failure is terminal for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// All fragments were recovered but the reassembled message does not
    /// match the checksum carried by every part.
    #[error("checksum mismatch: expected {expected:#010x}, got {got:#010x}")]
    ChecksumMismatch {
        /// Checksum carried in the part headers.
        expected: u32,
        /// Checksum of the reassembled message.
        got: u32,
    },
}
