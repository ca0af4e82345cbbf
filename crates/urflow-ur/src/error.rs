//! UR layer error types.

use thiserror::Error;

use crate::bytewords::BytewordsError;

/// Errors from rendering, parsing, or reassembling `ur:` strings.
#[derive(Debug, Error)]
pub enum UrError {
    /// The string does not start with the `ur:` scheme or has the wrong
    /// number of path components.
    #[error("not a ur: string")]
    InvalidScheme,

    /// The type tag contains characters outside lowercase alphanumerics and
    /// dashes.
    #[error("invalid type tag: {0:?}")]
    InvalidType(String),

    /// The multi-part sequence component is not `<seqNum>-<seqLen>` with
    /// positive decimal numbers.
    #[error("malformed sequence component")]
    MalformedSequence,

    /// The sequence component disagrees with the header inside the part body.
    #[error("sequence component does not match part header")]
    HeaderMismatch,

    /// The part body decodes to CBOR of the wrong shape.
    #[error("unexpected structure in part body")]
    MalformedBody,

    /// The textual body is not valid bytewords.
    #[error(transparent)]
    Bytewords(#[from] BytewordsError),

    /// The byte body is not valid canonical CBOR.
    #[error(transparent)]
    Codec(#[from] urflow_cbor::CodecError),

    /// Encoder construction failed.
    #[error(transparent)]
    Encode(#[from] urflow_fountain::EncodeError),

    /// Reassembly failed terminally (checksum mismatch).
    #[error(transparent)]
    Decode(#[from] urflow_fountain::DecodeError),
}
