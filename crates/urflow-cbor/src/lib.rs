//! Canonical CBOR encoding for urflow wire structures.
//!
//! Every structure that crosses the scannable-code boundary (the wrapped
//! message payload and the multi-part fragment header) is serialized as a
//! single deterministic RFC 8949 CBOR item:
//! - integers use minimal-length encoding,
//! - map keys are sorted by length-first canonical key bytes,
//! - duplicate map keys are rejected,
//! - a decoded item must consume the entire input (no trailing bytes).
//!
//! Determinism matters here because the byte encoding feeds both the payload
//! checksum and the fragment split; two encoders given the same value must
//! produce identical bytes.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use ciborium::de::from_reader;
use ciborium::ser::into_writer;
use thiserror::Error;

pub use ciborium::value::Value;

/// Maximum allowed size for one encoded message.
///
/// An animated-code payload is tiny by storage standards; anything near this
/// bound indicates corrupt input rather than a legitimate message.
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// Errors from encoding or decoding canonical CBOR.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The encoded message exceeds the configured maximum size.
    #[error("message too large ({len} bytes > {max} bytes)")]
    MessageTooLarge {
        /// Encoded length.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Extra bytes remain after a complete CBOR item.
    #[error("trailing bytes after CBOR value")]
    TrailingBytes,

    /// The input decodes but is not in canonical form.
    #[error("non-canonical CBOR encoding")]
    NonCanonicalEncoding,

    /// A map contains duplicate keys (after canonicalization).
    #[error("duplicate map key (canonical key bytes: {key_hex})")]
    DuplicateMapKey {
        /// Hex of the offending canonical key bytes.
        key_hex: String,
    },

    /// CBOR serialization failed.
    #[error("cbor serialization error: {0}")]
    Serialize(#[from] ciborium::ser::Error<std::io::Error>),

    /// CBOR deserialization failed (truncated or structurally invalid input).
    #[error("cbor deserialization error: {0}")]
    Deserialize(#[from] ciborium::de::Error<std::io::Error>),
}

/// Encode a value as one canonical CBOR item.
///
/// # Errors
///
/// Returns `CodecError::DuplicateMapKey` if any map holds two keys with the
/// same canonical encoding, `CodecError::MessageTooLarge` if the output
/// exceeds [`MAX_MESSAGE_BYTES`], or `CodecError::Serialize` on writer
/// failure.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut canonical = value.clone();
    canonicalize_value_in_place(&mut canonical)?;

    let mut out = Vec::new();
    into_writer(&canonical, &mut out)?;

    if out.len() > MAX_MESSAGE_BYTES {
        return Err(CodecError::MessageTooLarge {
            len: out.len(),
            max: MAX_MESSAGE_BYTES,
        });
    }

    Ok(out)
}

/// Decode exactly one CBOR item from `data`.
///
/// # Errors
///
/// Returns `CodecError::Deserialize` on truncated or malformed input,
/// `CodecError::TrailingBytes` if bytes remain after the first item, or
/// `CodecError::MessageTooLarge` for oversized input.
pub fn decode(data: &[u8]) -> Result<Value, CodecError> {
    if data.len() > MAX_MESSAGE_BYTES {
        return Err(CodecError::MessageTooLarge {
            len: data.len(),
            max: MAX_MESSAGE_BYTES,
        });
    }

    let mut reader = data;
    let value: Value = from_reader(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes);
    }

    Ok(value)
}

/// Decode one CBOR item and require that the input was canonically encoded.
///
/// Re-encodes the decoded value and compares against the input bytes, failing
/// closed on any non-canonical form. Use this for untrusted input whose bytes
/// participate in checksumming.
///
/// # Errors
///
/// Everything [`decode`] returns, plus `CodecError::NonCanonicalEncoding` if
/// the decoded value does not re-encode to the exact input bytes.
pub fn decode_canonical(data: &[u8]) -> Result<Value, CodecError> {
    let value = decode(data)?;
    let reencoded = encode_canonical(&value)?;
    if reencoded != data {
        return Err(CodecError::NonCanonicalEncoding);
    }

    Ok(value)
}

fn canonicalize_value_in_place(v: &mut Value) -> Result<(), CodecError> {
    match v {
        Value::Array(items) => {
            for item in items {
                canonicalize_value_in_place(item)?;
            }
        }
        Value::Map(entries) => canonicalize_map(entries)?,
        Value::Tag(_, boxed) => canonicalize_value_in_place(boxed)?,
        _ => {}
    }

    Ok(())
}

fn canonicalize_map(entries: &mut Vec<(Value, Value)>) -> Result<(), CodecError> {
    use std::cmp::Ordering;

    let mut with_keys = Vec::with_capacity(entries.len());
    for (mut key, mut value) in std::mem::take(entries) {
        canonicalize_value_in_place(&mut key)?;
        canonicalize_value_in_place(&mut value)?;

        let mut key_bytes = Vec::new();
        into_writer(&key, &mut key_bytes)?;

        with_keys.push((key_bytes, key, value));
    }

    with_keys.sort_by(
        |(a_bytes, _, _), (b_bytes, _, _)| match a_bytes.len().cmp(&b_bytes.len()) {
            Ordering::Equal => a_bytes.cmp(b_bytes),
            other => other,
        },
    );

    for pair in with_keys.windows(2) {
        let (left_bytes, _, _) = &pair[0];
        let (right_bytes, _, _) = &pair[1];
        if left_bytes == right_bytes {
            return Err(CodecError::DuplicateMapKey {
                key_hex: hex::encode(right_bytes),
            });
        }
    }

    *entries = with_keys
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect();

    Ok(())
}
