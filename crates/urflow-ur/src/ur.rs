//! The uniform-resource value type.

use urflow_cbor::Value;

use crate::error::UrError;

/// A tagged value: a short type identifier plus its canonical CBOR encoding.
///
/// Two URs are equal iff their type and payload bytes are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ur {
    ur_type: String,
    cbor: Vec<u8>,
}

impl Ur {
    /// Create a UR from a type tag and pre-encoded CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns `UrError::InvalidType` unless the tag is non-empty and made of
    /// ASCII lowercase letters, digits, and dashes.
    pub fn new(ur_type: impl Into<String>, cbor: Vec<u8>) -> Result<Self, UrError> {
        let ur_type = ur_type.into();
        if !is_valid_type_tag(&ur_type) {
            return Err(UrError::InvalidType(ur_type));
        }
        Ok(Self { ur_type, cbor })
    }

    /// Wrap an opaque byte payload as a UR of the given type.
    ///
    /// The payload becomes a single CBOR byte string; the wrapping is what
    /// gets checksummed and fragmented.
    ///
    /// # Errors
    ///
    /// Returns `UrError::InvalidType` for a bad tag or a codec error for an
    /// oversized payload.
    pub fn from_payload(ur_type: impl Into<String>, payload: &[u8]) -> Result<Self, UrError> {
        let cbor = urflow_cbor::encode_canonical(&Value::Bytes(payload.to_vec()))?;
        Self::new(ur_type, cbor)
    }

    /// Unwrap the payload bytes of a byte-string UR.
    ///
    /// # Errors
    ///
    /// Returns `UrError::MalformedBody` if the CBOR is not a single byte
    /// string, or a codec error if it is not canonical CBOR at all.
    pub fn payload(&self) -> Result<Vec<u8>, UrError> {
        match urflow_cbor::decode(&self.cbor)? {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(UrError::MalformedBody),
        }
    }

    /// The type tag.
    #[must_use]
    pub fn ur_type(&self) -> &str {
        &self.ur_type
    }

    /// The canonical CBOR encoding of the value.
    #[must_use]
    pub fn cbor(&self) -> &[u8] {
        &self.cbor
    }
}

/// Type tags must survive a case-folding, URI-embedded scan path unchanged.
pub(crate) fn is_valid_type_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
