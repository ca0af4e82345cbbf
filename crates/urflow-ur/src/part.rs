//! Rendering and parsing of single `ur:` part strings.
//!
//! Grammar:
//! - single-part: `ur:<type>/<data>`
//! - multi-part:  `ur:<type>/<seqNum>-<seqLen>/<data>`
//!
//! `<data>` is minimal bytewords over canonical CBOR. The whole string is
//! case-insensitive, so it can be embedded in an alphanumeric-mode scannable
//! code at the densest encoding.

use urflow_cbor::Value;
use urflow_fountain::FountainPart;

use crate::bytewords::{self, Style};
use crate::error::UrError;
use crate::ur::{is_valid_type_tag, Ur};

const SCHEME: &str = "ur:";

/// A successfully parsed part string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedPart {
    /// A complete message in one part.
    Single {
        /// Type tag.
        ur_type: String,
        /// Canonical CBOR of the whole message.
        cbor: Vec<u8>,
    },
    /// One fragment combination of a fragmented message.
    Fragment {
        /// Type tag.
        ur_type: String,
        /// The fountain part carried in the body.
        part: FountainPart,
    },
}

/// Render a single-part UR.
#[must_use]
pub fn render_single(ur: &Ur) -> String {
    format!(
        "{SCHEME}{}/{}",
        ur.ur_type(),
        bytewords::encode(ur.cbor(), Style::Minimal)
    )
}

/// Render one part of a fragmented message.
///
/// # Errors
///
/// Returns a codec error if the part body exceeds the encoding size guard.
pub fn render_fragment(ur_type: &str, part: &FountainPart) -> Result<String, UrError> {
    let body = encode_part_body(part)?;
    Ok(format!(
        "{SCHEME}{ur_type}/{}-{}/{}",
        part.seq_num,
        part.seq_len,
        bytewords::encode(&body, Style::Minimal)
    ))
}

/// Parse a candidate part string, case-insensitively.
///
/// # Errors
///
/// Returns a `UrError` describing the first structural violation; callers in
/// a scanning loop treat every variant as "not ours, keep going".
pub fn parse(text: &str) -> Result<ParsedPart, UrError> {
    let lowered = text.trim().to_ascii_lowercase();
    let rest = lowered
        .strip_prefix(SCHEME)
        .ok_or(UrError::InvalidScheme)?;

    let components: Vec<&str> = rest.split('/').collect();
    match components.as_slice() {
        [ur_type, body] => {
            let ur_type = validate_type(ur_type)?;
            let cbor = bytewords::decode(body, Style::Minimal)?;
            Ok(ParsedPart::Single { ur_type, cbor })
        }
        [ur_type, sequence, body] => {
            let ur_type = validate_type(ur_type)?;
            let (seq_num, seq_len) = parse_sequence(sequence)?;
            let bytes = bytewords::decode(body, Style::Minimal)?;
            let part = decode_part_body(&bytes)?;
            if part.seq_num != seq_num || part.seq_len != seq_len {
                return Err(UrError::HeaderMismatch);
            }
            Ok(ParsedPart::Fragment { ur_type, part })
        }
        _ => Err(UrError::InvalidScheme),
    }
}

fn validate_type(ur_type: &str) -> Result<String, UrError> {
    if is_valid_type_tag(ur_type) {
        Ok(ur_type.to_string())
    } else {
        Err(UrError::InvalidType(ur_type.to_string()))
    }
}

fn parse_sequence(sequence: &str) -> Result<(u32, u32), UrError> {
    let (num, len) = sequence
        .split_once('-')
        .ok_or(UrError::MalformedSequence)?;
    let seq_num: u32 = num.parse().map_err(|_| UrError::MalformedSequence)?;
    let seq_len: u32 = len.parse().map_err(|_| UrError::MalformedSequence)?;
    if seq_num == 0 || seq_len == 0 {
        return Err(UrError::MalformedSequence);
    }
    Ok((seq_num, seq_len))
}

/// Part body wire form: `[seq_num, seq_len, message_len, checksum, data]`.
fn encode_part_body(part: &FountainPart) -> Result<Vec<u8>, UrError> {
    let value = Value::Array(vec![
        Value::Integer(part.seq_num.into()),
        Value::Integer(part.seq_len.into()),
        Value::Integer(part.message_len.into()),
        Value::Integer(part.checksum.into()),
        Value::Bytes(part.data.clone()),
    ]);
    Ok(urflow_cbor::encode_canonical(&value)?)
}

fn decode_part_body(bytes: &[u8]) -> Result<FountainPart, UrError> {
    let value = urflow_cbor::decode_canonical(bytes)?;
    let Value::Array(items) = value else {
        return Err(UrError::MalformedBody);
    };
    let [a, b, c, d, data] = items.as_slice() else {
        return Err(UrError::MalformedBody);
    };

    let Value::Bytes(data) = data else {
        return Err(UrError::MalformedBody);
    };

    Ok(FountainPart {
        seq_num: as_u32(a)?,
        seq_len: as_u32(b)?,
        message_len: as_u32(c)?,
        checksum: as_u32(d)?,
        data: data.clone(),
    })
}

fn as_u32(value: &Value) -> Result<u32, UrError> {
    let Value::Integer(integer) = value else {
        return Err(UrError::MalformedBody);
    };
    u32::try_from(i128::from(*integer)).map_err(|_| UrError::MalformedBody)
}
