//! Bytewords: a case-insensitive textual byte encoding.
//!
//! Each byte maps to one of 256 curated four-letter English words whose
//! first-and-last letter pairs are unique. The *minimal* style emits just
//! those two letters per byte - the densest alphabetic form that survives a
//! case-folding scan pipeline - while the *standard* style emits whole
//! space-separated words for human display. A CRC-32 of the body is appended
//! before encoding so a misread is caught at this layer, before any CBOR
//! parsing.

// Table indices are 0..=255 by construction.
#![allow(clippy::cast_possible_truncation)]

use std::sync::OnceLock;

use thiserror::Error;

use urflow_fountain::crc32;

/// Encoding style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Whole words separated by spaces, for human display.
    Standard,
    /// First and last letter of each word, no separators.
    Minimal,
}

/// Bytewords decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BytewordsError {
    /// Minimal-style text must hold an even number of letters.
    #[error("minimal bytewords text has odd length")]
    OddLength,

    /// A word or letter pair is not in the table.
    #[error("unrecognized byteword: {0:?}")]
    UnknownWord(String),

    /// The decoded body is too short to carry its checksum suffix.
    #[error("bytewords text too short to contain a checksum")]
    TooShort,

    /// The checksum suffix disagrees with the decoded body.
    #[error("bytewords checksum mismatch")]
    InvalidChecksum,
}

/// The 256-word table. Alphabetical; every (first, last) letter pair is
/// distinct, which is what makes the minimal style decodable.
#[rustfmt::skip]
const WORDS: [&str; 256] = [
    "able", "acid", "also", "apex", "aqua", "arch", "atom", "aunt",
    "away", "axis", "back", "bald", "barn", "belt", "beta", "bias",
    "blue", "body", "brag", "brew", "bulb", "buzz", "calm", "cash",
    "cats", "chef", "city", "claw", "code", "cola", "cook", "cost",
    "crux", "curl", "cusp", "cyan", "dark", "data", "days", "deli",
    "dice", "diet", "door", "down", "draw", "drop", "drum", "dull",
    "duty", "each", "easy", "echo", "edge", "epic", "even", "exam",
    "exit", "eyes", "fact", "fair", "fern", "figs", "film", "fish",
    "fizz", "flap", "flew", "flux", "foxy", "free", "frog", "fuel",
    "fund", "gala", "game", "gear", "gems", "gift", "girl", "glow",
    "good", "gray", "grim", "guru", "gush", "gyro", "half", "hang",
    "hard", "hawk", "heat", "help", "high", "hill", "holy", "hope",
    "horn", "huts", "iced", "idea", "idle", "inch", "inky", "into",
    "iris", "iron", "item", "jade", "jazz", "join", "jolt", "jowl",
    "judo", "jugs", "jump", "junk", "jury", "keep", "keno", "kept",
    "keys", "kick", "kiln", "king", "kite", "kiwi", "knob", "lamb",
    "lava", "lazy", "leaf", "legs", "liar", "limp", "lion", "list",
    "logo", "loud", "love", "luau", "luck", "lung", "main", "many",
    "math", "maze", "memo", "menu", "meow", "mild", "mint", "miss",
    "monk", "nail", "navy", "need", "news", "next", "noon", "note",
    "numb", "obey", "oboe", "omit", "onyx", "open", "oval", "owls",
    "paid", "part", "peck", "play", "plus", "poem", "pool", "pose",
    "puff", "puma", "purr", "quad", "quiz", "race", "ramp", "real",
    "redo", "rich", "road", "rock", "roof", "ruby", "ruin", "runs",
    "rust", "safe", "saga", "scar", "sets", "silk", "skew", "slot",
    "soap", "solo", "song", "stub", "surf", "swan", "taco", "task",
    "taxi", "tent", "tied", "time", "tiny", "toil", "tomb", "toys",
    "trip", "tuna", "twin", "ugly", "undo", "unit", "urge", "user",
    "vast", "very", "veto", "vial", "vibe", "view", "visa", "void",
    "vows", "wall", "wand", "warm", "wasp", "wave", "waxy", "webs",
    "what", "when", "whiz", "wolf", "work", "yank", "yawn", "yell",
    "yoga", "yurt", "zaps", "zero", "zest", "zinc", "zone", "zoom",
];

const CHECKSUM_LEN: usize = 4;

/// Lookup from a (first, last) letter pair to the byte value, built lazily.
fn minimal_table() -> &'static [i16; 26 * 26] {
    static TABLE: OnceLock<[i16; 26 * 26]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [-1i16; 26 * 26];
        for (value, word) in WORDS.iter().enumerate() {
            let bytes = word.as_bytes();
            let first = (bytes[0] - b'a') as usize;
            let last = (bytes[3] - b'a') as usize;
            table[first * 26 + last] = value as i16;
        }
        table
    })
}

/// Encode `data` (with an appended CRC-32) in the given style.
#[must_use]
pub fn encode(data: &[u8], style: Style) -> String {
    let mut body = data.to_vec();
    body.extend_from_slice(&crc32(data).to_be_bytes());

    match style {
        Style::Standard => {
            let words: Vec<&str> = body.iter().map(|&b| WORDS[b as usize]).collect();
            words.join(" ")
        }
        Style::Minimal => {
            let mut out = String::with_capacity(body.len() * 2);
            for &b in &body {
                let word = WORDS[b as usize].as_bytes();
                out.push(word[0] as char);
                out.push(word[3] as char);
            }
            out
        }
    }
}

/// Decode bytewords text, verifying and stripping the checksum suffix.
///
/// Case-insensitive.
///
/// # Errors
///
/// Returns `BytewordsError::UnknownWord` for anything outside the table,
/// `OddLength`/`TooShort` for structurally impossible input, and
/// `InvalidChecksum` when the suffix disagrees with the body.
pub fn decode(text: &str, style: Style) -> Result<Vec<u8>, BytewordsError> {
    let lowered = text.to_ascii_lowercase();
    let body = match style {
        Style::Standard => {
            let mut body = Vec::new();
            for word in lowered.split_whitespace() {
                let index = WORDS
                    .binary_search(&word)
                    .map_err(|_| BytewordsError::UnknownWord(word.to_string()))?;
                body.push(index as u8);
            }
            body
        }
        Style::Minimal => {
            let letters = lowered.as_bytes();
            if letters.len() % 2 != 0 {
                return Err(BytewordsError::OddLength);
            }
            let mut body = Vec::with_capacity(letters.len() / 2);
            for pair in letters.chunks_exact(2) {
                body.push(decode_pair(pair[0], pair[1])?);
            }
            body
        }
    };

    strip_checksum(body)
}

fn decode_pair(first: u8, last: u8) -> Result<u8, BytewordsError> {
    if !first.is_ascii_lowercase() || !last.is_ascii_lowercase() {
        return Err(BytewordsError::UnknownWord(
            String::from_utf8_lossy(&[first, last]).into_owned(),
        ));
    }
    let index = (first - b'a') as usize * 26 + (last - b'a') as usize;
    match minimal_table()[index] {
        -1 => Err(BytewordsError::UnknownWord(
            String::from_utf8_lossy(&[first, last]).into_owned(),
        )),
        value => Ok(value as u8),
    }
}

fn strip_checksum(mut body: Vec<u8>) -> Result<Vec<u8>, BytewordsError> {
    if body.len() < CHECKSUM_LEN {
        return Err(BytewordsError::TooShort);
    }
    let split = body.len() - CHECKSUM_LEN;
    let suffix = body.split_off(split);
    if suffix != crc32(&body).to_be_bytes() {
        return Err(BytewordsError::InvalidChecksum);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sound() {
        assert!(WORDS.iter().all(|w| w.len() == 4));
        // Alphabetical order is what binary_search relies on.
        let mut sorted = WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted.as_slice(), WORDS.as_slice());
        // Every (first, last) pair is distinct.
        let mut pairs: Vec<(u8, u8)> = WORDS
            .iter()
            .map(|w| (w.as_bytes()[0], w.as_bytes()[3]))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 256);
    }

    #[test]
    fn minimal_known_vector() {
        // One zero byte plus its CRC-32 (0xd202ef8d).
        assert_eq!(encode(&[0x00], Style::Minimal), "aetdaowslg");
        assert_eq!(decode("aetdaowslg", Style::Minimal).unwrap(), vec![0x00]);
    }

    #[test]
    fn minimal_wolf_vector() {
        assert_eq!(encode(b"Wolf", Style::Minimal), "hgjljziyhklklruo");
        assert_eq!(
            decode("hgjljziyhklklruo", Style::Minimal).unwrap(),
            b"Wolf".to_vec()
        );
    }

    #[test]
    fn standard_known_vector() {
        let encoded = encode(&[0x00, 0x01, 0xff], Style::Standard);
        assert_eq!(encoded, "able acid zoom stub hard aunt urge");
        assert_eq!(
            decode(&encoded, Style::Standard).unwrap(),
            vec![0x00, 0x01, 0xff]
        );
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(
            decode("HGJLJZIYHKLKLRUO", Style::Minimal).unwrap(),
            b"Wolf".to_vec()
        );
        assert_eq!(
            decode("Able Acid Zoom Stub Hard Aunt Urge", Style::Standard).unwrap(),
            vec![0x00, 0x01, 0xff]
        );
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        for style in [Style::Standard, Style::Minimal] {
            let encoded = encode(&data, style);
            assert_eq!(decode(&encoded, style).unwrap(), data);
        }
    }

    #[test]
    fn corrupted_text_fails_checksum() {
        let mut encoded = encode(b"payload", Style::Minimal);
        // Swap the leading pair for a different valid pair ("ae" -> "ad").
        let original = encoded.clone();
        encoded.replace_range(0..2, if &original[0..2] == "ad" { "ae" } else { "ad" });
        let result = decode(&encoded, Style::Minimal);
        assert_eq!(result, Err(BytewordsError::InvalidChecksum));
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            decode("abc", Style::Minimal),
            Err(BytewordsError::OddLength)
        );
        assert_eq!(decode("aeae", Style::Minimal), Err(BytewordsError::TooShort));
        assert!(matches!(
            decode("qq", Style::Minimal),
            Err(BytewordsError::UnknownWord(_))
        ));
        assert!(matches!(
            decode("able notaword", Style::Standard),
            Err(BytewordsError::UnknownWord(_))
        ));
        assert!(matches!(
            decode("a1b2", Style::Minimal),
            Err(BytewordsError::UnknownWord(_))
        ));
    }

    #[test]
    fn empty_payload_roundtrip() {
        // A bare checksum over zero bytes still encodes and decodes.
        let encoded = encode(&[], Style::Minimal);
        assert_eq!(encoded.len(), 8);
        assert_eq!(decode(&encoded, Style::Minimal).unwrap(), Vec::<u8>::new());
    }
}
