//! Fountain encoder configuration.

use serde::{Deserialize, Serialize};

/// Fountain encoder configuration.
///
/// Controls how a message is cut into fragments before mixing. The single
/// knob is the maximum fragment length; the effective fragment length is
/// derived so that the padded message divides evenly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FountainConfig {
    /// Maximum fragment length in bytes.
    ///
    /// Default: 100 (fits comfortably in a mid-density scannable code).
    pub max_fragment_len: usize,
}

impl Default for FountainConfig {
    fn default() -> Self {
        Self {
            max_fragment_len: 100,
        }
    }
}

impl FountainConfig {
    /// Number of fragments a message of `message_len` bytes splits into.
    #[must_use]
    pub const fn fragment_count(&self, message_len: usize) -> usize {
        if message_len == 0 {
            return 0;
        }
        message_len.div_ceil(self.max_fragment_len)
    }

    /// Effective fragment length for a message of `message_len` bytes.
    ///
    /// `ceil(message_len / fragment_count)`: as large as possible while
    /// staying within `max_fragment_len`, distributing padding to the tail.
    #[must_use]
    pub const fn fragment_len(&self, message_len: usize) -> usize {
        let count = self.fragment_count(message_len);
        if count == 0 {
            return 0;
        }
        message_len.div_ceil(count)
    }

    /// Whether a message of `message_len` bytes fits in a single part.
    #[must_use]
    pub const fn is_single_part(&self, message_len: usize) -> bool {
        message_len <= self.max_fragment_len
    }
}
