//! Fountain encoder: pure part generation over a fragment set.

// Header fields are u32 on the wire; construction bounds the message length.
#![allow(clippy::cast_possible_truncation)]

use crate::config::FountainConfig;
use crate::error::EncodeError;
use crate::fragment::{xor_into, FragmentSet};
use crate::schedule::{choose_fragment_indexes, crc32};

/// One transmittable unit of a fragmented message.
///
/// `seq_num` is a generator tick, not a fragment index: it keeps increasing
/// past `seq_len`, and the schedule decides which fragment combination each
/// tick carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FountainPart {
    /// Generator tick this part was emitted at.
    pub seq_num: u32,
    /// Number of fragments in the message.
    pub seq_len: u32,
    /// Unpadded message length in bytes.
    pub message_len: u32,
    /// CRC-32 of the unpadded message.
    pub checksum: u32,
    /// Fragment data: one fragment, or the XOR of several.
    pub data: Vec<u8>,
}

impl FountainPart {
    /// Fragment indices this part mixes.
    #[must_use]
    pub fn indexes(&self) -> Vec<u32> {
        choose_fragment_indexes(self.seq_num, self.seq_len, self.checksum)
    }

    /// Whether this part belongs to the pure prelude.
    #[must_use]
    pub const fn is_pure(&self) -> bool {
        self.seq_num >= 1 && self.seq_num <= self.seq_len
    }
}

/// Fountain encoder for one message.
///
/// Owns the fragment set for its whole life. `part_at` is a pure function of
/// the construction inputs and `seq_num`, so one encoder may serve concurrent
/// readers; `next_part` is a stateful convenience for drivers that just want
/// the next frame to display.
pub struct FountainEncoder {
    fragments: FragmentSet,
    checksum: u32,
    next_seq_num: u32,
}

impl FountainEncoder {
    /// Create an encoder for `message`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::EmptyMessage` for an empty message,
    /// `EncodeError::InvalidFragmentLength` if the config allows no bytes per
    /// fragment, and `EncodeError::MessageTooLarge` if the length does not
    /// fit the u32 wire header.
    pub fn new(message: &[u8], config: &FountainConfig) -> Result<Self, EncodeError> {
        if config.max_fragment_len < 1 {
            return Err(EncodeError::InvalidFragmentLength(config.max_fragment_len));
        }
        if message.is_empty() {
            return Err(EncodeError::EmptyMessage);
        }
        if message.len() > u32::MAX as usize {
            return Err(EncodeError::MessageTooLarge {
                len: message.len(),
                max: u32::MAX as usize,
            });
        }

        Ok(Self {
            fragments: FragmentSet::new(message, config),
            checksum: crc32(message),
            next_seq_num: 0,
        })
    }

    /// Generate the part for an arbitrary tick.
    ///
    /// Deterministic: two encoders built from the same message and config
    /// return byte-identical parts for every `seq_num`.
    #[must_use]
    pub fn part_at(&self, seq_num: u32) -> FountainPart {
        let seq_len = self.fragment_count();
        let indexes = choose_fragment_indexes(seq_num, seq_len, self.checksum);

        let mut data = self
            .fragments
            .fragment(indexes[0] as usize)
            .map(<[u8]>::to_vec)
            .unwrap_or_default();
        for &index in &indexes[1..] {
            if let Some(fragment) = self.fragments.fragment(index as usize) {
                xor_into(&mut data, fragment);
            }
        }

        FountainPart {
            seq_num,
            seq_len,
            message_len: self.fragments.message_len() as u32,
            checksum: self.checksum,
            data,
        }
    }

    /// Tick the generator and return the next part.
    ///
    /// Ticks start at 1, so the first `fragment_count` calls emit the pure
    /// prelude. Wraps around after `u32::MAX` parts.
    pub fn next_part(&mut self) -> FountainPart {
        self.next_seq_num = self.next_seq_num.wrapping_add(1);
        self.part_at(self.next_seq_num)
    }

    /// Number of fragments (`seq_len` on the wire).
    #[must_use]
    pub fn fragment_count(&self) -> u32 {
        self.fragments.fragment_count() as u32
    }

    /// Whether the whole message fits in one part.
    #[must_use]
    pub fn is_single_part(&self) -> bool {
        self.fragments.fragment_count() == 1
    }

    /// Unpadded message length in bytes.
    #[must_use]
    pub const fn message_len(&self) -> usize {
        self.fragments.message_len()
    }

    /// CRC-32 of the message.
    #[must_use]
    pub const fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Tick of the most recently emitted part (0 before the first).
    #[must_use]
    pub const fn current_seq_num(&self) -> u32 {
        self.next_seq_num
    }
}
