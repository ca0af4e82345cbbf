//! Deterministic part schedule: checksum, seeded RNG, degree and index
//! selection.
//!
//! Every choice here is a pure function of `(checksum, seq_num, draw index)`.
//! Two independently written encoders and decoders must agree on which
//! fragments part `n` mixes, so nothing below may touch a nondeterministic
//! randomness source.

// Degree and index counts are bounded by seq_len, far below any cast limit.
#![allow(clippy::cast_possible_truncation)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// CRC-32 (ISO-HDLC) digest of `data`.
///
/// Doubles as the message integrity check and the per-message entropy for the
/// mixing schedule, so two messages of identical length still get distinct
/// schedules.
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Deterministic RNG for one part.
///
/// The 8 bytes of `(seq_num, checksum)` are expanded into a full 256-bit
/// generator state by digesting them.
#[must_use]
pub fn part_rng(seq_num: u32, checksum: u32) -> ChaCha20Rng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seq_num.to_be_bytes());
    hasher.update(&checksum.to_be_bytes());
    ChaCha20Rng::from_seed(*hasher.finalize().as_bytes())
}

/// Sample a mix degree from `1..=seq_len`.
///
/// The distribution weights degree `d` by `1/d`: low-order parts dominate,
/// keeping the average equation cheap to cancel, while high-order parts still
/// appear often enough to cover stragglers.
#[must_use]
pub fn choose_degree(seq_len: u32, rng: &mut ChaCha20Rng) -> u32 {
    debug_assert!(seq_len >= 1);

    let total: f64 = (1..=seq_len).map(|d| 1.0 / f64::from(d)).sum();
    let mut draw = rng.gen_range(0.0..total);
    for degree in 1..seq_len {
        draw -= 1.0 / f64::from(degree);
        if draw < 0.0 {
            return degree;
        }
    }
    seq_len
}

/// Fragment indices mixed into part `seq_num` of a `seq_len`-fragment
/// message.
///
/// Parts `1..=seq_len` form the pure prelude: part `n` covers exactly index
/// `n - 1`, so the first full cycle alone reconstructs the message. Every
/// other tick draws a degree and then picks that many distinct indices with a
/// partial Fisher-Yates shuffle over the part's own RNG stream.
#[must_use]
pub fn choose_fragment_indexes(seq_num: u32, seq_len: u32, checksum: u32) -> Vec<u32> {
    if seq_num >= 1 && seq_num <= seq_len {
        return vec![seq_num - 1];
    }

    let mut rng = part_rng(seq_num, checksum);
    let degree = choose_degree(seq_len, &mut rng) as usize;

    let mut indexes: Vec<u32> = (0..seq_len).collect();
    for i in 0..degree {
        let j = rng.gen_range(i..indexes.len());
        indexes.swap(i, j);
    }
    indexes.truncate(degree);
    indexes
}
