//! Rateless XOR fountain coding over fixed-size payload fragments.
//!
//! A message is split into `seq_len` equal-length fragments (the last one
//! zero-padded) and transmitted as an unbounded cyclic stream of parts:
//! - parts `1..=seq_len` are *pure* - each carries one fragment in order, so
//!   one full cycle alone always suffices for reconstruction;
//! - every later part is *mixed* - the XOR of a deterministic pseudo-random
//!   subset of fragments, so a receiver that missed arbitrary parts of the
//!   prelude can still finish from whatever it happens to catch.
//!
//! The mixing schedule is a pure function of `(checksum, seq_num)`: no part
//! ever depends on encoder state, and independently constructed encoders for
//! the same message emit byte-identical streams.
//!
//! The decoder accumulates parts in any order, with loss and duplication, and
//! incrementally solves the resulting XOR equation system (Gaussian
//! elimination over GF(2), driven by a worklist instead of eager re-scans).

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod decode;
mod encode;
mod error;
mod fragment;
mod golden;
mod schedule;

pub use config::FountainConfig;
pub use decode::FountainDecoder;
pub use encode::{FountainEncoder, FountainPart};
pub use error::{DecodeError, EncodeError};
pub use fragment::FragmentSet;
pub use schedule::{choose_degree, choose_fragment_indexes, crc32, part_rng};
