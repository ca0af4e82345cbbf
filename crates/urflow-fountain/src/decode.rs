//! Fountain decoder: incremental XOR-equation solving over received parts.

// Fragment counts are bounded by the u32 wire header.
#![allow(clippy::cast_possible_truncation)]

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::encode::FountainPart;
use crate::error::DecodeError;
use crate::fragment::{xor_into, FragmentSet};
use crate::schedule::crc32;

/// Header tuple locked in by the first accepted part.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Session {
    seq_len: u32,
    message_len: u32,
    checksum: u32,
    fragment_len: usize,
}

impl Session {
    fn matches(&self, part: &FountainPart) -> bool {
        self.seq_len == part.seq_len
            && self.message_len == part.message_len
            && self.checksum == part.checksum
            && self.fragment_len == part.data.len()
    }
}

/// Accumulates parts in any order, with loss and duplication, until the
/// message is reconstructed.
///
/// Internally this is Gaussian elimination over GF(2), done incrementally: a
/// mixed part is stored as an unresolved XOR equation, and whenever a
/// fragment becomes known it is cancelled out of every stored equation that
/// references it. Reductions that leave a single unknown yield a new known
/// fragment; an explicit worklist drains the resulting cascade so each
/// `receive` call does bounded rework.
///
/// Single-writer: all mutation goes through `&mut self`. Once complete the
/// decoder is inert - further parts are ignored.
#[derive(Default)]
pub struct FountainDecoder {
    session: Option<Session>,
    /// Solved fragments by index. Ordered so reassembly is a plain scan.
    solved: BTreeMap<u32, Vec<u8>>,
    /// Unresolved equations keyed by their sorted index set.
    pending: HashMap<Vec<u32>, Vec<u8>>,
    received_count: usize,
    discarded_count: usize,
}

impl FountainDecoder {
    /// Create an empty decoder. The first accepted part locks the session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one part.
    ///
    /// Returns `true` if the part advanced the reconstruction. Duplicates,
    /// parts from a different encoding session, and structurally implausible
    /// parts are discarded (with a debug event) and return `false`; none of
    /// them are fatal.
    pub fn receive(&mut self, part: &FountainPart) -> bool {
        if self.is_complete() {
            return false;
        }

        match &self.session {
            None => {
                if !Self::plausible(part) {
                    debug!(
                        seq_num = part.seq_num,
                        seq_len = part.seq_len,
                        "discarding implausible part"
                    );
                    self.discarded_count += 1;
                    return false;
                }
                self.session = Some(Session {
                    seq_len: part.seq_len,
                    message_len: part.message_len,
                    checksum: part.checksum,
                    fragment_len: part.data.len(),
                });
            }
            Some(session) => {
                if !session.matches(part) {
                    debug!(
                        seq_num = part.seq_num,
                        part_checksum = part.checksum,
                        session_checksum = session.checksum,
                        "discarding part from a different session"
                    );
                    self.discarded_count += 1;
                    return false;
                }
            }
        }

        self.received_count += 1;

        let mut indexes = part.indexes();
        indexes.sort_unstable();
        self.absorb(indexes, part.data.clone())
    }

    /// Whether every fragment has been recovered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| self.solved.len() as u32 == s.seq_len)
    }

    /// The reconstructed message.
    ///
    /// `Ok(None)` while fragments are still missing.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::ChecksumMismatch` if the reassembled bytes
    /// disagree with the checksum carried by the parts. The session is not
    /// recoverable after that; discard the decoder and rescan.
    pub fn message(&self) -> Result<Option<Vec<u8>>, DecodeError> {
        let Some(session) = &self.session else {
            return Ok(None);
        };
        if !self.is_complete() {
            return Ok(None);
        }

        let fragments: Vec<Vec<u8>> = self.solved.values().cloned().collect();
        let message = FragmentSet::join(&fragments, session.message_len as usize);

        let got = crc32(&message);
        if got != session.checksum {
            return Err(DecodeError::ChecksumMismatch {
                expected: session.checksum,
                got,
            });
        }

        Ok(Some(message))
    }

    /// Fragment count of the locked session, if any part has been accepted.
    #[must_use]
    pub fn expected_fragment_count(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.seq_len)
    }

    /// Indices recovered so far, ascending.
    #[must_use]
    pub fn solved_indexes(&self) -> Vec<u32> {
        self.solved.keys().copied().collect()
    }

    /// Parts accepted into the session (excluding discarded ones).
    #[must_use]
    pub const fn received_count(&self) -> usize {
        self.received_count
    }

    /// Parts discarded as foreign, implausible, or post-completion noise.
    #[must_use]
    pub const fn discarded_count(&self) -> usize {
        self.discarded_count
    }

    /// Recovered fraction of the fragment set, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimated_progress(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| {
            if s.seq_len == 0 {
                0.0
            } else {
                self.solved.len() as f64 / f64::from(s.seq_len)
            }
        })
    }

    /// Structural sanity for a session-opening part.
    fn plausible(part: &FountainPart) -> bool {
        if part.seq_len == 0 || part.data.is_empty() || part.message_len == 0 {
            return false;
        }
        let capacity = part.data.len() as u64 * u64::from(part.seq_len);
        u64::from(part.message_len) <= capacity
    }

    /// Reduce one equation and drain the resulting cascade.
    fn absorb(&mut self, indexes: Vec<u32>, data: Vec<u8>) -> bool {
        let mut advanced = false;
        let mut worklist = vec![(indexes, data)];

        while let Some((indexes, mut data)) = worklist.pop() {
            // Cancel already-known members out of the equation.
            let mut remaining = Vec::with_capacity(indexes.len());
            for index in indexes {
                if let Some(known) = self.solved.get(&index) {
                    xor_into(&mut data, known);
                } else {
                    remaining.push(index);
                }
            }

            match remaining.len() {
                // Fully cancelled: a duplicate of information we already hold.
                0 => {}
                1 => {
                    let index = remaining[0];
                    self.solved.insert(index, data);
                    advanced = true;

                    // The new fragment may unlock stored equations; queue
                    // every equation that references it for re-reduction.
                    let affected: Vec<Vec<u32>> = self
                        .pending
                        .keys()
                        .filter(|key| key.binary_search(&index).is_ok())
                        .cloned()
                        .collect();
                    for key in affected {
                        if let Some(value) = self.pending.remove(&key) {
                            worklist.push((key, value));
                        }
                    }
                }
                _ => {
                    // Still under-determined; store it (deduplicated by its
                    // reduced index set) for a later cascade.
                    if !self.pending.contains_key(&remaining) {
                        self.pending.insert(remaining, data);
                        advanced = true;
                    }
                }
            }
        }

        if self.is_complete() {
            debug!(
                received = self.received_count,
                discarded = self.discarded_count,
                "message reconstruction complete"
            );
            self.pending.clear();
        }
        advanced
    }
}
