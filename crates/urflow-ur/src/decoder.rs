//! Decoding session: a stream of scanned strings, one reconstructed UR.

use tracing::debug;

use urflow_fountain::FountainDecoder;

use crate::error::UrError;
use crate::part::{parse, ParsedPart};
use crate::ur::Ur;

/// Accumulates scanned strings until a UR is reconstructed.
///
/// Built for a camera pipeline: strings arrive in arbitrary order, with
/// duplicates, stale frames from other sessions, and outright garbage. None
/// of that aborts the session - offending strings are discarded and scanning
/// continues. The first valid part locks the expected type tag.
#[derive(Default)]
pub struct UrDecoder {
    expected_type: Option<String>,
    fountain: FountainDecoder,
    single: Option<Vec<u8>>,
    received_count: usize,
}

impl UrDecoder {
    /// Create an empty decoding session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one scanned string.
    ///
    /// Returns `true` if the string advanced the reconstruction. Unparseable
    /// or foreign strings return `false` and leave the session untouched.
    pub fn receive(&mut self, text: &str) -> bool {
        if self.is_complete() {
            return false;
        }

        let parsed = match parse(text) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!(%error, "discarding unparseable scan");
                return false;
            }
        };

        match parsed {
            ParsedPart::Single { ur_type, cbor } => {
                if !self.lock_type(&ur_type) {
                    return false;
                }
                self.received_count += 1;
                self.single = Some(cbor);
                debug!(%ur_type, "single-part message complete");
                true
            }
            ParsedPart::Fragment { ur_type, part } => {
                if !self.lock_type(&ur_type) {
                    return false;
                }
                self.received_count += 1;
                self.fountain.receive(&part)
            }
        }
    }

    /// Whether a full message has been reconstructed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.single.is_some() || self.fountain.is_complete()
    }

    /// The reconstructed UR.
    ///
    /// `Ok(None)` while parts are still missing.
    ///
    /// # Errors
    ///
    /// Returns `UrError::Decode` on a terminal checksum mismatch; the caller
    /// should discard this session and rescan.
    pub fn message(&self) -> Result<Option<Ur>, UrError> {
        let Some(ur_type) = &self.expected_type else {
            return Ok(None);
        };
        if let Some(cbor) = &self.single {
            return Ok(Some(Ur::new(ur_type.clone(), cbor.clone())?));
        }
        match self.fountain.message()? {
            Some(cbor) => Ok(Some(Ur::new(ur_type.clone(), cbor)?)),
            None => Ok(None),
        }
    }

    /// Type tag locked by the first valid part, if any.
    #[must_use]
    pub fn expected_type(&self) -> Option<&str> {
        self.expected_type.as_deref()
    }

    /// Strings accepted into the session (excluding discarded ones).
    #[must_use]
    pub const fn received_count(&self) -> usize {
        self.received_count
    }

    /// Fragment count of the locked session, once known.
    #[must_use]
    pub fn expected_fragment_count(&self) -> Option<u32> {
        self.fountain.expected_fragment_count()
    }

    /// Recovered fraction of the message, in `0.0..=1.0`.
    #[must_use]
    pub fn estimated_progress(&self) -> f64 {
        if self.single.is_some() {
            1.0
        } else {
            self.fountain.estimated_progress()
        }
    }

    fn lock_type(&mut self, ur_type: &str) -> bool {
        match &self.expected_type {
            None => {
                self.expected_type = Some(ur_type.to_string());
                true
            }
            Some(expected) if expected == ur_type => true,
            Some(expected) => {
                debug!(%expected, got = %ur_type, "discarding part of foreign type");
                false
            }
        }
    }
}
