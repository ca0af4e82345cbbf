//! Encoding session: one UR, an unbounded stream of part strings.

use urflow_fountain::{FountainConfig, FountainEncoder};

use crate::error::UrError;
use crate::part::{render_fragment, render_single};
use crate::ur::Ur;

/// Emits the part strings for one UR.
///
/// Owns the UR for its whole life. A single-part session renders the same
/// string on every tick; a fragmented session walks the fountain schedule.
pub struct UrEncoder {
    ur: Ur,
    fountain: FountainEncoder,
}

impl UrEncoder {
    /// Create an encoding session over the UR's canonical CBOR bytes.
    ///
    /// # Errors
    ///
    /// Propagates `EncodeError` from the fountain layer for an empty UR body
    /// or an unusable fragment length.
    pub fn new(ur: Ur, config: &FountainConfig) -> Result<Self, UrError> {
        let fountain = FountainEncoder::new(ur.cbor(), config)?;
        Ok(Self { ur, fountain })
    }

    /// Render the part for an arbitrary tick, without advancing the session.
    ///
    /// # Errors
    ///
    /// Returns a codec error if the part body exceeds the encoding size
    /// guard.
    pub fn part_at(&self, seq_num: u32) -> Result<String, UrError> {
        if self.fountain.is_single_part() {
            return Ok(render_single(&self.ur));
        }
        render_fragment(self.ur.ur_type(), &self.fountain.part_at(seq_num))
    }

    /// Render the next part in the cyclic stream.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::part_at`].
    pub fn next_part(&mut self) -> Result<String, UrError> {
        if self.fountain.is_single_part() {
            return Ok(render_single(&self.ur));
        }
        render_fragment(self.ur.ur_type(), &self.fountain.next_part())
    }

    /// Whether the whole message fits in one part.
    #[must_use]
    pub fn is_single_part(&self) -> bool {
        self.fountain.is_single_part()
    }

    /// Number of fragments (`seq_len` in every multi-part string).
    #[must_use]
    pub fn fragment_count(&self) -> u32 {
        self.fountain.fragment_count()
    }

    /// The UR this session transmits.
    #[must_use]
    pub const fn ur(&self) -> &Ur {
        &self.ur
    }
}
