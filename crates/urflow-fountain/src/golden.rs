//! Structural reference vectors for the fountain schedule.
//!
//! These tests pin down the observable shape of the encoding - fragment
//! counts, prelude ordering, determinism - so schedule regressions show up as
//! concrete vector mismatches rather than occasional decode stalls.

#![allow(clippy::cast_possible_truncation)]

#[cfg(test)]
mod tests {
    use crate::{FountainConfig, FountainDecoder, FountainEncoder};

    fn golden_config() -> FountainConfig {
        FountainConfig {
            max_fragment_len: 100,
        }
    }

    /// Create a deterministic payload of given size.
    fn deterministic_message(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn golden_1024_fragment_geometry() {
        let encoder = FountainEncoder::new(&deterministic_message(1024), &golden_config()).unwrap();

        // ceil(1024 / 100) = 11 fragments of ceil(1024 / 11) = 94 bytes.
        assert_eq!(encoder.fragment_count(), 11);
        assert_eq!(encoder.part_at(1).data.len(), 94);
        assert_eq!(encoder.part_at(1).message_len, 1024);
    }

    #[test]
    fn golden_1024_prelude_forward() {
        let message = deterministic_message(1024);
        let encoder = FountainEncoder::new(&message, &golden_config()).unwrap();

        let mut decoder = FountainDecoder::new();
        for seq_num in 1..=11u32 {
            decoder.receive(&encoder.part_at(seq_num));
        }
        assert!(decoder.is_complete());
        assert_eq!(decoder.message().unwrap().unwrap(), message);
    }

    #[test]
    fn golden_1024_prelude_reverse_matches_forward() {
        let message = deterministic_message(1024);
        let encoder = FountainEncoder::new(&message, &golden_config()).unwrap();

        let mut forward = FountainDecoder::new();
        let mut reverse = FountainDecoder::new();
        for seq_num in 1..=11u32 {
            forward.receive(&encoder.part_at(seq_num));
            reverse.receive(&encoder.part_at(12 - seq_num));
        }

        assert_eq!(
            forward.message().unwrap().unwrap(),
            reverse.message().unwrap().unwrap()
        );
    }

    #[test]
    fn golden_zero_payload_bytes() {
        // All-zero payloads still fragment and mix; only the checksum and
        // data differ from a structured payload of the same length.
        let message = vec![0u8; 1024];
        let encoder = FountainEncoder::new(&message, &golden_config()).unwrap();
        assert_eq!(encoder.fragment_count(), 11);

        let mut decoder = FountainDecoder::new();
        for seq_num in 1..=11u32 {
            decoder.receive(&encoder.part_at(seq_num));
        }
        assert_eq!(decoder.message().unwrap().unwrap(), message);
    }

    #[test]
    fn golden_schedules_stable_across_sessions() {
        let message = deterministic_message(1024);
        let first = FountainEncoder::new(&message, &golden_config()).unwrap();
        let second = FountainEncoder::new(&message, &golden_config()).unwrap();

        for seq_num in [1u32, 11, 12, 13, 100, 1000, 65_536] {
            assert_eq!(first.part_at(seq_num), second.part_at(seq_num));
        }
    }

    #[test]
    fn golden_single_part_geometry() {
        let message = deterministic_message(100);
        let encoder = FountainEncoder::new(&message, &golden_config()).unwrap();
        assert!(encoder.is_single_part());
        assert_eq!(encoder.fragment_count(), 1);

        // One part completes the session.
        let mut decoder = FountainDecoder::new();
        decoder.receive(&encoder.part_at(1));
        assert!(decoder.is_complete());
        assert_eq!(decoder.message().unwrap().unwrap(), message);
    }
}
