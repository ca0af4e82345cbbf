//! Property-based tests for fountain encoding/decoding.
//!
//! Test categories:
//! 1. **Round-trip**: any sufficient part set reconstructs the exact message
//! 2. **Order-independence**: delivery order never changes the result
//! 3. **Idempotence**: re-delivering parts never changes decoder state
//! 4. **Noise tolerance**: foreign parts never prevent completion

#![allow(clippy::cast_possible_truncation)]

use proptest::prelude::*;
use urflow_fountain::{FountainConfig, FountainDecoder, FountainEncoder};

/// Strategy for non-empty messages of modest size.
fn message_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..600)
}

/// Strategy for fragment length limits.
fn max_fragment_len() -> impl Strategy<Value = usize> {
    1usize..80
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prelude_roundtrip_any_order(
        message in message_bytes(),
        max_len in max_fragment_len(),
        order_seed in any::<u64>(),
    ) {
        let config = FountainConfig { max_fragment_len: max_len };
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let seq_len = encoder.fragment_count();

        // Deterministic pseudo-shuffle of the prelude ticks.
        let mut ticks: Vec<u32> = (1..=seq_len).collect();
        let mut state = order_seed | 1;
        for i in (1..ticks.len()).rev() {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let j = (state >> 33) as usize % (i + 1);
            ticks.swap(i, j);
        }

        let mut decoder = FountainDecoder::new();
        for seq_num in ticks {
            decoder.receive(&encoder.part_at(seq_num));
        }

        prop_assert!(decoder.is_complete());
        prop_assert_eq!(decoder.message().unwrap().unwrap(), message);
    }

    #[test]
    fn redelivery_is_idempotent(
        message in message_bytes(),
        max_len in max_fragment_len(),
    ) {
        let config = FountainConfig { max_fragment_len: max_len };
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let seq_len = encoder.fragment_count();

        let mut once = FountainDecoder::new();
        let mut twice = FountainDecoder::new();
        for seq_num in 1..=seq_len {
            let part = encoder.part_at(seq_num);
            once.receive(&part);
            twice.receive(&part);
            twice.receive(&part);
        }

        prop_assert_eq!(once.solved_indexes(), twice.solved_indexes());
        prop_assert_eq!(
            once.message().unwrap().unwrap(),
            twice.message().unwrap().unwrap()
        );
    }

    #[test]
    fn foreign_parts_never_block_completion(
        message in message_bytes(),
        noise in message_bytes(),
        max_len in max_fragment_len(),
    ) {
        let config = FountainConfig { max_fragment_len: max_len };
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let noise_encoder = FountainEncoder::new(&noise, &config).unwrap();

        let mut decoder = FountainDecoder::new();
        // Lock the session on the real stream first, then interleave.
        decoder.receive(&encoder.part_at(1));
        for seq_num in 2..=encoder.fragment_count() {
            decoder.receive(&noise_encoder.part_at(seq_num));
            decoder.receive(&encoder.part_at(seq_num));
        }

        prop_assert!(decoder.is_complete());
        prop_assert_eq!(decoder.message().unwrap().unwrap(), message);
    }

    #[test]
    fn mixed_tail_reconstructs_missing_prelude(
        message in prop::collection::vec(any::<u8>(), 50..400),
        skip_seed in any::<u32>(),
    ) {
        let config = FountainConfig { max_fragment_len: 20 };
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        let seq_len = encoder.fragment_count();
        let skipped = skip_seed % seq_len + 1;

        // Drop one prelude part, then stream mixed parts until complete.
        let mut decoder = FountainDecoder::new();
        for seq_num in (1..=seq_len).filter(|&n| n != skipped) {
            decoder.receive(&encoder.part_at(seq_num));
        }
        prop_assert!(!decoder.is_complete());

        let mut seq_num = seq_len;
        while !decoder.is_complete() {
            seq_num += 1;
            prop_assert!(seq_num < seq_len + 10_000, "decode stalled");
            decoder.receive(&encoder.part_at(seq_num));
        }
        prop_assert_eq!(decoder.message().unwrap().unwrap(), message);
    }

    #[test]
    fn single_part_boundary(message in prop::collection::vec(any::<u8>(), 1..100)) {
        let config = FountainConfig { max_fragment_len: 100 };
        let encoder = FountainEncoder::new(&message, &config).unwrap();
        prop_assert!(encoder.is_single_part());

        let mut decoder = FountainDecoder::new();
        decoder.receive(&encoder.part_at(1));
        prop_assert!(decoder.is_complete());
        prop_assert_eq!(decoder.message().unwrap().unwrap(), message);
    }
}
