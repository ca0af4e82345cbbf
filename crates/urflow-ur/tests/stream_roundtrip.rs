//! End-to-end stream tests: payload in, part strings over a lossy noisy
//! channel, payload out.

use urflow_fountain::FountainConfig;
use urflow_ur::{Ur, UrDecoder, UrEncoder};

fn config() -> FountainConfig {
    FountainConfig {
        max_fragment_len: 100,
    }
}

#[test]
fn kilobyte_of_zeros_round_trips() {
    let payload = vec![0u8; 1024];
    let ur = Ur::from_payload("bytes", &payload).unwrap();
    let encoder = UrEncoder::new(ur.clone(), &config()).unwrap();
    assert_eq!(encoder.fragment_count(), 11);

    let mut decoder = UrDecoder::new();
    for seq_num in 1..=11u32 {
        decoder.receive(&encoder.part_at(seq_num).unwrap());
    }

    assert!(decoder.is_complete());
    assert_eq!(decoder.message().unwrap().unwrap().payload().unwrap(), payload);
}

#[test]
fn reverse_delivery_yields_identical_output() {
    let payload = vec![0u8; 1024];
    let ur = Ur::from_payload("bytes", &payload).unwrap();
    let encoder = UrEncoder::new(ur, &config()).unwrap();

    let mut forward = UrDecoder::new();
    let mut reverse = UrDecoder::new();
    for seq_num in 1..=11u32 {
        forward.receive(&encoder.part_at(seq_num).unwrap());
        reverse.receive(&encoder.part_at(12 - seq_num).unwrap());
    }

    assert_eq!(
        forward.message().unwrap().unwrap(),
        reverse.message().unwrap().unwrap()
    );
}

#[test]
fn lossy_cyclic_stream_with_noise_completes() {
    let payload: Vec<u8> = (0..2500u32).map(|i| (i % 251) as u8).collect();
    let ur = Ur::from_payload("bytes", &payload).unwrap();
    let mut encoder = UrEncoder::new(ur.clone(), &config()).unwrap();

    let mut decoder = UrDecoder::new();
    let mut tick = 0u32;
    while !decoder.is_complete() {
        tick += 1;
        assert!(tick < 10_000, "decode stalled");

        let part = encoder.next_part().unwrap();
        // Simulate a shaky camera: drop every third frame, double-deliver
        // every fourth, and interleave junk reads.
        if tick % 3 == 0 {
            continue;
        }
        decoder.receive(&part);
        if tick % 4 == 0 {
            decoder.receive(&part);
        }
        if tick % 5 == 0 {
            decoder.receive("ur:bytes/not-even-close");
            decoder.receive("completely unrelated noise");
        }
    }

    assert_eq!(decoder.message().unwrap().unwrap(), ur);
}

#[test]
fn rendered_stream_survives_uppercase_transport() {
    let payload = vec![0xabu8; 700];
    let ur = Ur::from_payload("bytes", &payload).unwrap();
    let mut encoder = UrEncoder::new(ur.clone(), &config()).unwrap();

    let mut decoder = UrDecoder::new();
    while !decoder.is_complete() {
        let shouted = encoder.next_part().unwrap().to_ascii_uppercase();
        decoder.receive(&shouted);
    }

    assert_eq!(decoder.message().unwrap().unwrap(), ur);
}
