//! Fragment splitting and reassembly.

use crate::config::FountainConfig;

/// A message cut into equal-length fragments.
///
/// The final fragment is zero-padded up to the uniform length; the original
/// message length is tracked separately so the padding is always recoverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentSet {
    fragments: Vec<Vec<u8>>,
    fragment_len: usize,
    message_len: usize,
}

impl FragmentSet {
    /// Split a message per the config.
    #[must_use]
    pub fn new(message: &[u8], config: &FountainConfig) -> Self {
        let fragment_len = config.fragment_len(message.len());
        let fragments = if fragment_len == 0 {
            Vec::new()
        } else {
            message
                .chunks(fragment_len)
                .map(|chunk| {
                    let mut fragment = chunk.to_vec();
                    fragment.resize(fragment_len, 0);
                    fragment
                })
                .collect()
        };

        Self {
            fragments,
            fragment_len,
            message_len: message.len(),
        }
    }

    /// Number of fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Uniform fragment length in bytes.
    #[must_use]
    pub const fn fragment_len(&self) -> usize {
        self.fragment_len
    }

    /// Unpadded message length in bytes.
    #[must_use]
    pub const fn message_len(&self) -> usize {
        self.message_len
    }

    /// Fragment at `index`, if in range.
    #[must_use]
    pub fn fragment(&self, index: usize) -> Option<&[u8]> {
        self.fragments.get(index).map(Vec::as_slice)
    }

    /// Concatenate in-order fragments and strip the padding.
    ///
    /// `fragments` must hold all fragments in index order; `message_len`
    /// bounds the result.
    #[must_use]
    pub fn join(fragments: &[Vec<u8>], message_len: usize) -> Vec<u8> {
        let mut message = Vec::with_capacity(message_len);
        for fragment in fragments {
            message.extend_from_slice(fragment);
        }
        message.truncate(message_len);
        message
    }
}

/// XOR `other` into `target`, byte for byte.
///
/// Both slices must have the uniform fragment length.
pub fn xor_into(target: &mut [u8], other: &[u8]) {
    debug_assert_eq!(target.len(), other.len());
    for (t, o) in target.iter_mut().zip(other) {
        *t ^= o;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_fragment_len: usize) -> FountainConfig {
        FountainConfig { max_fragment_len }
    }

    #[test]
    fn split_exact_multiple() {
        let message = vec![7u8; 30];
        let set = FragmentSet::new(&message, &config(10));
        assert_eq!(set.fragment_count(), 3);
        assert_eq!(set.fragment_len(), 10);
        assert_eq!(set.message_len(), 30);
        for i in 0..3 {
            assert_eq!(set.fragment(i).unwrap(), &[7u8; 10]);
        }
        assert!(set.fragment(3).is_none());
    }

    #[test]
    fn last_fragment_zero_padded() {
        let message: Vec<u8> = (1..=25).collect();
        let set = FragmentSet::new(&message, &config(10));
        // 25 bytes -> 3 fragments of ceil(25/3) = 9 bytes.
        assert_eq!(set.fragment_count(), 3);
        assert_eq!(set.fragment_len(), 9);
        assert_eq!(set.fragment(0).unwrap(), &message[0..9]);
        assert_eq!(set.fragment(1).unwrap(), &message[9..18]);

        let mut expected_last = message[18..25].to_vec();
        expected_last.extend_from_slice(&[0, 0]);
        assert_eq!(set.fragment(2).unwrap(), expected_last.as_slice());
    }

    #[test]
    fn join_strips_padding() {
        let message: Vec<u8> = (0..=99).collect();
        let set = FragmentSet::new(&message, &config(23));
        let fragments: Vec<Vec<u8>> = (0..set.fragment_count())
            .map(|i| set.fragment(i).unwrap().to_vec())
            .collect();
        assert_eq!(FragmentSet::join(&fragments, message.len()), message);
    }

    #[test]
    fn single_fragment_message() {
        let message = b"short".to_vec();
        let set = FragmentSet::new(&message, &config(100));
        assert_eq!(set.fragment_count(), 1);
        assert_eq!(set.fragment_len(), 5);
        assert_eq!(set.fragment(0).unwrap(), message.as_slice());
    }

    #[test]
    fn xor_is_involutive() {
        let a = [0x0fu8, 0xf0, 0xaa];
        let b = [0xffu8, 0x0f, 0x55];
        let mut mixed = a;
        xor_into(&mut mixed, &b);
        assert_eq!(mixed, [0xf0, 0xff, 0xff]);
        xor_into(&mut mixed, &b);
        assert_eq!(mixed, a);
    }
}
