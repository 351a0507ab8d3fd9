//! Salted hash rounds with a keyed finisher.

use blake2::Blake2b512;
use hmac::{Hmac, Mac};
use rand::{rngs::StdRng, Rng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

type HmacSha512 = Hmac<Sha512>;

const KEY_COUNT: usize = 5;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Digest algorithms available to a single hash round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HashAlgo {
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
    Blake2b,
}

const ALGOS: [HashAlgo; 5] = [
    HashAlgo::Sha256,
    HashAlgo::Sha512,
    HashAlgo::Sha3_256,
    HashAlgo::Sha3_512,
    HashAlgo::Blake2b,
];

/// Runs 2-4 salted digest rounds, one HMAC round, and a fixed xorshift
/// finisher over a 64-bit value.
///
/// The salt and the key set are drawn once at construction and never
/// regenerated, so individual rounds are pure functions of the input once
/// the per-call algorithm and key choices are fixed.
pub struct HashMixer {
    salt: [u8; SALT_LEN],
    keys: [[u8; KEY_LEN]; KEY_COUNT],
}

impl HashMixer {
    pub fn new(rng: &mut StdRng) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut keys = [[0u8; KEY_LEN]; KEY_COUNT];
        for key in &mut keys {
            rng.fill_bytes(key);
        }
        Self { salt, keys }
    }

    pub fn transform(&self, rng: &mut StdRng, value: u64) -> u64 {
        let mut mixed = value;
        for _ in 0..rng.random_range(2..=4) {
            let algo = ALGOS[rng.random_range(0..ALGOS.len())];
            mixed = self.hash_round(algo, mixed);
        }
        mixed = self.keyed_round(rng.random_range(0..KEY_COUNT), mixed);
        finish(mixed)
    }

    /// One digest of `"{value}" || salt`, folded to the first 8 bytes.
    fn hash_round(&self, algo: HashAlgo, value: u64) -> u64 {
        let mut data = Vec::with_capacity(20 + SALT_LEN);
        let mut buf = itoa::Buffer::new();
        data.extend_from_slice(buf.format(value).as_bytes());
        data.extend_from_slice(&self.salt);

        match algo {
            HashAlgo::Sha256 => lead_u64(&Sha256::digest(&data)),
            HashAlgo::Sha512 => lead_u64(&Sha512::digest(&data)),
            HashAlgo::Sha3_256 => lead_u64(&Sha3_256::digest(&data)),
            HashAlgo::Sha3_512 => lead_u64(&Sha3_512::digest(&data)),
            HashAlgo::Blake2b => lead_u64(&Blake2b512::digest(&data)),
        }
    }

    /// HMAC-SHA-512 over the decimal encoding, under one of the fixed keys.
    fn keyed_round(&self, key_idx: usize, value: u64) -> u64 {
        let mut mac = HmacSha512::new_from_slice(&self.keys[key_idx])
            .expect("HMAC accepts keys of any length");
        let mut buf = itoa::Buffer::new();
        mac.update(buf.format(value).as_bytes());
        lead_u64(&mac.finalize().into_bytes())
    }
}

/// Big-endian u64 from the first 8 bytes of a digest.
fn lead_u64(digest: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(word)
}

/// xorshift-style avalanche: `x ^= x << 13; x ^= x >> 7; x ^= x << 17`.
fn finish(mut value: u64) -> u64 {
    value = (value << 13) ^ value;
    value = (value >> 7) ^ value;
    (value << 17) ^ value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rounds_are_pure_once_algorithm_and_key_are_fixed() {
        let mut rng = StdRng::seed_from_u64(42);
        let mixer = HashMixer::new(&mut rng);

        for algo in ALGOS {
            assert_eq!(mixer.hash_round(algo, 777), mixer.hash_round(algo, 777));
        }
        for key_idx in 0..KEY_COUNT {
            assert_eq!(mixer.keyed_round(key_idx, 777), mixer.keyed_round(key_idx, 777));
        }
    }

    #[test]
    fn distinct_algorithms_disagree_on_the_same_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let mixer = HashMixer::new(&mut rng);

        let words: Vec<u64> = ALGOS.iter().map(|&a| mixer.hash_round(a, 1)).collect();
        for i in 0..words.len() {
            for j in (i + 1)..words.len() {
                assert_ne!(words[i], words[j]);
            }
        }
    }

    #[test]
    fn identically_seeded_mixers_transform_identically() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let mixer_a = HashMixer::new(&mut rng_a);
        let mixer_b = HashMixer::new(&mut rng_b);

        for value in [0u64, 1, 20, u64::MAX] {
            assert_eq!(
                mixer_a.transform(&mut rng_a, value),
                mixer_b.transform(&mut rng_b, value)
            );
        }
    }

    #[test]
    fn finisher_matches_the_manual_computation() {
        let mut x = 0x0123_4567_89AB_CDEFu64;
        let expected = {
            x = (x << 13) ^ x;
            x = (x >> 7) ^ x;
            (x << 17) ^ x
        };
        assert_eq!(finish(0x0123_4567_89AB_CDEF), expected);
        assert_eq!(finish(0), 0);
    }
}
