//! Randomized bit-level mixing.

use rand::{rngs::StdRng, Rng};

/// Number of entries in the operation table below.
const OP_COUNT: usize = 7;

/// Applies 2-5 randomly drawn bit operations to a 64-bit value.
///
/// All arithmetic is 64-bit wrapping; left shifts drop high bits, which is
/// the truncation boundary of the whole pipeline.
pub struct BitwiseMixer;

impl BitwiseMixer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, rng: &mut StdRng, mut value: u64) -> u64 {
        let rounds = rng.random_range(2..=5);
        for _ in 0..rounds {
            value = match rng.random_range(0..OP_COUNT) {
                0 => value ^ rng.random::<u64>(),
                1 => {
                    let shift = rng.random_range(1..=8);
                    if rng.random_bool(0.5) {
                        value << shift
                    } else {
                        value >> shift
                    }
                }
                2 => value & rng.random::<u64>(),
                3 => value | u64::from(rng.random::<u32>()),
                4 => rotate(value, rng.random_range(1..=63)),
                5 => swap_bits(
                    value,
                    rng.random_range(0..32),
                    rng.random_range(0..32),
                ),
                _ => reverse_low_32(value),
            };
        }
        value
    }
}

fn rotate(value: u64, amount: u32) -> u64 {
    value.rotate_left(amount)
}

/// Exchanges the bits at two positions via a masked XOR.
fn swap_bits(value: u64, pos1: u32, pos2: u32) -> u64 {
    let bit1 = (value >> pos1) & 1;
    let bit2 = (value >> pos2) & 1;
    let diff = bit1 ^ bit2;
    value ^ ((diff << pos1) | (diff << pos2))
}

/// Reverses the bit order of the low 32 bits, discarding the high half.
fn reverse_low_32(value: u64) -> u64 {
    u64::from((value as u32).reverse_bits())
}
