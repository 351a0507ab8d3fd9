//! Arithmetic and trigonometric mixing stages.

use std::f64::consts::{E, FRAC_PI_2, PI, SQRT_2, TAU};

use rand::{rngs::StdRng, Rng};

const PRIMES: [u64; 12] = [17, 31, 61, 89, 107, 127, 521, 607, 1279, 2203, 3571, 4909];

/// Five-stage numeric pipeline: prime residues, a trigonometric map, an
/// exponential map, a logarithmic map, and a mathematical-constant mix.
/// Non-finite intermediates fall back to reduced inputs instead of failing.
pub struct MathMixer {
    constants: [f64; 6],
}

impl MathMixer {
    pub fn new() -> Self {
        let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
        Self {
            constants: [PI, E, SQRT_2, golden_ratio, TAU, 3.0_f64.sqrt()],
        }
    }

    pub fn transform(&self, rng: &mut StdRng, value: u64) -> u64 {
        let mixed = prime_stage(rng, value) as f64;
        let mixed = trig_stage(rng, mixed);
        let mixed = exp_stage(rng, mixed);
        let mixed = log_stage(rng, mixed);
        let mixed = self.constant_stage(rng, mixed);
        // Saturating cast keeps the contract of a non-negative integer even
        // if a combiner lands on infinity.
        mixed.abs() as u64
    }

    fn constant_stage(&self, rng: &mut StdRng, value: f64) -> f64 {
        let constant = self.constants[rng.random_range(0..self.constants.len())];
        let combiner = rng.random_range(0..5);
        let combined = combine(combiner, value, constant);
        if combined.is_finite() {
            combined
        } else {
            combine(combiner, value % 1000.0, constant)
        }
    }
}

/// `(v mod p1) * (v mod p2)` over 2-4 rounds of random prime pairs.
fn prime_stage(rng: &mut StdRng, mut value: u64) -> u64 {
    for _ in 0..rng.random_range(2..=4) {
        let p1 = PRIMES[rng.random_range(0..PRIMES.len())];
        let p2 = PRIMES[rng.random_range(0..PRIMES.len())];
        value = (value % p1) * (value % p2);
    }
    value
}

fn trig_stage(rng: &mut StdRng, value: f64) -> f64 {
    match rng.random_range(0..5) {
        0 => value.sin() * 1000.0,
        1 => value.cos() * 1000.0,
        2 => (value % FRAC_PI_2).tan() * 500.0,
        3 => (value % 2.0).sinh() * 300.0,
        _ => (value % 2.0).cosh() * 300.0,
    }
}

fn exp_stage(rng: &mut StdRng, value: f64) -> f64 {
    let base = rng.random_range(1.1..2.0);
    let power = rng.random_range(0.1..3.0);
    let raised = (value * base).abs().powf(power);
    if raised.is_finite() {
        raised
    } else {
        ((value % 100.0) * base).abs().powf(power)
    }
}

fn log_stage(rng: &mut StdRng, value: f64) -> f64 {
    let value = if value <= 0.0 { 1.0 } else { value };
    let base = rng.random_range(2.0..10.0);
    let scaled = value.log(base) * 1000.0;
    if scaled.is_finite() {
        scaled
    } else {
        (value.abs() + 1.0).log(base) * 1000.0
    }
}

fn combine(combiner: usize, value: f64, constant: f64) -> f64 {
    match combiner {
        0 => value * constant,
        1 => value + constant,
        2 => value * constant + constant,
        3 => (value + constant) * constant,
        _ => (value * constant) % (constant * 1000.0),
    }
}
