//! Hashed value noise and its layered (fractal) sum.
//!
//! `noise` is a stateless hash of the input coordinates, so the same point
//! always yields the same value on every platform that agrees on `f64::sin`.

use crate::constants::{
    NOISE_COEFF_X, NOISE_COEFF_Y, NOISE_COEFF_Z, NOISE_SCALE, PERLIN_OCTAVES, PERLIN_PERSISTENCE,
};

/// Pseudo-random scalar in `[-1, 1]` for a 3-D point.
#[inline]
pub fn noise(x: f64, y: f64, z: f64) -> f64 {
    let n = (x * NOISE_COEFF_X + y * NOISE_COEFF_Y + z * NOISE_COEFF_Z).sin() * NOISE_SCALE;
    let frac = n - n.floor();
    frac * 2.0 - 1.0
}

/// 3x3 weighted average of `noise` around `(x, y)` on the `z` plane.
///
/// Corners weigh 1/16 each, edges 1/8 each and the center 1/4, so the
/// weights sum to one and the result stays within `[-1, 1]`.
pub fn smooth_noise(x: f64, y: f64, z: f64) -> f64 {
    let corners = (noise(x - 1.0, y - 1.0, z)
        + noise(x + 1.0, y - 1.0, z)
        + noise(x - 1.0, y + 1.0, z)
        + noise(x + 1.0, y + 1.0, z))
        / 16.0;
    let sides = (noise(x - 1.0, y, z)
        + noise(x + 1.0, y, z)
        + noise(x, y - 1.0, z)
        + noise(x, y + 1.0, z))
        / 8.0;
    let center = noise(x, y, z) / 4.0;
    corners + sides + center
}

/// Sum of `smooth_noise` octaves at doubling frequency and decaying
/// amplitude, normalized by the total amplitude used.
pub fn perlin_noise(x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;
    for _ in 0..octaves {
        total += smooth_noise(x * frequency, y * frequency, z * frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }
    if max_value == 0.0 {
        return 0.0;
    }
    total / max_value
}

#[inline]
pub fn perlin_noise_default(x: f64, y: f64, z: f64) -> f64 {
    perlin_noise(x, y, z, PERLIN_OCTAVES, PERLIN_PERSISTENCE)
}
