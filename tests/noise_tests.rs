// Host-side tests for hashed value noise.

use dash_core::constants::{PERLIN_OCTAVES, PERLIN_PERSISTENCE};
use dash_core::*;

fn grid() -> impl Iterator<Item = (f64, f64, f64)> {
    (0..12).flat_map(|i| {
        (0..12).map(move |j| (i as f64 * 0.73 - 4.0, j as f64 * 1.31 - 7.0, (i * j) as f64 * 0.11))
    })
}

#[test]
fn noise_is_deterministic_and_bounded() {
    for (x, y, z) in grid() {
        let a = noise(x, y, z);
        let b = noise(x, y, z);
        assert_eq!(a, b);
        assert!((-1.0..=1.0).contains(&a), "noise({x},{y},{z}) = {a}");
    }
}

#[test]
fn noise_varies_between_points() {
    let values: Vec<f64> = (0..16).map(|i| noise(i as f64, 0.0, 0.0)).collect();
    let distinct = values
        .iter()
        .filter(|v| (**v - values[0]).abs() > 1e-9)
        .count();
    assert!(distinct > 10);
}

#[test]
fn smooth_noise_stays_bounded() {
    for (x, y, z) in grid() {
        let v = smooth_noise(x, y, z);
        assert!((-1.0..=1.0).contains(&v));
    }
}

#[test]
fn single_octave_perlin_equals_smooth_noise() {
    for (x, y, z) in grid() {
        assert_eq!(perlin_noise(x, y, z, 1, 0.5), smooth_noise(x, y, z));
        assert_eq!(perlin_noise(x, y, z, 1, 0.9), smooth_noise(x, y, z));
    }
}

#[test]
fn perlin_defaults_are_four_octaves_half_persistence() {
    assert_eq!(PERLIN_OCTAVES, 4);
    assert_eq!(PERLIN_PERSISTENCE, 0.5);
    for (x, y, z) in grid() {
        assert_eq!(perlin_noise_default(x, y, z), perlin_noise(x, y, z, 4, 0.5));
        assert!((-1.0..=1.0).contains(&perlin_noise_default(x, y, z)));
    }
}

#[test]
fn zero_octaves_yields_zero() {
    assert_eq!(perlin_noise(1.0, 2.0, 3.0, 0, 0.5), 0.0);
}
