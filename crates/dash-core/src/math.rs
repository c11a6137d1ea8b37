//! Small numeric helpers shared by gameplay code: formatting, random
//! ranges, proximity checks, interpolation and easing curves.

use crate::constants::DEFAULT_COLLISION_THRESHOLD;
use glam::Vec3;
use rand::Rng;

/// Anything with a world-space position that can take part in a proximity check.
pub trait Positioned {
    fn position(&self) -> Vec3;
}

impl Positioned for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }
}

/// Group the digits of `n` in threes, e.g. `1234567` -> `"1,234,567"`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uniform value in `[min, max)` from the thread RNG.
#[inline]
pub fn random_between(min: f32, max: f32) -> f32 {
    random_between_with(&mut rand::thread_rng(), min, max)
}

/// Uniform value in `[min, max)` from a caller-supplied RNG.
#[inline]
pub fn random_between_with<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.gen::<f32>() * (max - min) + min
}

/// True when the 3-D distance between the two positions is strictly below `threshold`.
#[inline]
pub fn check_collision(a: &impl Positioned, b: &impl Positioned, threshold: f32) -> bool {
    a.position().distance(b.position()) < threshold
}

/// Horizontal-plane variant: ignores height and compares x/z only.
#[inline]
pub fn check_collision_horizontal(
    a: &impl Positioned,
    b: &impl Positioned,
    threshold: f32,
) -> bool {
    let d = a.position() - b.position();
    (d.x * d.x + d.z * d.z).sqrt() < threshold
}

#[inline]
pub fn check_collision_default(a: &impl Positioned, b: &impl Positioned) -> bool {
    check_collision(a, b, DEFAULT_COLLISION_THRESHOLD)
}

/// Linear interpolation; `t` is not clamped.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

pub fn ease_out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}
