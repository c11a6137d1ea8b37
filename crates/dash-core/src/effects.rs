//! Screen-space effect timers: camera shake, slow motion and bloom.
//!
//! All three decay on the frame clock via [`VisualEffects::update`], so
//! expiry is deterministic and a retrigger simply overwrites the countdown.

use crate::constants::{NEUTRAL_BLOOM, NEUTRAL_TIME_SCALE, SHAKE_REFERENCE_SEC};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Debug, Default)]
pub struct ScreenShake {
    intensity: f32,
    magnitude: Vec3,
    duration: f32,
}

impl ScreenShake {
    /// Overwrites any shake in progress.
    pub fn add(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.magnitude = Vec3::splat(intensity);
        self.duration = duration;
    }

    /// Count down and rescale magnitudes linearly against the 0.5 s reference.
    pub fn update(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.duration = 0.0;
            self.magnitude = Vec3::ZERO;
            return;
        }
        self.duration -= dt;
        if self.duration > 0.0 {
            self.magnitude = Vec3::splat(self.intensity * self.duration / SHAKE_REFERENCE_SEC);
        } else {
            self.duration = 0.0;
            self.magnitude = Vec3::ZERO;
        }
    }

    pub fn magnitude(&self) -> Vec3 {
        self.magnitude
    }

    pub fn remaining(&self) -> f32 {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0.0
    }

    /// Camera offset sampled uniformly inside the current magnitudes.
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        if !self.is_active() {
            return Vec3::ZERO;
        }
        let m = self.magnitude;
        Vec3::new(
            (rng.gen::<f32>() * 2.0 - 1.0) * m.x,
            (rng.gen::<f32>() * 2.0 - 1.0) * m.y,
            (rng.gen::<f32>() * 2.0 - 1.0) * m.z,
        )
    }
}

/// A value that holds for a fixed time and then snaps back to neutral.
#[derive(Clone, Debug)]
pub struct TimedEffect {
    active: bool,
    value: f32,
    neutral: f32,
    remaining_sec: f32,
}

impl TimedEffect {
    pub fn new(neutral: f32) -> Self {
        Self {
            active: false,
            value: neutral,
            neutral,
            remaining_sec: 0.0,
        }
    }

    pub fn trigger(&mut self, value: f32, duration_ms: u32) {
        self.active = true;
        self.value = value;
        self.remaining_sec = duration_ms as f32 / 1000.0;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.remaining_sec -= dt;
        if self.remaining_sec <= 0.0 {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.value = self.neutral;
        self.remaining_sec = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn remaining_sec(&self) -> f32 {
        self.remaining_sec
    }
}

#[derive(Clone, Debug)]
pub struct VisualEffects {
    pub shake: ScreenShake,
    pub slow_motion: TimedEffect,
    pub bloom: TimedEffect,
}

impl Default for VisualEffects {
    fn default() -> Self {
        Self {
            shake: ScreenShake::default(),
            slow_motion: TimedEffect::new(NEUTRAL_TIME_SCALE),
            bloom: TimedEffect::new(NEUTRAL_BLOOM),
        }
    }
}

impl VisualEffects {
    pub fn add_screen_shake(&mut self, intensity: f32, duration_sec: f32) {
        self.shake.add(intensity, duration_sec);
    }

    pub fn update_screen_shake(&mut self, dt: f32) {
        self.shake.update(dt);
    }

    pub fn add_slow_motion(&mut self, factor: f32, duration_ms: u32) {
        self.slow_motion.trigger(factor, duration_ms);
    }

    pub fn add_bloom(&mut self, intensity: f32, duration_ms: u32) {
        self.bloom.trigger(intensity, duration_ms);
    }

    /// Advance all effects by the real (unscaled) frame delta.
    pub fn update(&mut self, dt: f32) {
        self.shake.update(dt);
        self.slow_motion.update(dt);
        self.bloom.update(dt);
    }

    pub fn time_scale(&self) -> f32 {
        self.slow_motion.value()
    }

    pub fn bloom_intensity(&self) -> f32 {
        self.bloom.value()
    }
}
