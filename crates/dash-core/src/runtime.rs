//! Owned runtime context handed to the game loop.
//!
//! One `GameContext` is built at startup and passed to the per-frame and
//! per-event entry points. It owns every stateful helper, so there is no
//! process-wide mutable state.

use crate::audio::{AudioBackend, LoopHandle, SoundManager};
use crate::constants::*;
use crate::effects::VisualEffects;
use crate::frame_stats::FrameStats;
use crate::leaderboard::Leaderboard;
use crate::particles::{ParticleKind, ParticlePool};
use crate::settings::{KeyValueStore, Settings, SettingsStore};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub max_particles: usize,
    pub master_volume: f32,
    /// Fixed seed for reproducible particles and noise beds; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_particles: DEFAULT_MAX_PARTICLES,
            master_volume: DEFAULT_MASTER_VOLUME,
            seed: None,
        }
    }
}

/// Gameplay moments the loop reports; each maps to a cue plus visuals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Jump { position: Vec3 },
    Collect { position: Vec3 },
    Collision { position: Vec3 },
    Combo { level: u32, position: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub new_high_score: bool,
    pub rank: Option<usize>,
}

pub struct GameContext<A: AudioBackend, S: KeyValueStore> {
    pub sound: SoundManager<A>,
    pub particles: ParticlePool,
    pub effects: VisualEffects,
    pub frame_stats: FrameStats,
    pub settings: SettingsStore<S>,
    pub leaderboard: Leaderboard,
    ambient: Option<LoopHandle>,
}

impl<A: AudioBackend, S: KeyValueStore> GameContext<A, S> {
    pub fn new(audio: Option<A>, store: S, config: RuntimeConfig) -> Self {
        let (sound_rng, particles) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                ParticlePool::with_seed(config.max_particles, seed.wrapping_add(1)),
            ),
            None => (
                StdRng::from_entropy(),
                ParticlePool::new(config.max_particles),
            ),
        };
        let settings = SettingsStore::new(store);
        let saved = settings.load();
        let mut sound = SoundManager::with_rng(audio, config.master_volume, sound_rng);
        if !saved.sound_enabled {
            log::info!("[runtime] sound disabled by saved settings");
            sound.set_enabled(false);
        }
        Self {
            sound,
            particles,
            effects: VisualEffects::default(),
            frame_stats: FrameStats::new(),
            settings,
            leaderboard: Leaderboard::seeded(),
            ambient: None,
        }
    }

    /// Advance everything that ticks per rendered frame. `dt` is real time.
    pub fn frame(&mut self, dt: f32) {
        self.tick(dt);
        self.frame_stats.update();
    }

    /// Same as [`frame`](Self::frame), with frame stats sampled at `now_ms`
    /// on a caller-owned clock instead of the wall clock.
    pub fn frame_at(&mut self, dt: f32, now_ms: f64) {
        self.tick(dt);
        self.frame_stats.update_at(now_ms);
    }

    fn tick(&mut self, dt: f32) {
        self.particles.update(dt);
        self.effects.update(dt);
    }

    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jump { position } => {
                self.sound.play_jump();
                self.particles
                    .emit(position, JUMP_DUST_COUNT, ParticleKind::Dust);
            }
            GameEvent::Collect { position } => {
                self.sound.play_collect();
                self.particles
                    .emit(position, COLLECT_SPARKLE_COUNT, ParticleKind::Sparkle);
            }
            GameEvent::Collision { position } => {
                self.sound.play_collision();
                self.particles
                    .emit(position, COLLISION_LEAF_COUNT, ParticleKind::Leaf);
                self.effects
                    .add_screen_shake(COLLISION_SHAKE_INTENSITY, COLLISION_SHAKE_SEC);
                self.effects
                    .add_slow_motion(COLLISION_SLOWMO_FACTOR, COLLISION_SLOWMO_MS);
            }
            GameEvent::Combo { level, position } => {
                self.sound.play_combo(level);
                self.effects.add_bloom(COMBO_BLOOM_INTENSITY, COMBO_BLOOM_MS);
                let count = COMBO_SPARKLES_PER_LEVEL.saturating_mul(level as usize);
                self.particles.emit(position, count, ParticleKind::Sparkle);
            }
        }
    }

    pub fn start_ambient(&mut self) {
        if self.ambient.is_none() {
            self.ambient = self.sound.play_ambient();
        }
    }

    pub fn stop_ambient(&mut self) {
        if let Some(handle) = self.ambient.take() {
            self.sound.stop_ambient(handle);
        }
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient.is_some()
    }

    /// Persist and mirror the player's sound toggle.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.set_sound_enabled(enabled);
        self.sound.set_enabled(enabled);
        if !enabled {
            self.stop_ambient();
        }
    }

    pub fn current_settings(&self) -> Settings {
        self.settings.load()
    }

    /// Record a finished run: lifetime totals, high score and leaderboard.
    pub fn finish_run(
        &mut self,
        name: Option<&str>,
        score: u64,
        distance: f64,
        timestamp: &str,
    ) -> RunSummary {
        self.settings.record_run(distance);
        let new_high_score = self.settings.update_high_score(score);
        let rank = self.leaderboard.submit(name, score, timestamp);
        log::info!(
            "[runtime] run finished score={} distance={:.1} high_score={} rank={:?}",
            score,
            distance,
            new_high_score,
            rank
        );
        RunSummary {
            new_high_score,
            rank,
        }
    }
}
