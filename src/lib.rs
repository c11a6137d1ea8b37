#![cfg(target_arch = "wasm32")]
use dash_core::{GameContext, GameEvent, ParticleKind, RuntimeConfig};
use glam::Vec3;
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod dom;
mod frame;
mod storage;
mod utils;

use audio::WebAudio;
use frame::{FrameContext, JsScene};
use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("dash-web starting");
    Ok(())
}

/// Runtime handle owned by the page's game loop. Build it once after the
/// first user gesture (browsers keep audio suspended until then).
#[wasm_bindgen]
pub struct DashRuntime {
    ctx: FrameContext,
}

#[wasm_bindgen]
impl DashRuntime {
    #[wasm_bindgen(constructor)]
    pub fn new(max_particles: Option<u32>) -> DashRuntime {
        let mut config = RuntimeConfig::default();
        if let Some(max) = max_particles {
            config.max_particles = max as usize;
        }
        let mut game = GameContext::new(WebAudio::new(), LocalStorage::new(), config);
        game.frame_stats = std::mem::take(&mut game.frame_stats)
            .with_memory_probe(Box::new(dom::performance_memory));
        log::info!(
            "[runtime] audio={} max_particles={}",
            game.sound.is_available(),
            game.particles.max_particles()
        );
        DashRuntime {
            ctx: FrameContext::new(game),
        }
    }

    /// Advance one frame; returns the time-scaled step in seconds.
    pub fn frame(&mut self) -> f32 {
        self.ctx.frame()
    }

    /// Hand live particles to `draw(floats, count)`; 12 floats per particle.
    pub fn render(&mut self, draw: &js_sys::Function) {
        let mut scene = JsScene { draw };
        self.ctx.game.particles.render(&mut scene);
    }

    pub fn resume_audio(&self) {
        if let Some(backend) = self.ctx.game.sound.backend() {
            backend.resume();
        }
    }

    pub fn jump(&mut self, x: f32, y: f32, z: f32) {
        self.ctx.game.handle(GameEvent::Jump {
            position: Vec3::new(x, y, z),
        });
    }

    pub fn collect(&mut self, x: f32, y: f32, z: f32) {
        self.ctx.game.handle(GameEvent::Collect {
            position: Vec3::new(x, y, z),
        });
    }

    pub fn collision(&mut self, x: f32, y: f32, z: f32) {
        self.ctx.game.handle(GameEvent::Collision {
            position: Vec3::new(x, y, z),
        });
    }

    pub fn combo(&mut self, level: u32, x: f32, y: f32, z: f32) {
        self.ctx.game.handle(GameEvent::Combo {
            level,
            position: Vec3::new(x, y, z),
        });
    }

    pub fn emit(&mut self, x: f32, y: f32, z: f32, count: u32, kind: &str) {
        self.ctx.game.particles.emit(
            Vec3::new(x, y, z),
            count as usize,
            ParticleKind::from_name(kind),
        );
    }

    #[wasm_bindgen(js_name = playSound)]
    pub fn play_sound(&mut self, frequency: f32, duration: f32, waveform: &str, volume: f32) {
        let waveform = match waveform {
            "square" => dash_core::Waveform::Square,
            "sawtooth" => dash_core::Waveform::Saw,
            "triangle" => dash_core::Waveform::Triangle,
            _ => dash_core::Waveform::Sine,
        };
        self.ctx
            .game
            .sound
            .play_sound(frequency, duration, waveform, volume);
    }

    pub fn particle_count(&self) -> u32 {
        self.ctx.game.particles.len() as u32
    }

    pub fn add_screen_shake(&mut self, intensity: f32, duration: f32) {
        self.ctx.game.effects.add_screen_shake(intensity, duration);
    }

    pub fn add_slow_motion(&mut self, factor: f32, duration_ms: u32) {
        self.ctx.game.effects.add_slow_motion(factor, duration_ms);
    }

    pub fn add_bloom(&mut self, intensity: f32, duration_ms: u32) {
        self.ctx.game.effects.add_bloom(intensity, duration_ms);
    }

    /// Camera offset for this frame as `[x, y, z]`.
    pub fn shake_offset(&self) -> Vec<f32> {
        self.ctx.shake_offset.to_array().to_vec()
    }

    pub fn time_scale(&self) -> f32 {
        self.ctx.game.effects.time_scale()
    }

    pub fn bloom_intensity(&self) -> f32 {
        self.ctx.game.effects.bloom_intensity()
    }

    pub fn fps(&self) -> u32 {
        self.ctx.game.frame_stats.fps()
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.ctx.game.frame_stats.frame_time_ms()
    }

    pub fn memory_used_bytes(&self) -> Option<f64> {
        self.ctx
            .game
            .frame_stats
            .memory()
            .map(|m| m.used_bytes as f64)
    }

    pub fn quality_level(&self) -> String {
        self.ctx.game.frame_stats.quality_level().as_str().to_owned()
    }

    pub fn start_ambient(&mut self) {
        self.ctx.game.start_ambient();
    }

    pub fn stop_ambient(&mut self) {
        self.ctx.game.stop_ambient();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.ctx.game.set_sound_enabled(enabled);
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.ctx.game.current_settings()).unwrap_or_default()
    }

    pub fn update_high_score(&mut self, score: f64) -> bool {
        self.ctx.game.settings.update_high_score(score.max(0.0) as u64)
    }

    /// Returns `{"newHighScore": bool, "rank": number|null}`.
    pub fn finish_run(&mut self, name: Option<String>, score: f64, distance: f64) -> String {
        let summary = self.ctx.game.finish_run(
            name.as_deref(),
            score.max(0.0) as u64,
            distance,
            &dom::today(),
        );
        serde_json::json!({
            "newHighScore": summary.new_high_score,
            "rank": summary.rank,
        })
        .to_string()
    }

    pub fn leaderboard_json(&self) -> String {
        let top = self
            .ctx
            .game
            .leaderboard
            .top(dash_core::constants::LEADERBOARD_TOP);
        serde_json::to_string(top).unwrap_or_default()
    }

    pub fn leaderboard_stats_json(&self) -> String {
        serde_json::to_string(&self.ctx.game.leaderboard.stats()).unwrap_or_default()
    }
}
