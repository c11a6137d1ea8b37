use crate::audio::WebAudio;
use crate::constants::{FLOATS_PER_INSTANCE, MAX_FRAME_DT_SEC};
use crate::storage::LocalStorage;
use dash_core::{GameContext, ParticleInstance, ParticleScene};
use glam::Vec3;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;

/// Forwards the packed instance buffer to a JS draw callback `(floats, count)`.
pub struct JsScene<'a> {
    pub draw: &'a js_sys::Function,
}

impl ParticleScene for JsScene<'_> {
    fn draw_particles(&mut self, instances: &[ParticleInstance]) {
        let floats: &[f32] = bytemuck::cast_slice(instances);
        debug_assert_eq!(floats.len(), instances.len() * FLOATS_PER_INSTANCE);
        let array = js_sys::Float32Array::from(floats);
        if let Err(e) = self
            .draw
            .call2(&JsValue::NULL, &array, &JsValue::from(instances.len() as u32))
        {
            log::error!("particle draw callback failed: {:?}", e);
        }
    }
}

pub struct FrameContext {
    pub game: GameContext<WebAudio, LocalStorage>,
    pub last_instant: Instant,
    pub shake_offset: Vec3,
    shake_rng: StdRng,
}

impl FrameContext {
    pub fn new(game: GameContext<WebAudio, LocalStorage>) -> Self {
        Self {
            game,
            last_instant: Instant::now(),
            shake_offset: Vec3::ZERO,
            shake_rng: StdRng::from_entropy(),
        }
    }

    /// Advance one rendered frame. Returns the slow-motion-scaled step the
    /// gameplay simulation should use.
    pub fn frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.game.frame(dt);
        self.shake_offset = self.game.effects.shake.offset(&mut self.shake_rng);
        dt * self.game.effects.time_scale()
    }
}
