//! Procedural sound cues for discrete game events.
//!
//! Cues are short layered tone sequences. Each layer is resolved against
//! the backend's audio clock, so delayed layers are scheduled ahead of time
//! rather than fired from host timers.

use crate::constants::*;
use crate::error::AudioError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// One layer of a cue, relative to the moment the cue fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CueTone {
    pub frequency_hz: f32,
    pub duration_sec: f32,
    pub waveform: Waveform,
    pub volume: f32,
    pub offset_ms: u32,
}

impl CueTone {
    const fn sine(frequency_hz: f32, duration_sec: f32, volume: f32, offset_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_sec,
            waveform: Waveform::Sine,
            volume,
            offset_ms,
        }
    }
}

pub type CueTones = SmallVec<[CueTone; 3]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Collect,
    Collision,
    Combo(u32),
}

impl Cue {
    pub fn tones(self) -> CueTones {
        match self {
            Cue::Jump => smallvec![
                CueTone::sine(600.0, 0.15, 0.2, 0),
                CueTone::sine(400.0, 0.1, 0.15, 50),
            ],
            Cue::Collect => smallvec![
                CueTone::sine(800.0, 0.1, 0.15, 0),
                CueTone::sine(1200.0, 0.1, 0.1, 30),
                CueTone::sine(1600.0, 0.1, 0.05, 60),
            ],
            Cue::Collision => smallvec![
                CueTone {
                    waveform: Waveform::Saw,
                    ..CueTone::sine(150.0, 0.8, 0.3, 0)
                },
                CueTone {
                    waveform: Waveform::Square,
                    ..CueTone::sine(100.0, 0.5, 0.2, 100)
                },
            ],
            Cue::Combo(level) => {
                let base = 400.0 + level as f32 * 100.0;
                smallvec![
                    CueTone::sine(base, 0.2, 0.2, 0),
                    CueTone::sine(base * 1.5, 0.15, 0.15, 50),
                ]
            }
        }
    }
}

/// A voice resolved against the audio clock: oscillator -> low-pass -> gain -> output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTone {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub start_sec: f64,
    pub duration_sec: f32,
    pub peak_gain: f32,
    pub floor_gain: f32,
    pub cutoff_hz: f32,
}

impl ScheduledTone {
    #[inline]
    pub fn stop_sec(&self) -> f64 {
        self.start_sec + self.duration_sec as f64
    }

    /// Envelope value at audio time `t`, following an exponential ramp from
    /// `peak_gain` at start to `floor_gain` at stop. Zero outside the voice.
    pub fn gain_at(&self, t: f64) -> f32 {
        if t < self.start_sec || t >= self.stop_sec() || self.peak_gain <= 0.0 {
            return 0.0;
        }
        if self.duration_sec <= 0.0 {
            return self.floor_gain;
        }
        let progress = ((t - self.start_sec) / self.duration_sec as f64) as f32;
        self.peak_gain * (self.floor_gain / self.peak_gain).powf(progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopHandle(pub u32);

/// Host audio capability. Implementations build and schedule real nodes.
pub trait AudioBackend {
    /// Current audio-clock time in seconds.
    fn current_time(&self) -> f64;
    fn sample_rate(&self) -> f32;
    fn play_tone(&mut self, tone: &ScheduledTone) -> Result<(), AudioError>;
    /// Start a looping buffer-backed source routed straight to the output.
    fn start_noise_loop(
        &mut self,
        samples: &[f32],
        sample_rate: f32,
    ) -> Result<LoopHandle, AudioError>;
    fn stop_loop(&mut self, handle: LoopHandle) -> Result<(), AudioError>;
}

/// Uniform white noise in `[-amplitude, amplitude)`.
pub fn white_noise<R: Rng + ?Sized>(rng: &mut R, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|_| (rng.gen::<f32>() * 2.0 - 1.0) * amplitude)
        .collect()
}

pub struct SoundManager<B: AudioBackend> {
    backend: Option<B>,
    master_volume: f32,
    enabled: bool,
    voices_started: u64,
    rng: StdRng,
}

impl<B: AudioBackend> SoundManager<B> {
    /// `backend == None` means the host has no audio; every call becomes a no-op.
    pub fn new(backend: Option<B>, master_volume: f32) -> Self {
        Self::with_rng(backend, master_volume, StdRng::from_entropy())
    }

    pub fn with_rng(backend: Option<B>, master_volume: f32, rng: StdRng) -> Self {
        if backend.is_none() {
            log::info!("[audio] no audio capability; sound cues disabled");
        }
        Self {
            backend,
            master_volume,
            enabled: true,
            voices_started: 0,
            rng,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Total voices handed to the backend so far. No voice limit is applied.
    pub fn voices_started(&self) -> u64 {
        self.voices_started
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    fn live_backend(&mut self) -> Option<&mut B> {
        if self.enabled {
            self.backend.as_mut()
        } else {
            None
        }
    }

    pub fn play_sound(&mut self, frequency_hz: f32, duration_sec: f32, waveform: Waveform, volume: f32) {
        self.schedule(CueTone {
            frequency_hz,
            duration_sec,
            waveform,
            volume,
            offset_ms: 0,
        });
    }

    fn schedule(&mut self, layer: CueTone) {
        let peak_gain = layer.volume * self.master_volume;
        if peak_gain <= 0.0 {
            return;
        }
        let Some(backend) = self.live_backend() else {
            return;
        };
        let tone = ScheduledTone {
            frequency_hz: layer.frequency_hz,
            waveform: layer.waveform,
            start_sec: backend.current_time() + layer.offset_ms as f64 / 1000.0,
            duration_sec: layer.duration_sec,
            peak_gain,
            floor_gain: ENVELOPE_FLOOR_GAIN,
            cutoff_hz: layer.frequency_hz * FILTER_CUTOFF_RATIO,
        };
        match backend.play_tone(&tone) {
            Ok(()) => self.voices_started += 1,
            Err(e) => log::warn!("[audio] {:.0}Hz tone dropped: {}", tone.frequency_hz, e),
        }
    }

    pub fn play_cue(&mut self, cue: Cue) {
        for layer in cue.tones() {
            self.schedule(layer);
        }
    }

    pub fn play_jump(&mut self) {
        self.play_cue(Cue::Jump);
    }

    pub fn play_collect(&mut self) {
        self.play_cue(Cue::Collect);
    }

    pub fn play_collision(&mut self) {
        self.play_cue(Cue::Collision);
    }

    pub fn play_combo(&mut self, level: u32) {
        self.play_cue(Cue::Combo(level));
    }

    /// Start the looping ambient noise bed. The caller keeps the handle to stop it.
    pub fn play_ambient(&mut self) -> Option<LoopHandle> {
        let sample_rate = self.live_backend()?.sample_rate();
        let len = (sample_rate * AMBIENT_LOOP_SECONDS) as usize;
        let samples = white_noise(&mut self.rng, len, AMBIENT_AMPLITUDE);
        let backend = self.live_backend()?;
        match backend.start_noise_loop(&samples, sample_rate) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("[audio] ambient loop failed: {}", e);
                None
            }
        }
    }

    pub fn stop_ambient(&mut self, handle: LoopHandle) {
        // Stopping is allowed even while muted so a loop never outlives its owner.
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.stop_loop(handle) {
                log::warn!("[audio] stop ambient failed: {}", e);
            }
        }
    }
}
