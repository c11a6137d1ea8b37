// ---------------- Native audio (cpal) ----------------
//
// Software rendition of the browser graph: every tone is an oscillator
// through a one-pole low-pass and an exponential gain envelope, mixed with
// any looping noise beds and soft-clipped.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use dash_core::{AudioBackend, AudioError, LoopHandle, ScheduledTone, Waveform};
use std::f32::consts::{PI, TAU};
use std::sync::{Arc, Mutex, MutexGuard};

struct Voice {
    tone: ScheduledTone,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    lp_alpha: f32,
    lp_state: f32,
}

struct NoiseLoop {
    handle: LoopHandle,
    samples: Vec<f32>,
    pos: usize,
}

pub(crate) struct MixerState {
    sample_rate: f32,
    samples_rendered: u64,
    voices: Vec<Voice>,
    loops: Vec<NoiseLoop>,
}

fn render_wave_sample(phase: f32, wave: Waveform) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Saw => phase / PI - 1.0,
        Waveform::Triangle => {
            let saw = phase / PI - 1.0;
            2.0 * saw.abs() - 1.0
        }
    }
}

impl MixerState {
    pub(crate) fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            samples_rendered: 0,
            voices: Vec::new(),
            loops: Vec::new(),
        }
    }

    pub(crate) fn now_sec(&self) -> f64 {
        self.samples_rendered as f64 / self.sample_rate as f64
    }

    pub(crate) fn push_tone(&mut self, tone: &ScheduledTone) {
        let cutoff = tone.cutoff_hz.min(self.sample_rate * 0.45);
        self.voices.push(Voice {
            tone: *tone,
            phase: 0.0,
            phase_inc: TAU * tone.frequency_hz / self.sample_rate,
            lp_alpha: 1.0 - (-TAU * cutoff / self.sample_rate).exp(),
            lp_state: 0.0,
        });
    }

    pub(crate) fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub(crate) fn next_sample(&mut self) -> f32 {
        let t = self.now_sec();
        let mut out = 0.0f32;
        self.voices.retain_mut(|v| {
            if t < v.tone.start_sec {
                return true;
            }
            if t >= v.tone.stop_sec() {
                return false;
            }
            let raw = render_wave_sample(v.phase, v.tone.waveform);
            v.lp_state += v.lp_alpha * (raw - v.lp_state);
            out += v.lp_state * v.tone.gain_at(t);
            v.phase += v.phase_inc;
            if v.phase >= TAU {
                v.phase -= TAU;
            }
            true
        });
        for l in &mut self.loops {
            out += l.samples[l.pos];
            l.pos = (l.pos + 1) % l.samples.len();
        }
        self.samples_rendered += 1;
        out.tanh()
    }
}

pub struct CpalAudio {
    state: Arc<Mutex<MixerState>>,
    sample_rate: f32,
    next_loop: u32,
    _stream: cpal::Stream,
}

impl CpalAudio {
    /// Open the default output device. `None` when there is no usable device.
    pub fn new() -> Option<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = device.default_output_config().ok()?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let state = Arc::new(Mutex::new(MixerState::new(sample_rate)));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config.into(), channels, Arc::clone(&state))
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config.into(), channels, Arc::clone(&state))
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config.into(), channels, Arc::clone(&state))
            }
            other => {
                log::warn!("[audio] unsupported sample format {:?}", other);
                return None;
            }
        };
        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[audio] could not open output stream: {}", e);
                return None;
            }
        };
        stream.play().ok()?;
        log::info!("[audio] output at {} Hz, {} channel(s)", sample_rate, channels);
        Some(Self {
            state,
            sample_rate,
            next_loop: 0,
            _stream: stream,
        })
    }

    /// Voices scheduled or sounding right now.
    pub fn active_voices(&self) -> usize {
        self.lock().map(|s| s.active_voices()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MixerState>, AudioError> {
        self.state
            .lock()
            .map_err(|_| AudioError::Schedule("mixer lock poisoned".into()))
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<MixerState>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let Ok(mut guard) = state.lock() else {
                data.fill(T::from_sample(0.0f32));
                return;
            };
            for frame in data.chunks_mut(channels) {
                let v = T::from_sample(guard.next_sample());
                frame.fill(v);
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )
}

impl AudioBackend for CpalAudio {
    fn current_time(&self) -> f64 {
        self.lock().map(|s| s.now_sec()).unwrap_or(0.0)
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn play_tone(&mut self, tone: &ScheduledTone) -> Result<(), AudioError> {
        self.lock()?.push_tone(tone);
        Ok(())
    }

    fn start_noise_loop(
        &mut self,
        samples: &[f32],
        _sample_rate: f32,
    ) -> Result<LoopHandle, AudioError> {
        if samples.is_empty() {
            return Err(AudioError::Schedule("empty loop buffer".into()));
        }
        let handle = LoopHandle(self.next_loop);
        self.next_loop = self.next_loop.wrapping_add(1);
        self.lock()?.loops.push(NoiseLoop {
            handle,
            samples: samples.to_vec(),
            pos: 0,
        });
        Ok(handle)
    }

    fn stop_loop(&mut self, handle: LoopHandle) -> Result<(), AudioError> {
        let mut state = self.lock()?;
        let before = state.loops.len();
        state.loops.retain(|l| l.handle != handle);
        if state.loops.len() == before {
            return Err(AudioError::UnknownLoop(handle.0));
        }
        Ok(())
    }
}
