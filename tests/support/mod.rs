// Test doubles for the host capabilities.

#![allow(dead_code)]
use dash_core::{AudioBackend, AudioError, KeyValueStore, LoopHandle, ScheduledTone, StoreError};

/// Audio backend that records what it was asked to play.
#[derive(Default)]
pub struct RecordingAudio {
    pub now: f64,
    pub tones: Vec<ScheduledTone>,
    pub loops: Vec<(LoopHandle, Vec<f32>)>,
    pub stopped: Vec<LoopHandle>,
    pub fail: bool,
    next_loop: u32,
}

impl RecordingAudio {
    pub fn at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl AudioBackend for RecordingAudio {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn sample_rate(&self) -> f32 {
        8000.0
    }

    fn play_tone(&mut self, tone: &ScheduledTone) -> Result<(), AudioError> {
        if self.fail {
            return Err(AudioError::NodeCreation {
                node: "OscillatorNode",
                reason: "test".into(),
            });
        }
        self.tones.push(*tone);
        Ok(())
    }

    fn start_noise_loop(
        &mut self,
        samples: &[f32],
        _sample_rate: f32,
    ) -> Result<LoopHandle, AudioError> {
        if self.fail {
            return Err(AudioError::Schedule("test".into()));
        }
        let handle = LoopHandle(self.next_loop);
        self.next_loop += 1;
        self.loops.push((handle, samples.to_vec()));
        Ok(handle)
    }

    fn stop_loop(&mut self, handle: LoopHandle) -> Result<(), AudioError> {
        self.stopped.push(handle);
        Ok(())
    }
}

/// Store whose every read and write fails, like a blocked `localStorage`.
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Read("denied".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("quota exceeded".into()))
    }
}
