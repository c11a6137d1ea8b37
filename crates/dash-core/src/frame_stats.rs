//! Frame timing utilities

use crate::constants::{FPS_SAMPLE_WINDOW_MS, QUALITY_LOW_BELOW_FPS, QUALITY_MEDIUM_BELOW_FPS};
use instant::Instant;

/// Heap usage reported by the host, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub limit_bytes: u64,
}

pub type MemoryProbe = Box<dyn Fn() -> Option<MemoryUsage>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl QualityLevel {
    pub fn from_fps(fps: u32) -> Self {
        if fps < QUALITY_LOW_BELOW_FPS {
            Self::Low
        } else if fps < QUALITY_MEDIUM_BELOW_FPS {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

pub struct FrameStats {
    origin: Instant,
    frame_count: u32,
    last_sample_ms: f64,
    last_frame_ms: Option<f64>,
    fps: u32,
    frame_time_ms: f64,
    memory: Option<MemoryUsage>,
    probe: Option<MemoryProbe>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            frame_count: 0,
            last_sample_ms: 0.0,
            last_frame_ms: None,
            fps: 0,
            frame_time_ms: 0.0,
            memory: None,
            probe: None,
        }
    }

    pub fn with_memory_probe(mut self, probe: MemoryProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Record one rendered frame at the current wall-clock time.
    pub fn update(&mut self) {
        let now_ms = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.update_at(now_ms);
    }

    /// Record one rendered frame at `now_ms` milliseconds since creation.
    pub fn update_at(&mut self, now_ms: f64) {
        self.frame_count += 1;
        if let Some(prev) = self.last_frame_ms {
            self.frame_time_ms = (now_ms - prev).max(0.0);
        }
        self.last_frame_ms = Some(now_ms);

        if now_ms - self.last_sample_ms >= FPS_SAMPLE_WINDOW_MS {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.last_sample_ms = now_ms;
            if let Some(probe) = &self.probe {
                self.memory = probe();
            }
            log::debug!(
                "[frame] fps={} frame_time={:.2}ms quality={}",
                self.fps,
                self.frame_time_ms,
                self.quality_level().as_str()
            );
        }
    }

    /// Frames counted during the last completed one-second window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time_ms
    }

    pub fn memory(&self) -> Option<MemoryUsage> {
        self.memory
    }

    pub fn quality_level(&self) -> QualityLevel {
        QualityLevel::from_fps(self.fps)
    }
}
