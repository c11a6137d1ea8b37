// Host-side tests for frame timing and quality hints.

use dash_core::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn quality_thresholds() {
    assert_eq!(QualityLevel::from_fps(0), QualityLevel::Low);
    assert_eq!(QualityLevel::from_fps(29), QualityLevel::Low);
    assert_eq!(QualityLevel::from_fps(30), QualityLevel::Medium);
    assert_eq!(QualityLevel::from_fps(44), QualityLevel::Medium);
    assert_eq!(QualityLevel::from_fps(45), QualityLevel::High);
    assert_eq!(QualityLevel::High.as_str(), "high");
}

#[test]
fn fps_latches_once_per_second() {
    let mut stats = FrameStats::new();
    assert_eq!(stats.fps(), 0);
    assert_eq!(stats.quality_level(), QualityLevel::Low);

    for i in 1..=60 {
        stats.update_at(i as f64 * 1000.0 / 60.0);
        if i < 60 {
            assert_eq!(stats.fps(), 0);
        }
    }
    assert_eq!(stats.fps(), 60);
    assert_eq!(stats.quality_level(), QualityLevel::High);
    assert!((stats.frame_time_ms() - 1000.0 / 60.0).abs() < 1e-6);

    for i in 1..=20 {
        stats.update_at(1000.0 + i as f64 * 50.0);
    }
    assert_eq!(stats.fps(), 20);
    assert_eq!(stats.quality_level(), QualityLevel::Low);
    assert!((stats.frame_time_ms() - 50.0).abs() < 1e-6);
}

#[test]
fn memory_is_sampled_with_fps() {
    let calls = Rc::new(Cell::new(0u32));
    let seen = calls.clone();
    let mut stats = FrameStats::new().with_memory_probe(Box::new(move || {
        seen.set(seen.get() + 1);
        Some(MemoryUsage {
            used_bytes: 10,
            total_bytes: 20,
            limit_bytes: 40,
        })
    }));
    stats.update_at(500.0);
    assert_eq!(stats.memory(), None);
    stats.update_at(1000.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(stats.memory().map(|m| m.used_bytes), Some(10));
}

#[test]
fn missing_memory_api_reports_nothing() {
    let mut stats = FrameStats::new().with_memory_probe(Box::new(|| None));
    stats.update_at(1500.0);
    assert_eq!(stats.fps(), 1);
    assert_eq!(stats.memory(), None);
}
