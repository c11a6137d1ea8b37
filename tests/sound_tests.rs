// Host-side tests for cue scheduling against a recording backend.

mod support;

use dash_core::constants::{AMBIENT_AMPLITUDE, ENVELOPE_FLOOR_GAIN};
use dash_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support::RecordingAudio;

fn manager(now: f64) -> SoundManager<RecordingAudio> {
    SoundManager::with_rng(Some(RecordingAudio::at(now)), 0.3, StdRng::seed_from_u64(1))
}

fn tones(sound: &SoundManager<RecordingAudio>) -> &[ScheduledTone] {
    &sound.backend().expect("backend").tones
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn jump_schedules_two_layers_on_the_audio_clock() {
    let mut sound = manager(2.0);
    sound.play_jump();
    let t = tones(&sound);
    assert_eq!(t.len(), 2);
    assert_eq!(sound.voices_started(), 2);

    assert_eq!(t[0].frequency_hz, 600.0);
    assert_eq!(t[0].waveform, Waveform::Sine);
    assert!(close(t[0].start_sec, 2.0));
    assert_eq!(t[0].duration_sec, 0.15);
    assert!((t[0].peak_gain - 0.2 * 0.3).abs() < 1e-6);
    assert_eq!(t[0].floor_gain, ENVELOPE_FLOOR_GAIN);
    assert_eq!(t[0].cutoff_hz, 1200.0);

    assert_eq!(t[1].frequency_hz, 400.0);
    assert!(close(t[1].start_sec, 2.05));
    assert!((t[1].peak_gain - 0.15 * 0.3).abs() < 1e-6);
}

#[test]
fn collect_arpeggio_offsets() {
    let mut sound = manager(0.0);
    sound.play_collect();
    let t = tones(&sound);
    let freqs: Vec<f32> = t.iter().map(|x| x.frequency_hz).collect();
    assert_eq!(freqs, [800.0, 1200.0, 1600.0]);
    assert!(close(t[1].start_sec, 0.03));
    assert!(close(t[2].start_sec, 0.06));
    assert!(t.iter().all(|x| x.duration_sec == 0.1));
}

#[test]
fn collision_uses_saw_then_square() {
    let mut sound = manager(1.0);
    sound.play_collision();
    let t = tones(&sound);
    assert_eq!(t.len(), 2);
    assert_eq!((t[0].frequency_hz, t[0].waveform), (150.0, Waveform::Saw));
    assert_eq!(t[0].duration_sec, 0.8);
    assert_eq!((t[1].frequency_hz, t[1].waveform), (100.0, Waveform::Square));
    assert!(close(t[1].start_sec, 1.1));
}

#[test]
fn combo_pitch_rises_with_level() {
    let mut sound = manager(0.0);
    sound.play_combo(2);
    sound.play_combo(0);
    let freqs: Vec<f32> = tones(&sound).iter().map(|x| x.frequency_hz).collect();
    assert_eq!(freqs, [600.0, 900.0, 400.0, 600.0]);
}

#[test]
fn envelope_decays_from_peak_to_floor() {
    let mut sound = manager(0.0);
    sound.play_sound(440.0, 1.0, Waveform::Triangle, 1.0);
    let tone = tones(&sound)[0];
    assert!((tone.gain_at(0.0) - 0.3).abs() < 1e-6);
    assert!(tone.gain_at(0.5) < 0.3 && tone.gain_at(0.5) > ENVELOPE_FLOOR_GAIN);
    assert_eq!(tone.gain_at(-0.1), 0.0);
    assert_eq!(tone.gain_at(1.0), 0.0);
}

#[test]
fn missing_backend_is_a_silent_no_op() {
    let mut sound: SoundManager<RecordingAudio> = SoundManager::new(None, 0.3);
    assert!(!sound.is_available());
    sound.play_jump();
    sound.play_collect();
    sound.play_collision();
    sound.play_combo(3);
    assert_eq!(sound.play_ambient(), None);
    sound.stop_ambient(LoopHandle(0));
    assert_eq!(sound.voices_started(), 0);
}

#[test]
fn disabled_sound_schedules_nothing() {
    let mut sound = manager(0.0);
    sound.set_enabled(false);
    sound.play_jump();
    sound.play_combo(1);
    assert!(sound.play_ambient().is_none());
    assert!(tones(&sound).is_empty());

    sound.set_enabled(true);
    sound.play_jump();
    assert_eq!(tones(&sound).len(), 2);
}

#[test]
fn backend_failures_are_swallowed() {
    let mut sound =
        SoundManager::with_rng(Some(RecordingAudio::failing()), 0.3, StdRng::seed_from_u64(2));
    sound.play_collision();
    assert_eq!(sound.voices_started(), 0);
    assert!(sound.play_ambient().is_none());
}

#[test]
fn ambient_loop_is_two_seconds_of_quiet_noise() {
    let mut sound = manager(0.0);
    let handle = sound.play_ambient().expect("loop started");
    let backend = sound.backend().expect("backend");
    let (started, samples) = &backend.loops[0];
    assert_eq!(*started, handle);
    assert_eq!(samples.len(), 16_000);
    assert!(samples.iter().all(|s| s.abs() <= AMBIENT_AMPLITUDE));
    assert!(samples.iter().any(|s| s.abs() > AMBIENT_AMPLITUDE / 2.0));

    // stopping works even after the player mutes
    sound.set_enabled(false);
    sound.stop_ambient(handle);
    assert_eq!(sound.backend().expect("backend").stopped, vec![handle]);
}

#[test]
fn master_volume_is_clamped() {
    let mut sound = manager(0.0);
    sound.set_master_volume(4.0);
    assert_eq!(sound.master_volume(), 1.0);
    sound.set_master_volume(-1.0);
    assert_eq!(sound.master_volume(), 0.0);
}

#[test]
fn zero_volume_schedules_no_voices() {
    let mut sound =
        SoundManager::with_rng(Some(RecordingAudio::default()), 0.0, StdRng::seed_from_u64(3));
    sound.play_jump();
    sound.play_collision();
    assert!(tones(&sound).is_empty());
    assert_eq!(sound.voices_started(), 0);

    sound.set_master_volume(0.5);
    sound.play_sound(440.0, 0.2, Waveform::Sine, 0.0);
    assert!(tones(&sound).is_empty());
    sound.play_sound(440.0, 0.2, Waveform::Sine, 1.0);
    assert_eq!(tones(&sound).len(), 1);
}
