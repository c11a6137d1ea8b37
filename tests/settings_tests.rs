// Host-side tests for persisted settings.

mod support;

use dash_core::constants::SETTINGS_KEY;
use dash_core::*;
use support::BrokenStore;

#[test]
fn empty_store_yields_defaults() {
    let settings = SettingsStore::new(MemoryStore::new()).load();
    assert_eq!(settings, Settings::default());
    assert!(settings.sound_enabled);
    assert_eq!(settings.high_score, 0);
}

#[test]
fn high_score_only_moves_up() {
    let mut store = SettingsStore::new(MemoryStore::new());
    assert!(store.update_high_score(100));
    assert!(!store.update_high_score(50));
    assert!(!store.update_high_score(100));
    assert_eq!(store.load().high_score, 100);
}

#[test]
fn corrupt_record_falls_back_to_defaults() {
    let mut raw = MemoryStore::new();
    raw.set(SETTINGS_KEY, "{not json").unwrap();
    let mut store = SettingsStore::new(raw);
    assert_eq!(store.load(), Settings::default());
    // the next write replaces the broken record
    assert!(store.update_high_score(7));
    assert_eq!(store.load().high_score, 7);
}

#[test]
fn partial_record_fills_missing_fields() {
    let mut raw = MemoryStore::new();
    raw.set(SETTINGS_KEY, r#"{"highScore":900}"#).unwrap();
    let settings = SettingsStore::new(raw).load();
    assert_eq!(settings.high_score, 900);
    assert!(settings.sound_enabled);
    assert_eq!(settings.total_games, 0);
}

#[test]
fn record_uses_camel_case_keys() {
    let mut store = SettingsStore::new(MemoryStore::new());
    store.set_sound_enabled(false);
    let text = store.store().get(SETTINGS_KEY).unwrap().expect("saved");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["soundEnabled"], false);
    assert_eq!(json["highScore"], 0);
    assert!(json.get("totalDistance").is_some());
}

#[test]
fn failing_store_never_raises() {
    let mut store = SettingsStore::new(BrokenStore);
    assert_eq!(store.load(), Settings::default());
    store.save(&Settings::default());
    assert!(store.update_high_score(10));
    let after = store.record_run(12.5);
    assert_eq!(after.total_games, 1);
    store.set_sound_enabled(false);
}

#[test]
fn runs_accumulate_totals() {
    let mut store = SettingsStore::new(MemoryStore::new());
    store.record_run(100.0);
    let s = store.record_run(50.5);
    assert_eq!(s.total_games, 2);
    assert_eq!(s.total_distance, 150.5);
    assert_eq!(store.load(), s);
}

#[test]
fn fractional_counters_keep_the_rest_of_the_record() {
    let mut raw = MemoryStore::new();
    raw.set(
        SETTINGS_KEY,
        r#"{"soundEnabled":false,"highScore":1234.5,"totalGames":3,"totalDistance":10.5}"#,
    )
    .unwrap();
    let settings = SettingsStore::new(raw).load();
    assert_eq!(
        settings,
        Settings {
            sound_enabled: false,
            high_score: 1234,
            total_games: 3,
            total_distance: 10.5,
        }
    );
}

#[test]
fn negative_or_non_numeric_counters_read_as_zero() {
    let mut raw = MemoryStore::new();
    raw.set(
        SETTINGS_KEY,
        r#"{"soundEnabled":false,"highScore":-5,"totalGames":"many","totalDistance":2.0}"#,
    )
    .unwrap();
    let settings = SettingsStore::new(raw).load();
    assert!(!settings.sound_enabled);
    assert_eq!(settings.high_score, 0);
    assert_eq!(settings.total_games, 0);
    assert_eq!(settings.total_distance, 2.0);
}
