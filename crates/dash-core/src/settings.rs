//! Persisted player settings with safe fallbacks.
//!
//! The record is stored as JSON under a single fixed key. Reads that fail
//! or find nothing yield defaults; writes that fail are logged and dropped.

use crate::constants::SETTINGS_KEY;
use crate::error::StoreError;
use fnv::FnvHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sound_enabled: bool,
    #[serde(deserialize_with = "lenient_count")]
    pub high_score: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub total_games: u64,
    pub total_distance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            high_score: 0,
            total_games: 0,
            total_distance: 0.0,
        }
    }
}

/// Counters written by the page may arrive as any JSON number. Fractions are
/// floored, negatives and non-numbers read as 0, so one odd field never
/// discards the rest of the record.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| match n.as_f64() {
            Some(f) if f.is_finite() && f > 0.0 => f.floor() as u64,
            _ => 0,
        }),
        _ => 0,
    };
    Ok(count)
}

/// Durable string key-value storage owned by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, used where the host has no durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load(&self) -> Settings {
        match self.store.get(SETTINGS_KEY) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("[settings] stored record unreadable, using defaults: {}", e);
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("[settings] read failed, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save(&mut self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            log::warn!("[settings] could not save settings: {}", e);
        }
    }

    fn try_save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let text = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &text)
    }

    /// Store `score` if it beats the saved high score. Returns whether it did.
    pub fn update_high_score(&mut self, score: u64) -> bool {
        let mut settings = self.load();
        if score > settings.high_score {
            settings.high_score = score;
            self.save(&settings);
            true
        } else {
            false
        }
    }

    /// Count one finished run and its distance toward the lifetime totals.
    pub fn record_run(&mut self, distance: f64) -> Settings {
        let mut settings = self.load();
        settings.total_games += 1;
        settings.total_distance += distance.max(0.0);
        self.save(&settings);
        settings
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        let mut settings = self.load();
        if settings.sound_enabled != enabled {
            settings.sound_enabled = enabled;
            self.save(&settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Settings = serde_json::from_str(r#"{"highScore":42}"#).unwrap();
        assert_eq!(parsed.high_score, 42);
        assert!(parsed.sound_enabled);
        assert_eq!(parsed.total_games, 0);
    }

    #[test]
    fn record_uses_browser_key_names() {
        let text = serde_json::to_string(&Settings::default()).unwrap();
        for key in ["soundEnabled", "highScore", "totalGames", "totalDistance"] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }
}
