use crate::db::{KeyValueStore, RECENT_VIEW_SETTINGS_KEY};
use crate::errors::AppResult;
use crate::models::RecentViewSettings;
use serde_json::Value;
use std::sync::Arc;

/// Recent-view settings backed by durable storage. The in-memory copy stays
/// authoritative for the session even when writes fail.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    current: RecentViewSettings,
}

impl SettingsStore {
    pub fn hydrate(store: Arc<dyn KeyValueStore>) -> Self {
        let current = load(store.as_ref());
        Self { store, current }
    }

    pub fn current(&self) -> &RecentViewSettings {
        &self.current
    }

    pub fn save(&mut self, settings: RecentViewSettings) {
        save(self.store.as_ref(), &settings);
        self.current = settings;
    }

    /// Deep-merges a partial settings object onto the current value and
    /// persists the result. A patch that is not an object is ignored.
    pub fn update(&mut self, patch: Value) -> RecentViewSettings {
        if !patch.is_object() {
            tracing::warn!("ignoring recent view settings update that is not an object");
            return self.current.clone();
        }
        let mut merged = match serde_json::to_value(&self.current) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(error = %error, "failed to serialize current recent view settings");
                return self.current.clone();
            }
        };
        merge_json(&mut merged, patch);
        let next = settings_from_value(merged);
        self.save(next.clone());
        next
    }
}

/// Reads stored settings. Missing keys, unreadable storage and malformed
/// JSON all produce defaults; each stored field is taken independently.
pub fn load(store: &dyn KeyValueStore) -> RecentViewSettings {
    let raw = match store.get(RECENT_VIEW_SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return RecentViewSettings::default(),
        Err(error) => {
            tracing::warn!(key = RECENT_VIEW_SETTINGS_KEY, error = %error, "failed to read recent view settings");
            return RecentViewSettings::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => settings_from_value(value),
        Err(error) => {
            tracing::warn!(key = RECENT_VIEW_SETTINGS_KEY, error = %error, "stored recent view settings are not valid json");
            RecentViewSettings::default()
        }
    }
}

/// Writes the complete settings object. Failures are logged, never returned.
pub fn save(store: &dyn KeyValueStore, settings: &RecentViewSettings) {
    if let Err(error) = try_save(store, settings) {
        tracing::warn!(key = RECENT_VIEW_SETTINGS_KEY, error = %error, "failed to persist recent view settings");
    }
}

fn try_save(store: &dyn KeyValueStore, settings: &RecentViewSettings) -> AppResult<()> {
    let raw = serde_json::to_string(settings)?;
    store.set(RECENT_VIEW_SETTINGS_KEY, &raw)
}

fn settings_from_value(value: Value) -> RecentViewSettings {
    let defaults = RecentViewSettings::default();
    let Value::Object(stored) = value else {
        tracing::warn!("stored recent view settings are not an object; using defaults");
        return defaults;
    };
    let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
        return defaults;
    };

    for (field, candidate) in stored {
        if !merged.contains_key(&field) {
            continue;
        }
        let mut trial = merged.clone();
        trial.insert(field.clone(), candidate.clone());
        match serde_json::from_value::<RecentViewSettings>(Value::Object(trial)) {
            Ok(_) => {
                merged.insert(field, candidate);
            }
            Err(error) => {
                tracing::warn!(field = %field, error = %error, "ignoring invalid recent view setting");
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
}

fn merge_json(target: &mut Value, update: Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_json(target_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, update) => {
            *target = update;
        }
    }
}
