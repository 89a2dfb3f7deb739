use crate::db::{KeyValueStore, PAINTING_TABLE_KEY};
use crate::errors::AppResult;
use crate::models::Model;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const PAINTING_TABLE_CAPACITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Full,
}

/// The small set of models currently being painted. Holds at most
/// [`PAINTING_TABLE_CAPACITY`] entries with unique ids, in insertion order,
/// and persists full snapshots after every change.
pub struct PaintingTable {
    store: Arc<dyn KeyValueStore>,
    models: Vec<Model>,
}

impl PaintingTable {
    pub fn hydrate(store: Arc<dyn KeyValueStore>) -> Self {
        let models = read_snapshots(store.as_ref());
        tracing::info!(count = models.len(), "painting table hydrated");
        Self { store, models }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.models.len() >= PAINTING_TABLE_CAPACITY
    }

    pub fn available_slots(&self) -> usize {
        PAINTING_TABLE_CAPACITY.saturating_sub(self.models.len())
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.models.iter().any(|model| model.id == model_id)
    }

    pub fn add(&mut self, model: Model) -> AddOutcome {
        if self.contains(&model.id) {
            return AddOutcome::AlreadyPresent;
        }
        if self.is_full() {
            return AddOutcome::Full;
        }
        self.models.push(model);
        self.persist();
        AddOutcome::Added
    }

    pub fn remove(&mut self, model_id: &str) -> bool {
        let before = self.models.len();
        self.models.retain(|model| model.id != model_id);
        if self.models.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Source models not already on the table, for selection pickers.
    pub fn candidates<'a>(&self, models: &'a [Model]) -> Vec<&'a Model> {
        models.iter().filter(|model| !self.contains(&model.id)).collect()
    }

    /// Replaces every snapshot with the current record of the same id and
    /// drops entries whose model no longer exists. Returns whether anything
    /// changed.
    pub fn reconcile(&mut self, source: &[Model]) -> bool {
        let by_id: HashMap<&str, &Model> = source.iter().map(|model| (model.id.as_str(), model)).collect();
        let refreshed: Vec<Model> = self
            .models
            .iter()
            .filter_map(|snapshot| by_id.get(snapshot.id.as_str()).map(|model| (*model).clone()))
            .collect();

        if refreshed == self.models {
            return false;
        }
        let dropped = self.models.len() - refreshed.len();
        if dropped > 0 {
            tracing::info!(dropped, "removed painting table entries missing from the catalog");
        }
        self.models = refreshed;
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(error) = write_snapshots(self.store.as_ref(), &self.models) {
            tracing::warn!(key = PAINTING_TABLE_KEY, error = %error, "failed to persist painting table");
        }
    }
}

fn write_snapshots(store: &dyn KeyValueStore, models: &[Model]) -> AppResult<()> {
    let raw = serde_json::to_string(models)?;
    store.set(PAINTING_TABLE_KEY, &raw)
}

fn read_snapshots(store: &dyn KeyValueStore) -> Vec<Model> {
    let raw = match store.get(PAINTING_TABLE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(key = PAINTING_TABLE_KEY, error = %error, "failed to read painting table");
            return Vec::new();
        }
    };

    let stored = match serde_json::from_str::<Vec<Model>>(&raw) {
        Ok(models) => models,
        Err(error) => {
            tracing::warn!(key = PAINTING_TABLE_KEY, error = %error, "stored painting table is malformed");
            return Vec::new();
        }
    };

    let stored_len = stored.len();
    let mut seen = HashSet::new();
    let models: Vec<Model> = stored
        .into_iter()
        .filter(|model| seen.insert(model.id.clone()))
        .take(PAINTING_TABLE_CAPACITY)
        .collect();
    if models.len() != stored_len {
        tracing::warn!(
            stored = stored_len,
            kept = models.len(),
            "stored painting table had duplicates or exceeded capacity"
        );
    }
    models
}
