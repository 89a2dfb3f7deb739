use crate::config::CatalogConfig;
use crate::db::{Database, KeyValueStore, MemoryStore};
use crate::models::{CollectionBox, CollectionSortOrder, Model, ModelSortOrder, PageResponse, RecentViewSettings};
use crate::painting_table::{AddOutcome, PaintingTable};
use crate::query::{recent_collections, recent_models};
use crate::settings::SettingsStore;
use crate::view::BrowseState;
use std::sync::Arc;

/// Process-wide catalog state: recent-view settings, the painting table and
/// the browse state of the models and collections views. Records are passed
/// in by the caller on every query; nothing here fetches them.
pub struct CatalogSession {
    config: CatalogConfig,
    settings: SettingsStore,
    painting_table: PaintingTable,
    models_view: BrowseState,
    collections_view: BrowseState,
    models_sort: ModelSortOrder,
    collections_sort: CollectionSortOrder,
    recent_models_page: usize,
    recent_collections_page: usize,
}

impl CatalogSession {
    /// Opens the on-disk store under the configured data directory, falling
    /// back to memory-only storage when the database cannot be opened.
    pub fn open(config: CatalogConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match Database::new(&config.database_path()) {
            Ok(db) => Arc::new(db),
            Err(error) => {
                tracing::warn!(
                    path = %config.database_path().to_string_lossy(),
                    error = %error,
                    "failed to open catalog database; changes will not survive restart"
                );
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: CatalogConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: SettingsStore::hydrate(store.clone()),
            painting_table: PaintingTable::hydrate(store),
            config,
            models_view: BrowseState::new(),
            collections_view: BrowseState::new(),
            models_sort: ModelSortOrder::default(),
            collections_sort: CollectionSortOrder::default(),
            recent_models_page: 1,
            recent_collections_page: 1,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn settings(&self) -> &RecentViewSettings {
        self.settings.current()
    }

    pub fn update_settings(&mut self, patch: serde_json::Value) -> RecentViewSettings {
        let updated = self.settings.update(patch);
        self.recent_models_page = 1;
        self.recent_collections_page = 1;
        updated
    }

    pub fn save_settings(&mut self, settings: RecentViewSettings) {
        self.settings.save(settings);
        self.recent_models_page = 1;
        self.recent_collections_page = 1;
    }

    pub fn models_view(&mut self) -> &mut BrowseState {
        &mut self.models_view
    }

    pub fn collections_view(&mut self) -> &mut BrowseState {
        &mut self.collections_view
    }

    pub fn set_models_sort(&mut self, sort: ModelSortOrder) {
        self.models_sort = sort;
        self.models_view.set_page(1);
    }

    pub fn set_collections_sort(&mut self, sort: CollectionSortOrder) {
        self.collections_sort = sort;
        self.collections_view.set_page(1);
    }

    pub fn models_page(&mut self, models: &[Model]) -> PageResponse<Model> {
        self.models_view
            .models_page(models, self.models_sort, self.config.effective_page_size())
    }

    pub fn collections_page(&mut self, collections: &[CollectionBox]) -> PageResponse<CollectionBox> {
        self.collections_view
            .collections_page(collections, self.collections_sort, self.config.effective_page_size())
    }

    pub fn set_recent_models_page(&mut self, page: usize) {
        self.recent_models_page = page.max(1);
    }

    pub fn set_recent_collections_page(&mut self, page: usize) {
        self.recent_collections_page = page.max(1);
    }

    pub fn recent_models_page(&self, models: &[Model]) -> PageResponse<Model> {
        recent_models(
            models,
            self.settings.current(),
            self.recent_models_page,
            self.config.effective_page_size(),
        )
    }

    pub fn recent_collections_page(&self, collections: &[CollectionBox]) -> PageResponse<CollectionBox> {
        recent_collections(
            collections,
            self.settings.current(),
            self.recent_collections_page,
            self.config.effective_page_size(),
        )
    }

    pub fn painting_table(&self) -> &PaintingTable {
        &self.painting_table
    }

    pub fn add_to_painting_table(&mut self, model: Model) -> AddOutcome {
        self.painting_table.add(model)
    }

    pub fn remove_from_painting_table(&mut self, model_id: &str) -> bool {
        self.painting_table.remove(model_id)
    }

    /// Refreshes painting table snapshots from freshly fetched models.
    pub fn sync_painting_table(&mut self, models: &[Model]) -> bool {
        self.painting_table.reconcile(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaintStatus;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn model(id: &str, day: u32) -> Model {
        Model {
            id: id.to_string(),
            name: id.to_string(),
            status: PaintStatus::Assembled,
            count: 1,
            collection: None,
            game: None,
            images: vec![],
            image: None,
            created_at: Utc.with_ymd_and_hms(2024, 4, day, 0, 0, 0).unwrap(),
            painted_at: None,
        }
    }

    #[test]
    fn session_state_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = CatalogConfig::new(dir.path());
        {
            let mut session = CatalogSession::open(config.clone());
            session.update_settings(json!({ "modelSortOrder": "mostRecentlyPainted" }));
            assert_eq!(session.add_to_painting_table(model("a", 1)), AddOutcome::Added);
        }

        let session = CatalogSession::open(config);
        assert_eq!(session.settings().model_sort_order, ModelSortOrder::MostRecentlyPainted);
        assert!(session.painting_table().contains("a"));
    }

    #[test]
    fn settings_change_resets_recent_pages() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = CatalogSession::with_store(CatalogConfig::new("/unused").with_page_size(2), store);
        let models: Vec<Model> = (1..=5).map(|day| model(&format!("m{}", day), day)).collect();

        session.set_recent_models_page(3);
        assert_eq!(session.recent_models_page(&models).items.len(), 1);

        session.update_settings(json!({ "showAssembled": false }));
        let page = session.recent_models_page(&models);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn models_page_uses_configured_page_size() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = CatalogSession::with_store(CatalogConfig::new("/unused").with_page_size(4), store);
        let models: Vec<Model> = (1..=9).map(|day| model(&format!("m{}", day), day)).collect();

        let page = session.models_page(&models);
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].id, "m9");

        session.models_view().set_page(3);
        assert_eq!(session.models_page(&models).items.len(), 1);
        session.set_models_sort(ModelSortOrder::MostRecentlyPainted);
        assert_eq!(session.models_view().page(), 1);
    }
}
