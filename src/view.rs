use crate::models::{
    CollectionBox, CollectionSortOrder, FilterState, Model, ModelSortOrder, PageResponse, PaintStatus,
};
use crate::query::{browse_collections, browse_models, clamp_page, collection_matches, model_matches, total_pages};

/// Filter selections and current page for one browse view. Every filter
/// change resets the page to 1 in the same step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    filter: FilterState,
    page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
        self.page = 1;
    }

    pub fn toggle_box(&mut self, box_id: &str) {
        toggle(&mut self.filter.selected_boxes, box_id.to_string());
        self.page = 1;
    }

    pub fn toggle_game(&mut self, game_id: &str) {
        toggle(&mut self.filter.selected_games, game_id.to_string());
        self.page = 1;
    }

    pub fn toggle_status(&mut self, status: PaintStatus) {
        toggle(&mut self.filter.selected_statuses, status);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Runs the models pipeline for the current state. The stored page is
    /// first clamped to the pages that currently exist, so a source list that
    /// shrank underneath the view lands on its last page instead of an
    /// empty one.
    pub fn models_page(&mut self, models: &[Model], sort: ModelSortOrder, page_size: usize) -> PageResponse<Model> {
        let matched = models.iter().filter(|model| model_matches(model, &self.filter)).count();
        self.page = clamp_page(self.page, total_pages(matched, page_size));
        browse_models(models, &self.filter, sort, self.page, page_size)
    }

    pub fn collections_page(
        &mut self,
        collections: &[CollectionBox],
        sort: CollectionSortOrder,
        page_size: usize,
    ) -> PageResponse<CollectionBox> {
        let matched = collections
            .iter()
            .filter(|collection| collection_matches(collection, &self.filter))
            .count();
        self.page = clamp_page(self.page, total_pages(matched, page_size));
        browse_collections(collections, &self.filter, sort, self.page, page_size)
    }
}

fn toggle<T: Ord>(set: &mut std::collections::BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn models(count: u32) -> Vec<Model> {
        (1..=count)
            .map(|n| Model {
                id: format!("m{}", n),
                name: if n % 2 == 0 { format!("Knight {}", n) } else { format!("Goblin {}", n) },
                status: PaintStatus::None,
                count: 1,
                collection: None,
                game: None,
                images: vec![],
                image: None,
                created_at: Utc.with_ymd_and_hms(2024, 3, n, 0, 0, 0).unwrap(),
                painted_at: None,
            })
            .collect()
    }

    #[test]
    fn every_filter_change_resets_the_page() {
        let mut state = BrowseState::new();
        let mutations: [fn(&mut BrowseState); 5] = [
            |s| s.set_search("knight"),
            |s| s.toggle_box("b1"),
            |s| s.toggle_game("g1"),
            |s| s.toggle_status(PaintStatus::Primed),
            |s| s.clear_filters(),
        ];
        for mutate in mutations {
            state.set_page(4);
            mutate(&mut state);
            assert_eq!(state.page(), 1);
        }
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut state = BrowseState::new();
        state.toggle_game("g1");
        assert!(state.filter().selected_games.contains("g1"));
        state.toggle_game("g1");
        assert!(state.filter().is_empty());
    }

    #[test]
    fn page_never_drops_below_one() {
        let mut state = BrowseState::new();
        state.set_page(0);
        assert_eq!(state.page(), 1);
        state.previous_page();
        assert_eq!(state.page(), 1);
        state.next_page();
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn page_is_clamped_when_source_shrinks() {
        let mut state = BrowseState::new();
        state.set_page(3);
        let all = models(13);
        let page = state.models_page(&all, ModelSortOrder::MostRecentlyAdded, 6);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 1);

        let fewer = models(8);
        let page = state.models_page(&fewer, ModelSortOrder::MostRecentlyAdded, 6);
        assert_eq!(page.page, 2);
        assert_eq!(state.page(), 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn search_narrows_models_page() {
        let mut state = BrowseState::new();
        state.set_search("KNIGHT");
        let page = state.models_page(&models(6), ModelSortOrder::MostRecentlyAdded, 6);
        let ids: Vec<_> = page.items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m6", "m4", "m2"]);
    }
}
