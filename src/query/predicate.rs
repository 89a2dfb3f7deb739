use crate::models::{CollectionBox, FilterState, Game, Model};

pub fn model_matches(model: &Model, filter: &FilterState) -> bool {
    if !name_matches(&model.name, &filter.search_query) {
        return false;
    }

    if !filter.selected_boxes.is_empty() {
        let Some(collection) = model.collection.as_ref() else {
            return false;
        };
        if !filter.selected_boxes.contains(&collection.id) {
            return false;
        }
    }

    if !game_matches(model.effective_game(), filter) {
        return false;
    }

    filter.selected_statuses.is_empty() || filter.selected_statuses.contains(&model.status)
}

/// Box and status selections do not apply to collections.
pub fn collection_matches(collection: &CollectionBox, filter: &FilterState) -> bool {
    name_matches(&collection.name, &filter.search_query) && game_matches(collection.game.as_ref(), filter)
}

fn game_matches(game: Option<&Game>, filter: &FilterState) -> bool {
    if filter.selected_games.is_empty() {
        return true;
    }
    game.map(|game| filter.selected_games.contains(&game.id))
        .unwrap_or(false)
}

/// Whitespace only decides whether a query is blank; otherwise the query is
/// matched exactly as typed.
fn name_matches(name: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}
