use super::paginate::paginate;
use super::predicate::{collection_matches, model_matches};
use super::sort::{collection_comparator, model_comparator, Comparator};
use super::status_policy::recent_model_included;
use crate::models::{
    CollectionBox, CollectionSortOrder, FilterState, Model, ModelSortOrder, PageResponse, RecentViewSettings,
};
use std::collections::HashMap;

/// Keeps the records accepted by `keep` and stable-sorts them. The input is
/// never mutated.
pub fn filter_and_sort<T, F>(records: &[T], keep: F, compare: Comparator<T>) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let mut matched: Vec<T> = records.iter().filter(|record| keep(*record)).cloned().collect();
    matched.sort_by(compare);
    matched
}

fn run_query<T, F>(
    view: &'static str,
    records: &[T],
    keep: F,
    compare: Comparator<T>,
    page: usize,
    page_size: usize,
) -> PageResponse<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let matched = filter_and_sort(records, keep, compare);
    let result = paginate(&matched, page, page_size);
    tracing::debug!(
        view,
        source = records.len(),
        matched = result.total_items,
        page = result.page,
        total_pages = result.total_pages,
        "query recomputed"
    );
    result
}

pub fn browse_models(
    models: &[Model],
    filter: &FilterState,
    sort: ModelSortOrder,
    page: usize,
    page_size: usize,
) -> PageResponse<Model> {
    run_query(
        "models",
        models,
        |model| model_matches(model, filter),
        model_comparator(sort),
        page,
        page_size,
    )
}

pub fn browse_collections(
    collections: &[CollectionBox],
    filter: &FilterState,
    sort: CollectionSortOrder,
    page: usize,
    page_size: usize,
) -> PageResponse<CollectionBox> {
    run_query(
        "collections",
        collections,
        |collection| collection_matches(collection, filter),
        collection_comparator(sort),
        page,
        page_size,
    )
}

pub fn recent_models(
    models: &[Model],
    settings: &RecentViewSettings,
    page: usize,
    page_size: usize,
) -> PageResponse<Model> {
    run_query(
        "recent-models",
        models,
        |model| recent_model_included(model, settings),
        model_comparator(settings.model_sort_order),
        page,
        page_size,
    )
}

pub fn recent_collections(
    collections: &[CollectionBox],
    settings: &RecentViewSettings,
    page: usize,
    page_size: usize,
) -> PageResponse<CollectionBox> {
    run_query(
        "recent-collections",
        collections,
        |_| true,
        collection_comparator(settings.collection_sort_order),
        page,
        page_size,
    )
}

/// Recomputes each box's aggregate model count from the models that
/// reference it, summing `count` so grouped miniatures are counted
/// individually.
pub fn collection_model_totals(models: &[Model], collections: &[CollectionBox]) -> Vec<CollectionBox> {
    let mut totals: HashMap<&str, u32> = HashMap::new();
    for model in models {
        if let Some(collection) = model.collection.as_ref() {
            let entry = totals.entry(collection.id.as_str()).or_insert(0);
            *entry = entry.saturating_add(model.count);
        }
    }

    collections
        .iter()
        .map(|collection| CollectionBox {
            model_count: totals.get(collection.id.as_str()).copied().unwrap_or(0),
            ..collection.clone()
        })
        .collect()
}
