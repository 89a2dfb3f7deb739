use crate::models::{CollectionBox, CollectionSortOrder, Model, ModelSortOrder};
use std::cmp::Ordering;

pub type Comparator<T> = fn(&T, &T) -> Ordering;

pub fn model_comparator(order: ModelSortOrder) -> Comparator<Model> {
    match order {
        ModelSortOrder::MostRecentlyAdded => compare_models_added,
        ModelSortOrder::MostRecentlyPainted => compare_models_painted,
    }
}

pub fn collection_comparator(order: CollectionSortOrder) -> Comparator<CollectionBox> {
    match order {
        CollectionSortOrder::MostRecentlyAdded => compare_collections_added,
        CollectionSortOrder::MostRecentlyPurchased => compare_collections_purchased,
    }
}

fn compare_models_added(a: &Model, b: &Model) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn compare_models_painted(a: &Model, b: &Model) -> Ordering {
    newest_present_first(a.painted_at.as_ref(), b.painted_at.as_ref())
        .unwrap_or_else(|| compare_models_added(a, b))
}

fn compare_collections_added(a: &CollectionBox, b: &CollectionBox) -> Ordering {
    newest_present_first(a.created_at.as_ref(), b.created_at.as_ref()).unwrap_or(Ordering::Equal)
}

fn compare_collections_purchased(a: &CollectionBox, b: &CollectionBox) -> Ordering {
    newest_present_first(a.purchased_at.as_ref(), b.purchased_at.as_ref())
        .unwrap_or_else(|| compare_collections_added(a, b))
}

/// Newest first when both values exist, a present value ahead of a missing
/// one, and `None` when neither exists so the caller can fall through.
fn newest_present_first<T: Ord>(a: Option<&T>, b: Option<&T>) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Some(b.cmp(a)),
        (Some(_), None) => Some(Ordering::Less),
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => None,
    }
}
