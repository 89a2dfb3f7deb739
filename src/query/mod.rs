pub mod paginate;
pub mod pipeline;
pub mod predicate;
pub mod sort;
pub mod status_policy;

pub use paginate::{clamp_page, paginate, total_pages};
pub use pipeline::{
    browse_collections, browse_models, collection_model_totals, filter_and_sort, recent_collections,
    recent_models,
};
pub use predicate::{collection_matches, model_matches};
pub use sort::{collection_comparator, model_comparator, Comparator};
pub use status_policy::{recent_model_included, status_included};
