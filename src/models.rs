use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaintStatus {
    #[default]
    None,
    Assembled,
    Primed,
    PartiallyPainted,
    Painted,
}

impl PaintStatus {
    pub const ALL: [PaintStatus; 5] = [
        Self::None,
        Self::Assembled,
        Self::Primed,
        Self::PartiallyPainted,
        Self::Painted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Assembled => "Assembled",
            Self::Primed => "Primed",
            Self::PartiallyPainted => "Partially Painted",
            Self::Painted => "Painted",
        }
    }

    /// Parses a stored status label. `Unassembled` predates the `None`
    /// bucket and unknown labels land there too.
    pub fn from_label(value: &str) -> Self {
        match value.trim() {
            "Assembled" => Self::Assembled,
            "Primed" => Self::Primed,
            "Partially Painted" => Self::PartiallyPainted,
            "Painted" => Self::Painted,
            _ => Self::None,
        }
    }
}

impl From<String> for PaintStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<PaintStatus> for String {
    fn from(value: PaintStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A box or collection of models, optionally tied to a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBox {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub model_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: PaintStatus,
    #[serde(default = "default_model_count")]
    pub count: u32,
    #[serde(default, rename = "box")]
    pub collection: Option<CollectionBox>,
    /// Direct game reference from before models were grouped into boxes.
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Single-image field from before multi-image support.
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub painted_at: Option<DateTime<Utc>>,
}

fn default_model_count() -> u32 {
    1
}

impl Model {
    /// The game a model belongs to. The owning box's game takes precedence
    /// over the legacy direct reference.
    pub fn effective_game(&self) -> Option<&Game> {
        self.collection
            .as_ref()
            .and_then(|collection| collection.game.as_ref())
            .or(self.game.as_ref())
    }

    pub fn has_image(&self) -> bool {
        self.images.iter().any(|image| !image.trim().is_empty())
            || self
                .image
                .as_deref()
                .map(|image| !image.trim().is_empty())
                .unwrap_or(false)
    }
}

/// Selections for one browsable entity type. Empty sets and an empty query
/// match everything; ids are not validated against existing records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub selected_boxes: BTreeSet<String>,
    pub selected_games: BTreeSet<String>,
    pub selected_statuses: BTreeSet<PaintStatus>,
    pub search_query: String,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.selected_boxes.is_empty()
            && self.selected_games.is_empty()
            && self.selected_statuses.is_empty()
            && self.search_query.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelSortOrder {
    #[default]
    MostRecentlyAdded,
    MostRecentlyPainted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionSortOrder {
    #[default]
    MostRecentlyAdded,
    MostRecentlyPurchased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentViewSettings {
    pub show_painted: bool,
    pub show_partially_painted: bool,
    pub show_primed: bool,
    pub show_assembled: bool,
    pub show_unassembled: bool,
    pub show_images_only: bool,
    pub model_sort_order: ModelSortOrder,
    pub collection_sort_order: CollectionSortOrder,
}

impl Default for RecentViewSettings {
    fn default() -> Self {
        Self {
            show_painted: true,
            show_partially_painted: true,
            show_primed: true,
            show_assembled: true,
            show_unassembled: true,
            show_images_only: false,
            model_sort_order: ModelSortOrder::MostRecentlyAdded,
            collection_sort_order: CollectionSortOrder::MostRecentlyAdded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}
