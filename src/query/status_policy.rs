use crate::models::{Model, PaintStatus, RecentViewSettings};

pub fn status_included(status: PaintStatus, settings: &RecentViewSettings) -> bool {
    match status {
        PaintStatus::Painted => settings.show_painted,
        PaintStatus::PartiallyPainted => settings.show_partially_painted,
        PaintStatus::Primed => settings.show_primed,
        PaintStatus::Assembled => settings.show_assembled,
        PaintStatus::None => settings.show_unassembled,
    }
}

/// Whether a model appears in the recent view. With `show_images_only` set a
/// model without any image is excluded whatever its status.
pub fn recent_model_included(model: &Model, settings: &RecentViewSettings) -> bool {
    if settings.show_images_only && !model.has_image() {
        return false;
    }
    status_included(model.status, settings)
}
