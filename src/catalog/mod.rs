pub mod fallback;
pub mod repository;

use crate::errors::AppError;
use crate::handoff::{KeyValueStore, SELECTED_THEMATIQUE};
use crate::models::Thematique;
use crate::navigation::Page;

pub use repository::ThematiqueRepository;

/// Keys that activate a focused card.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Truncates the catalog to what `page` shows.
pub fn visible_on(page: Page, mut items: Vec<Thematique>) -> Vec<Thematique> {
    items.truncate(page.gallery_limit());
    items
}

/// Card activation: hands the entry to the detail page and returns where to go.
pub fn select(store: &impl KeyValueStore, thematique: &Thematique) -> Result<Page, AppError> {
    SELECTED_THEMATIQUE.put(store, thematique)?;
    Ok(Page::Detail)
}
