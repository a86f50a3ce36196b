use apprenti::errors::AppError;
use apprenti::handoff::KeyValueStore;
use apprenti::navigation::Page;
use web_sys::Storage;

/// `window.localStorage`, the channel between pages.
#[derive(Clone, Debug)]
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; page hand-off disabled");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AppError::storage(key, "localStorage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| AppError::storage(key, format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                log::warn!("Failed to remove '{key}' from localStorage: {e:?}");
            }
        }
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn current_page() -> Page {
    Page::from_path(&current_path())
}

/// Full page navigation, relative to the current directory.
pub fn navigate(page: Page) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(page.href()) {
            log::error!("Navigation to {} failed: {e:?}", page.href());
        }
    }
}

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}
