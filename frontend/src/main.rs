mod api;
mod audio;
mod browser;
mod components;
mod state;

use apprenti::detail::{self, DetailLoad};
use apprenti::navigation::Page;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use components::chat::AssistantChat;
use components::detail::DetailPage;
use components::gallery::ThematiqueGallery;
use components::navbar::Navbar;

fn island_root(id: &str) -> Option<web_sys::HtmlElement> {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    if root.is_none() {
        log::warn!("Impossible de trouver la racine #{id} pour le rendu.");
    }
    root
}

/// Mounts `view` into the element with `id`, replacing its content.
/// Pages without that element are left alone.
fn mount_island<F, N>(id: &str, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    if let Some(root) = island_root(id) {
        mount_into(root, view);
    }
}

fn mount_into<F, N>(root: web_sys::HtmlElement, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    root.set_inner_html("");
    mount_to(root, view).forget();
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");

    let page = browser::current_page();
    log::debug!("Booting {page:?}");

    mount_island("navbar-root", Navbar);

    match page {
        Page::Home | Page::Catalog => {
            mount_island("thematique-grid", move || view! { <ThematiqueGallery page=page /> });
        }
        Page::Detail => {
            // The selection is consumed on read, so only take it once there is somewhere to show it
            let Some(root) = island_root("detail-root") else {
                return;
            };
            match detail::load(&browser::LocalStore::open()) {
                DetailLoad::Redirect(target) => browser::navigate(target),
                DetailLoad::Show(detail) => {
                    browser::set_document_title(&detail.document_title);
                    mount_into(root, move || view! { <DetailPage detail=detail /> });
                }
            }
        }
        Page::Assistant => mount_island("assistant-root", AssistantChat),
    }
}
