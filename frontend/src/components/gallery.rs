use apprenti::catalog;
use apprenti::models::Thematique;
use apprenti::navigation::Page;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::{self, LocalStore};

/// Catalog grid: loads the catalog (falling back to the built-in list)
/// and shows as many cards as `page` allows.
#[component]
pub fn ThematiqueGallery(page: Page) -> impl IntoView {
    let (items, set_items) = signal(Vec::<Thematique>::new());

    spawn_local(async move {
        let dataset = api::repository().load_or_fallback().await;
        set_items.set(catalog::visible_on(page, dataset));
    });

    view! {
        <For
            each=move || items.get().into_iter().enumerate()
            key=|(index, thematique)| (*index, thematique.id.clone())
            children=move |(_, thematique)| view! { <ThematiqueCard thematique=thematique /> }
        />
    }
}

/// One focusable card; click, Enter or Space opens the detail page.
#[component]
fn ThematiqueCard(thematique: Thematique) -> impl IntoView {
    let title = thematique.title.clone().unwrap_or_default();
    let level = thematique.level().label().to_string();
    let selected = StoredValue::new(thematique);

    let open = move || {
        let store = LocalStore::open();
        match selected.with_value(|t| catalog::select(&store, t)) {
            Ok(page) => browser::navigate(page),
            Err(e) => log::error!("Failed to store the selected thematique: {e}"),
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if catalog::is_activation_key(&ev.key()) {
            ev.prevent_default();
            open();
        }
    };

    view! {
        <article
            class="card"
            tabindex="0"
            style="cursor: pointer"
            on:click=move |_| open()
            on:keydown=on_keydown
        >
            <h2 class="card__title">{title}</h2>
            <div class="card__meta">
                <span class="card__meta-dot"></span>
                <span>{level}</span>
            </div>
        </article>
    }
}
