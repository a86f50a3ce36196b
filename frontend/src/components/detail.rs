use apprenti::detail::DetailView;
use leptos::prelude::*;

use crate::browser::{self, LocalStore};

/// Detail page body for the consumed selection.
#[component]
pub fn DetailPage(detail: DetailView) -> impl IntoView {
    let has_keywords = detail.has_keywords();
    let keywords = detail.keywords.clone();
    let DetailView { title, header_level, description, domain, badge_text, badge_class, id, .. } =
        detail.clone();
    let detail = StoredValue::new(detail);

    let on_ask = move |_| {
        let store = LocalStore::open();
        match detail.with_value(|d| d.ask_assistant(&store)) {
            Ok(page) => browser::navigate(page),
            Err(e) => log::error!("Failed to store the assistant context: {e}"),
        }
    };

    view! {
        <section class="detail">
            <header class="detail__header">
                <h1 id="detail-title" class="detail__title">{title}</h1>
                <span id="detail-niveau" class="detail__niveau">{header_level}</span>
            </header>

            <p id="detail-description" class="detail__description">{description}</p>

            <dl class="detail-meta">
                <dt>"Domaine"</dt>
                <dd id="detail-domaine">{domain}</dd>
                <dt>"Niveau"</dt>
                <dd>
                    <span id="detail-niveau-badge" class=badge_class>{badge_text}</span>
                </dd>
                <dt>"Identifiant"</dt>
                <dd id="detail-id" title="Identifiant unique de la thématique">{id}</dd>
            </dl>

            <Show when=move || has_keywords>
                <div id="keywords-section" class="keywords">
                    <h2>"Mots-clés"</h2>
                    <div id="detail-keywords" class="keywords__list">
                        {keywords
                            .iter()
                            .map(|k| view! { <span class="keyword-tag">{k.clone()}</span> })
                            .collect_view()}
                    </div>
                </div>
            </Show>

            <button id="ia-agent-btn" class="detail__ask" on:click=on_ask>
                "Demander à l'assistant IA"
            </button>
        </section>
    }
}
