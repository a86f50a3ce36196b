use apprenti::navigation::{is_active_link, MenuState, NAV_LINKS};
use leptos::prelude::*;

use crate::browser;

/// Top navigation with the mobile menu toggle.
#[component]
pub fn Navbar() -> impl IntoView {
    let menu = RwSignal::new(MenuState::default());
    let path = browser::current_path();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="index.html">"Apprenti"</a>
            <button
                class="navbar__toggle"
                aria-label="Menu"
                on:click=move |_| menu.update(|m| m.toggle())
            >
                "☰"
            </button>
            <ul class=move || {
                if menu.with(|m| m.is_open()) { "navbar__menu active" } else { "navbar__menu" }
            }>
                {NAV_LINKS
                    .iter()
                    .map(|link| {
                        let class = if is_active_link(link.href, &path) {
                            "navbar__link navbar__link--active"
                        } else {
                            "navbar__link"
                        };
                        view! {
                            <li>
                                <a
                                    class=class
                                    href=link.href
                                    on:click=move |_| menu.update(|m| m.close())
                                >
                                    {link.label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
