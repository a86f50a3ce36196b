use apprenti::models::{Action, Language};
use apprenti::service::audio::{AudioCommand, AudioControl};
use apprenti::service::chat_session::{EntryKind, TranscriptEntry};
use apprenti::service::context_service::ContextSummary;
use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlAudioElement;

use crate::api;
use crate::audio;
use crate::state::AssistantState;

/// Assistant page: context panel, mode selectors, transcript and input.
#[component]
pub fn AssistantChat() -> impl IntoView {
    let state = AssistantState::provide();
    state.load_context();

    let messages_ref = NodeRef::<Div>::new();

    // Keep the newest entry in view
    Effect::new(move |_| {
        let _ = state.session.with(|s| s.transcript().len());
        Timeout::new(0, move || {
            if let Some(el) = messages_ref.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        })
        .forget();
    });

    view! {
        <div class="assistant">
            <ContextPanel />
            <ActionBar />

            <div class="chat-messages" id="chat-messages" node_ref=messages_ref>
                <For
                    each=move || state.session.with(|s| s.transcript().to_vec())
                    key=|entry| entry.id
                    let:entry
                >
                    <TranscriptItem entry=entry />
                </For>
            </div>

            <Show when=move || state.is_loading()>
                <div class="loading" id="loading">
                    <span class="loading__dot"></span>
                    "L'assistant réfléchit..."
                </div>
            </Show>

            <ChatInput />
        </div>
    }
}

/// Summary of the thematique the session is about.
#[component]
fn ContextPanel() -> impl IntoView {
    let state = expect_context::<AssistantState>();
    let summary = move || state.session.with(|s| s.context().map(ContextSummary::new));

    view! {
        <Show when=move || state.context_visible.get() && summary().is_some()>
            <aside class="context-panel" id="context-panel">
                <div class="context-panel__header">
                    <h3>"Contexte"</h3>
                    <button
                        id="close-context"
                        class="context-panel__close"
                        on:click=move |_| state.context_visible.set(false)
                    >
                        "×"
                    </button>
                </div>
                <Show when=move || state.session.with(|s| s.is_context_loading())>
                    <p class="context-panel__loading">"Chargement des détails..."</p>
                </Show>
                <div class="context-content" id="context-content">
                    {move || {
                        summary().map(|summary| {
                            summary
                                .rows()
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div class="context-item">
                                            <strong class="context-label">{label}</strong>
                                            <p class="context-value">{value.to_string()}</p>
                                        </div>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </div>
            </aside>
        </Show>
    }
}

/// Mode selector, quick actions and (for translate/tts) the language selector.
#[component]
fn ActionBar() -> impl IntoView {
    let state = expect_context::<AssistantState>();
    let action = move || state.session.with(|s| s.action());

    view! {
        <div class="chat-controls">
            <div class="control-group">
                <label for="action-select">"Action"</label>
                <select
                    id="action-select"
                    prop:value=move || action().as_str()
                    on:change=move |ev| {
                        match Action::try_from(event_target_value(&ev).as_str()) {
                            Ok(a) => state.set_action(a),
                            Err(e) => log::warn!("{e}"),
                        }
                    }
                >
                    {Action::ALL
                        .into_iter()
                        .map(|a| view! { <option value=a.as_str()>{a.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || action().shows_language_selector()>
                <div class="control-group" id="language-group">
                    <label for="language-select">"Langue"</label>
                    <select
                        id="language-select"
                        prop:value=move || state.session.with(|s| s.language().code())
                        on:change=move |ev| {
                            match Language::try_from(event_target_value(&ev).as_str()) {
                                Ok(lang) => state.set_language(lang),
                                Err(e) => log::warn!("{e}"),
                            }
                        }
                    >
                        {Language::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.code()>{l.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </Show>

            <div class="quick-actions">
                {Action::ALL
                    .into_iter()
                    .map(|a| {
                        view! {
                            <button
                                class=move || {
                                    if action() == a {
                                        "quick-action quick-action--active"
                                    } else {
                                        "quick-action"
                                    }
                                }
                                data-action=a.as_str()
                                on:click=move |_| state.set_action(a)
                            >
                                {a.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn TranscriptItem(entry: TranscriptEntry) -> impl IntoView {
    let class = entry.css_class();
    let avatar = match entry.kind {
        EntryKind::User => "👤",
        EntryKind::Error => "⚠️",
        EntryKind::Assistant | EntryKind::AudioPlayer => "🤖",
    };

    if entry.kind == EntryKind::AudioPlayer {
        view! {
            <div class=class>
                <div class="message__avatar">{avatar}</div>
                <div class="message__content audio-content">
                    <AudioPlayer text=entry.content />
                </div>
            </div>
        }
        .into_any()
    } else {
        view! {
            <div class=class>
                <div class="message__avatar">{avatar}</div>
                <div class="message__content">
                    <p inner_html=entry.content_html()></p>
                </div>
            </div>
        }
        .into_any()
    }
}

/// Read-aloud control. Audio is synthesized on first press and then
/// reused: later presses only toggle playback.
#[component]
fn AudioPlayer(text: String) -> impl IntoView {
    let state = expect_context::<AssistantState>();
    let control = RwSignal::new(AudioControl::new(text));
    let bound = StoredValue::new_local(None::<HtmlAudioElement>);

    let on_click = move |_| {
        let language = state.session.with_untracked(|s| s.language());
        let Some(command) = control.try_update(|c| c.activate(language)) else {
            return;
        };

        match command {
            AudioCommand::Synthesize(request) => spawn_local(async move {
                let bound_clip = api::client().synthesize(&request).await.and_then(|clip| {
                    audio::bind_clip(&clip, move || control.update(|c| c.playback_ended()))
                });
                match bound_clip {
                    Ok(element) => {
                        audio::play(&element);
                        bound.set_value(Some(element));
                        control.update(|c| c.synthesis_succeeded());
                    }
                    Err(e) => {
                        log::error!("Erreur TTS: {e}");
                        control.update(|c| c.synthesis_failed(e.user_message()));
                    }
                }
            }),
            AudioCommand::Play => bound.with_value(|el| {
                if let Some(el) = el {
                    audio::play(el);
                }
            }),
            AudioCommand::Pause => bound.with_value(|el| {
                if let Some(el) = el {
                    audio::pause(el);
                }
            }),
            AudioCommand::Ignore => {}
        }
    };

    view! {
        <div class="audio-player">
            <button
                class="audio-play-btn"
                on:click=on_click
                disabled=move || control.with(|c| c.is_disabled())
            >
                {move || control.with(|c| c.button_label())}
            </button>
            <span class="audio-status">{move || control.with(|c| c.status_text())}</span>
        </div>
    }
}

/// Message input with send button (Ctrl+Enter to send).
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AssistantState>();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.ctrl_key() && ev.key() == "Enter" {
            ev.prevent_default();
            state.send_message();
        }
    };

    view! {
        <div class="chat-input">
            <textarea
                id="user-input"
                rows="3"
                placeholder=move || state.session.with(|s| s.action().placeholder())
                prop:value=move || state.input.get()
                on:input=move |ev| state.input.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button
                id="send-btn"
                class="send-btn"
                on:click=move |_| state.send_message()
                disabled=move || state.is_loading()
            >
                "Envoyer"
            </button>
        </div>
    }
}
