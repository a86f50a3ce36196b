use apprenti::models::{Action, Language};
use apprenti::service::chat_session::ChatSession;
use apprenti::service::context_service;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::LocalStore;

/// Assistant page state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AssistantState {
    pub session: RwSignal<ChatSession>,
    pub input: RwSignal<String>,
    pub context_visible: RwSignal<bool>,
}

impl AssistantState {
    /// Create a new `AssistantState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let state = Self {
            session: RwSignal::new(ChatSession::new()),
            input: RwSignal::new(String::new()),
            context_visible: RwSignal::new(false),
        };
        provide_context(state);
        state
    }

    /// Reads the hand-off context and backfills it in the background.
    pub fn load_context(&self) {
        let store = LocalStore::open();
        let Some(context) = context_service::load_context(&store) else {
            return;
        };

        self.session.update(|s| s.begin_context_loading(context.clone()));
        self.context_visible.set(true);

        let session = self.session;
        spawn_local(async move {
            let enriched = context_service::enrich(&api::client(), &store, context).await;
            session.update(|s| s.context_loaded(enriched));
        });
    }

    pub fn set_action(&self, action: Action) {
        self.session.update(|s| s.set_action(action));
    }

    pub fn set_language(&self, language: Language) {
        self.session.update(|s| s.set_language(language));
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(|s| s.is_loading())
    }

    /// Sends the current input; refused while a request is in flight.
    pub fn send_message(&self) {
        let text = self.input.get_untracked();
        let request = match self.session.try_update(|s| s.begin_send(&text)) {
            Some(Ok(request)) => request,
            Some(Err(refusal)) => {
                log::debug!("Send refused: {refusal:?}");
                return;
            }
            None => return,
        };
        self.input.set(String::new());

        let session = self.session;
        spawn_local(async move {
            let outcome = api::client().send_chat(&request).await;
            session.update(|s| s.complete(outcome));
        });
    }
}
