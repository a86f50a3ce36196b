use std::mem;

use tracing::{error, warn};

use crate::errors::AppError;
use crate::html::escape_html;
use crate::models::{
    Action, AssistantContext, AssistantRequest, ChatMessage, ChatRole, Language,
};

/// The one request a session may have in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub message: String,
    pub action: Action,
}

/// Request phase. There is no cancellation and no timeout: once in
/// `AwaitingResponse`, only [`ChatSession::complete`] leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse(PendingTurn),
}

/// Context sub-state, independent of [`Phase`]. A send while `Loading`
/// goes out with the context as it was before enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContextState {
    #[default]
    Absent,
    Loading(AssistantContext),
    Ready(AssistantContext),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRefusal {
    EmptyInput,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Assistant,
    Error,
    /// Read-aloud control bound to the entry's text.
    AudioPlayer,
}

/// One visible transcript item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: usize,
    pub kind: EntryKind,
    pub content: String,
}

impl TranscriptEntry {
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            EntryKind::User => "message message--user",
            EntryKind::Assistant => "message message--ai",
            EntryKind::Error => "message message--error",
            EntryKind::AudioPlayer => "message message--ai audio-controls",
        }
    }

    /// Content as inert markup.
    pub fn content_html(&self) -> String {
        escape_html(&self.content)
    }
}

pub fn transport_failure_message(err: &AppError) -> String {
    format!(
        "Erreur de communication: {err}. Assurez-vous que le backend fonctionne et que votre clé API OpenAI est configurée."
    )
}

/// State of the assistant page's single chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    action: Action,
    language: Language,
    phase: Phase,
    context: ContextState,
    history: Vec<ChatMessage>,
    transcript: Vec<TranscriptEntry>,
    next_entry_id: usize,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Changes mode only; history and any in-flight request are untouched.
    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::AwaitingResponse(_))
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The context sent with requests, enriched or not.
    pub fn context(&self) -> Option<&AssistantContext> {
        match &self.context {
            ContextState::Absent => None,
            ContextState::Loading(ctx) | ContextState::Ready(ctx) => Some(ctx),
        }
    }

    pub fn is_context_loading(&self) -> bool {
        matches!(self.context, ContextState::Loading(_))
    }

    pub fn begin_context_loading(&mut self, context: AssistantContext) {
        self.context = ContextState::Loading(context);
    }

    pub fn context_loaded(&mut self, context: AssistantContext) {
        self.context = ContextState::Ready(context);
    }

    /// `Idle → AwaitingResponse`. Appends the user entry and returns the
    /// request to send; refused for blank input or while a request is out.
    pub fn begin_send(&mut self, input: &str) -> Result<AssistantRequest, SendRefusal> {
        let message = input.trim();
        if message.is_empty() {
            return Err(SendRefusal::EmptyInput);
        }
        if self.is_loading() {
            return Err(SendRefusal::Busy);
        }

        self.push(EntryKind::User, message.to_string());
        self.phase = Phase::AwaitingResponse(PendingTurn {
            message: message.to_string(),
            action: self.action,
        });

        Ok(AssistantRequest {
            message: message.to_string(),
            action: self.action,
            language: self.language,
            context: self.context().cloned(),
        })
    }

    /// `AwaitingResponse → Idle`, whatever the outcome.
    pub fn complete(&mut self, outcome: Result<String, AppError>) {
        let Phase::AwaitingResponse(turn) = mem::take(&mut self.phase) else {
            warn!("Response received with no request in flight; ignored");
            return;
        };

        match outcome {
            Ok(reply) => {
                self.push(EntryKind::Assistant, reply.clone());
                if turn.action == Action::Tts {
                    self.push(EntryKind::AudioPlayer, reply.clone());
                }
                self.history.push(ChatMessage {
                    role: ChatRole::User,
                    content: turn.message,
                    action: turn.action,
                });
                self.history.push(ChatMessage {
                    role: ChatRole::Assistant,
                    content: reply,
                    action: turn.action,
                });
            }
            Err(AppError::Rejected { message }) => {
                self.push(EntryKind::Error, format!("Erreur: {message}"));
            }
            Err(e) => {
                error!("Erreur: {e}");
                self.push(EntryKind::Error, transport_failure_message(&e));
            }
        }
    }

    fn push(&mut self, kind: EntryKind, content: String) {
        self.transcript.push(TranscriptEntry { id: self.next_entry_id, kind, content });
        self.next_entry_id += 1;
    }
}
