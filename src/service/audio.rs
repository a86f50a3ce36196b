use crate::models::{Language, SpeechRequest};

/// Lifecycle of one read-aloud control. Audio is synthesized on first
/// activation and reused for every later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioState {
    Idle,
    Synthesizing,
    Playing,
    Paused,
    Ended,
    /// Synthesis failed; nothing cached, the next activation retries.
    Failed(String),
}

/// What the view must do after an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    Synthesize(SpeechRequest),
    Play,
    Pause,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioControl {
    text: String,
    state: AudioState,
}

impl AudioControl {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), state: AudioState::Idle }
    }

    pub fn state(&self) -> &AudioState {
        &self.state
    }

    pub fn has_audio(&self) -> bool {
        matches!(self.state, AudioState::Playing | AudioState::Paused | AudioState::Ended)
    }

    pub fn activate(&mut self, language: Language) -> AudioCommand {
        match self.state {
            AudioState::Synthesizing => AudioCommand::Ignore,
            AudioState::Playing => {
                self.state = AudioState::Paused;
                AudioCommand::Pause
            }
            AudioState::Paused | AudioState::Ended => {
                self.state = AudioState::Playing;
                AudioCommand::Play
            }
            AudioState::Idle | AudioState::Failed(_) => {
                self.state = AudioState::Synthesizing;
                AudioCommand::Synthesize(SpeechRequest::new(self.text.clone(), language))
            }
        }
    }

    /// Audio is bound and playback starts.
    pub fn synthesis_succeeded(&mut self) {
        if self.state == AudioState::Synthesizing {
            self.state = AudioState::Playing;
        }
    }

    pub fn synthesis_failed(&mut self, message: impl Into<String>) {
        self.state = AudioState::Failed(message.into());
    }

    pub fn playback_ended(&mut self) {
        if self.has_audio() {
            self.state = AudioState::Ended;
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            AudioState::Idle => "▶ Écouter la lecture",
            AudioState::Synthesizing => "Génération...",
            AudioState::Playing => "⏸ Pause",
            AudioState::Paused => "▶ Reprendre",
            AudioState::Ended => "▶ Réécouter",
            AudioState::Failed(_) => "▶ Réessayer",
        }
    }

    pub fn status_text(&self) -> String {
        match &self.state {
            AudioState::Synthesizing => "Génération du fichier audio...".to_string(),
            AudioState::Playing => "Lecture en cours...".to_string(),
            AudioState::Failed(message) => format!("Erreur: {message}"),
            _ => String::new(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.state == AudioState::Synthesizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::api::{ApiClient, HttpTransport};
    use crate::config::Endpoints;
    use serde_json::json;

    /// Drives one activation the way the view does.
    async fn press<T: HttpTransport>(control: &mut AudioControl, client: &ApiClient<T>) {
        if let AudioCommand::Synthesize(request) = control.activate(Language::Fr) {
            match client.synthesize(&request).await {
                Ok(_) => control.synthesis_succeeded(),
                Err(e) => control.synthesis_failed(e.user_message()),
            }
        }
    }

    #[tokio::test]
    async fn test_second_activation_toggles_without_request() {
        let client = ApiClient::new(
            FakeTransport::new().respond_bytes(200, "audio/mpeg", b"mp3"),
            Endpoints::from_base("http://api"),
        );
        let mut control = AudioControl::new("Bonjour à tous");

        press(&mut control, &client).await;
        assert_eq!(control.state(), &AudioState::Playing);
        assert_eq!(client.transport().call_count(), 1);
        assert_eq!(client.transport().calls()[0].body.as_ref().unwrap()["text"], "Bonjour à tous");

        press(&mut control, &client).await;
        assert_eq!(control.state(), &AudioState::Paused);
        assert_eq!(control.button_label(), "▶ Reprendre");
        press(&mut control, &client).await;
        assert_eq!(control.state(), &AudioState::Playing);
        assert_eq!(client.transport().call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let client = ApiClient::new(
            FakeTransport::new()
                .respond_json(500, json!({"status": "error", "message": "Clé API OpenAI non configurée"}))
                .respond_bytes(200, "audio/mpeg", b"mp3"),
            Endpoints::from_base("http://api"),
        );
        let mut control = AudioControl::new("texte");

        press(&mut control, &client).await;
        assert_eq!(control.button_label(), "▶ Réessayer");
        assert_eq!(control.status_text(), "Erreur: Clé API OpenAI non configurée");
        assert!(!control.has_audio());

        press(&mut control, &client).await;
        assert_eq!(control.state(), &AudioState::Playing);
        assert_eq!(client.transport().call_count(), 2);
    }

    #[test]
    fn test_end_offers_replay() {
        let mut control = AudioControl::new("texte");
        assert!(matches!(control.activate(Language::En), AudioCommand::Synthesize(_)));
        assert!(control.is_disabled());
        assert_eq!(control.activate(Language::En), AudioCommand::Ignore);

        control.synthesis_succeeded();
        control.playback_ended();
        assert_eq!(control.button_label(), "▶ Réécouter");
        assert_eq!(control.status_text(), "");
        assert_eq!(control.activate(Language::En), AudioCommand::Play);
    }

    #[test]
    fn test_ended_before_audio_is_ignored() {
        let mut control = AudioControl::new("texte");
        control.playback_ended();
        assert_eq!(control.state(), &AudioState::Idle);
    }
}
