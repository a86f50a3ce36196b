use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Level applied by the api source when an item has none.
pub const DEFAULT_LEVEL: &str = "Intermédiaire";
/// Domain applied by the api source when an item has none.
pub const DEFAULT_DOMAIN: &str = "Général";
/// Voice requested from the speech synthesis endpoint.
pub const DEFAULT_VOICE: &str = "nova";

/// A learning topic ("thématique") as exchanged with the catalog API and
/// stored in the page handoff slots. Wire names are the French ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thematique {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "titre", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "niveau", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(rename = "domaine", default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Thematique {
    pub fn new(id: &str, title: &str, description: &str, level: &str, domain: &str) -> Self {
        Self {
            id: id.to_string(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            level: Some(level.to_string()),
            domain: Some(domain.to_string()),
            keywords: None,
        }
    }

    /// Fills an absent or empty level/domain with the catalog defaults.
    pub fn with_defaults(mut self) -> Self {
        if present(&self.level).is_none() {
            self.level = Some(DEFAULT_LEVEL.to_string());
        }
        if present(&self.domain).is_none() {
            self.domain = Some(DEFAULT_DOMAIN.to_string());
        }
        self
    }

    pub fn level(&self) -> Level {
        Level::from_label(self.level.as_deref())
    }

    /// Keywords, empty when the source gave none.
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Overlays the fields of a detail lookup. Values that are absent, null
    /// or blank never replace what is already there.
    pub fn merge_detail(&mut self, detail: ThematiqueDetail) {
        if let Some(id) = detail.id.filter(|v| !v.trim().is_empty()) {
            self.id = id;
        }
        overlay(&mut self.title, detail.title);
        overlay(&mut self.description, detail.description);
        overlay(&mut self.level, detail.level);
        overlay(&mut self.domain, detail.domain);
        if let Some(keywords) = detail.keywords.filter(|k| !k.is_empty()) {
            self.keywords = Some(keywords);
        }
    }
}

fn overlay(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *target = Some(value);
    }
}

/// Returns the value unless it is absent or empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Display helper: the value, or `fallback` when absent or empty.
pub fn field_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    present(value).unwrap_or(fallback)
}

/// Partial record returned by the detail lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThematiqueDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "titre", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "niveau", default)]
    pub level: Option<String>,
    #[serde(rename = "domaine", default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Level {
    /// Exact, case-sensitive match on the French labels.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Débutant") => Level::Beginner,
            Some("Intermédiaire") => Level::Intermediate,
            Some("Avancé") => Level::Advanced,
            Some(other) => Level::Other(other.to_string()),
            None => Level::Other(String::new()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Level::Beginner => "Débutant",
            Level::Intermediate => "Intermédiaire",
            Level::Advanced => "Avancé",
            Level::Other(label) => label,
        }
    }

    /// Visual category: anything unrecognised is shown as intermediate.
    pub fn badge_modifier(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Advanced => "advanced",
            Level::Intermediate | Level::Other(_) => "intermediate",
        }
    }
}

/// Record handed from the detail page to the assistant page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum AssistantContext {
    Thematique(Thematique),
}

impl AssistantContext {
    pub fn thematique(&self) -> &Thematique {
        match self {
            AssistantContext::Thematique(t) => t,
        }
    }

    pub fn thematique_mut(&mut self) -> &mut Thematique {
        match self {
            AssistantContext::Thematique(t) => t,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Chat,
    Explain,
    Translate,
    Tts,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Chat, Action::Explain, Action::Translate, Action::Tts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Chat => "chat",
            Action::Explain => "explain",
            Action::Translate => "translate",
            Action::Tts => "tts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Chat => "Discuter",
            Action::Explain => "Expliquer",
            Action::Translate => "Traduire",
            Action::Tts => "Lire à voix haute",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Action::Chat => "Posez votre question...",
            Action::Explain => "Collez le texte à expliquer...",
            Action::Translate => "Collez le texte à traduire...",
            Action::Tts => "Collez le texte à lire...",
        }
    }

    pub fn shows_language_selector(&self) -> bool {
        matches!(self, Action::Translate | Action::Tts)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "chat" => Ok(Action::Chat),
            "explain" => Ok(Action::Explain),
            "translate" => Ok(Action::Translate),
            "tts" => Ok(Action::Tts),
            other => Err(format!("Unknown action: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Es,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Fr, Language::En, Language::Es, Language::De];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
            Language::Es => "Español",
            Language::De => "Deutsch",
        }
    }
}

impl TryFrom<&str> for Language {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| format!("Unknown language: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One completed turn half, kept in the in-memory history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub action: Action,
}

/// Request body for the assistant endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantRequest {
    pub message: String,
    pub action: Action,
    pub language: Language,
    #[serde(serialize_with = "context_or_empty")]
    pub context: Option<AssistantContext>,
}

/// The assistant endpoint expects `{}` when there is no context.
fn context_or_empty<S: Serializer>(
    context: &Option<AssistantContext>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match context {
        Some(ctx) => ctx.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Request body for the speech synthesis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub language: Language,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self { text: text.into(), voice: DEFAULT_VOICE.to_string(), language }
    }
}

/// Synthesized audio as returned by the speech endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
