use tracing::{debug, error};

use crate::errors::AppError;
use crate::handoff::{KeyValueStore, IA_CONTEXT, SELECTED_THEMATIQUE};
use crate::models::{field_or, AssistantContext, Thematique, DEFAULT_DOMAIN, DEFAULT_LEVEL};
use crate::navigation::Page;

pub const BADGE_BASE_CLASS: &str = "detail-meta__niveau";

/// What the detail page does on load.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLoad {
    /// No usable selection: leave for the given page.
    Redirect(Page),
    Show(DetailView),
}

/// Consumes the selected entry. A second load without a new selection
/// redirects home, as does an unreadable record.
pub fn load(store: &impl KeyValueStore) -> DetailLoad {
    match SELECTED_THEMATIQUE.take(store) {
        Ok(Some(thematique)) => DetailLoad::Show(DetailView::new(thematique)),
        Ok(None) => {
            debug!("No selected thematique, back to the home page");
            DetailLoad::Redirect(Page::Home)
        }
        Err(e) => {
            error!("Erreur lors de la lecture des données: {e}");
            DetailLoad::Redirect(Page::Home)
        }
    }
}

/// Display strings for one entry, fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    thematique: Thematique,
    pub title: String,
    pub header_level: String,
    pub description: String,
    pub domain: String,
    pub badge_text: String,
    pub badge_class: String,
    pub id: String,
    pub keywords: Vec<String>,
    pub document_title: String,
}

impl DetailView {
    pub fn new(thematique: Thematique) -> Self {
        let t = &thematique;
        let badge_class = format!(
            "{BADGE_BASE_CLASS} {BADGE_BASE_CLASS}--{}",
            t.level().badge_modifier()
        );
        let id = if t.id.is_empty() { "ID non disponible" } else { t.id.as_str() };

        Self {
            title: field_or(&t.title, "Thématique sans titre").to_string(),
            header_level: field_or(&t.level, "Niveau non spécifié").to_string(),
            description: field_or(&t.description, "Aucune description disponible.").to_string(),
            domain: field_or(&t.domain, DEFAULT_DOMAIN).to_string(),
            badge_text: field_or(&t.level, DEFAULT_LEVEL).to_string(),
            badge_class,
            id: id.to_string(),
            keywords: t.keywords().to_vec(),
            document_title: format!("{} - Apprenti", field_or(&t.title, "Détail")),
            thematique,
        }
    }

    pub fn thematique(&self) -> &Thematique {
        &self.thematique
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// "Ask AI": stores the entry as assistant context and returns where to go.
    pub fn ask_assistant(&self, store: &impl KeyValueStore) -> Result<Page, AppError> {
        IA_CONTEXT.put(store, &AssistantContext::Thematique(self.thematique.clone()))?;
        Ok(Page::Assistant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::catalog::{self, ThematiqueRepository};
    use crate::config::{CatalogSource, SourceKind};
    use crate::handoff::MemoryStore;
    use serde_json::json;

    fn show(load: DetailLoad) -> DetailView {
        match load {
            DetailLoad::Show(view) => view,
            other => panic!("expected a view, got {other:?}"),
        }
    }

    #[test]
    fn test_no_selection_redirects_home() {
        assert_eq!(load(&MemoryStore::new()), DetailLoad::Redirect(Page::Home));
    }

    #[test]
    fn test_unparsable_selection_redirects_home() {
        let store = MemoryStore::new();
        store.set("selectedThematique", "undefined").unwrap();
        assert_eq!(load(&store), DetailLoad::Redirect(Page::Home));
    }

    #[test]
    fn test_fallback_strings_and_one_time_consumption() {
        let store = MemoryStore::new();
        SELECTED_THEMATIQUE
            .put(&store, &Thematique { id: "x".into(), ..Default::default() })
            .unwrap();

        let view = show(load(&store));
        assert_eq!(view.title, "Thématique sans titre");
        assert_eq!(view.header_level, "Niveau non spécifié");
        assert_eq!(view.description, "Aucune description disponible.");
        assert_eq!(view.domain, "Général");
        assert_eq!(view.badge_text, "Intermédiaire");
        assert_eq!(view.badge_class, "detail-meta__niveau detail-meta__niveau--intermediate");
        assert_eq!(view.document_title, "Détail - Apprenti");
        assert!(!view.has_keywords());
        assert!(store.keys().is_empty());

        assert_eq!(load(&store), DetailLoad::Redirect(Page::Home));
    }

    #[tokio::test]
    async fn test_api_card_opens_with_default_level_and_domain() {
        let transport = FakeTransport::new().respond_json(
            200,
            json!({"status": "success", "data": [{"id": "x", "titre": "T", "description": "D"}]}),
        );
        let source = CatalogSource { kind: SourceKind::Api, url: Some("http://api/api/thematiques".into()) };
        let items = ThematiqueRepository::new(transport, source).load_or_fallback().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("T"));

        let store = MemoryStore::new();
        assert_eq!(catalog::select(&store, &items[0]).unwrap(), Page::Detail);

        let view = show(load(&store));
        assert_eq!(view.title, "T");
        assert_eq!(view.header_level, "Intermédiaire");
        assert_eq!(view.badge_text, "Intermédiaire");
        assert_eq!(view.domain, "Général");
    }

    #[test]
    fn test_selection_kept_until_loaded() {
        let store = MemoryStore::new();
        let entry = Thematique::new("x", "T", "D", "Avancé", "Qualité");
        catalog::select(&store, &entry).unwrap();

        assert_eq!(SELECTED_THEMATIQUE.read(&store).unwrap(), Some(entry.clone()));
        assert_eq!(show(load(&store)).thematique(), &entry);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_badge_classes() {
        let beginner = DetailView::new(Thematique::new("a", "A", "d", "Débutant", "g"));
        let advanced = DetailView::new(Thematique::new("b", "B", "d", "Avancé", "g"));
        assert!(beginner.badge_class.ends_with("--beginner"));
        assert!(advanced.badge_class.ends_with("--advanced"));
        assert_eq!(advanced.document_title, "B - Apprenti");
    }

    #[test]
    fn test_ask_assistant_writes_context() {
        let store = MemoryStore::new();
        let mut t = Thematique::new("oop-tdd", "Tests", "Isoler", "Intermédiaire", "Qualité");
        t.keywords = Some(vec!["mock".into()]);
        let view = DetailView::new(t.clone());
        assert_eq!(view.keywords, vec!["mock".to_string()]);

        assert_eq!(view.ask_assistant(&store).unwrap(), Page::Assistant);
        assert_eq!(
            IA_CONTEXT.read(&store).unwrap(),
            Some(AssistantContext::Thematique(t))
        );
    }
}
