use tracing::{debug, error};

use crate::api::{ApiClient, HttpTransport};
use crate::handoff::{KeyValueStore, IA_CONTEXT};
use crate::models::{field_or, AssistantContext, Thematique, DEFAULT_DOMAIN, DEFAULT_LEVEL};

/// Descriptions shorter than this (trimmed) are backfilled from the detail endpoint.
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Reads the stored assistant context; an unreadable record counts as none.
pub fn load_context(store: &impl KeyValueStore) -> Option<AssistantContext> {
    match IA_CONTEXT.read(store) {
        Ok(context) => context,
        Err(e) => {
            error!("Erreur lors du chargement du contexte: {e}");
            None
        }
    }
}

pub fn needs_backfill(thematique: &Thematique) -> bool {
    if thematique.id.is_empty() {
        return false;
    }
    let description = thematique.description.as_deref().unwrap_or_default().trim();
    description.chars().count() < MIN_DESCRIPTION_CHARS
}

/// Fills a thin context from the detail endpoint and persists the merged
/// record. A failed lookup is logged and the context returned unchanged.
pub async fn enrich<T: HttpTransport>(
    client: &ApiClient<T>,
    store: &impl KeyValueStore,
    mut context: AssistantContext,
) -> AssistantContext {
    if !needs_backfill(context.thematique()) {
        return context;
    }

    let id = context.thematique().id.clone();
    debug!("Backfilling thematique {id}");
    match client.fetch_detail(&id).await {
        Ok(detail) => {
            context.thematique_mut().merge_detail(detail);
            if let Err(e) = IA_CONTEXT.put(store, &context) {
                error!("Failed to persist enriched context for {id}: {e}");
            }
        }
        Err(e) => error!("Erreur lors du chargement de la thématique {id}: {e}"),
    }
    context
}

/// Text shown in the assistant's context panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
    pub title: String,
    pub domain: String,
    pub level: String,
    pub description: String,
}

impl ContextSummary {
    pub fn new(context: &AssistantContext) -> Self {
        let t = context.thematique();
        Self {
            title: field_or(&t.title, "N/A").to_string(),
            domain: field_or(&t.domain, DEFAULT_DOMAIN).to_string(),
            level: field_or(&t.level, DEFAULT_LEVEL).to_string(),
            description: field_or(&t.description, "Aucune description disponible").to_string(),
        }
    }

    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Thématique:", self.title.as_str()),
            ("Domaine:", self.domain.as_str()),
            ("Niveau:", self.level.as_str()),
            ("Description:", self.description.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::config::Endpoints;
    use crate::handoff::MemoryStore;
    use serde_json::json;

    fn context(description: &str) -> AssistantContext {
        AssistantContext::Thematique(Thematique::new("T10", "Topic", description, "Avancé", "Sciences"))
    }

    #[test]
    fn test_needs_backfill_threshold() {
        assert!(needs_backfill(context("  court   ").thematique()));
        assert!(!needs_backfill(context("dix chars!").thematique()));
        let no_id = Thematique { description: Some(String::new()), ..Default::default() };
        assert!(!needs_backfill(&no_id));
    }

    #[tokio::test]
    async fn test_enrich_merges_and_persists() {
        let client = ApiClient::new(
            FakeTransport::new().respond_json(
                200,
                json!({"status": "success", "data": {"description": "Une description complète", "domaine": ""}}),
            ),
            Endpoints::from_base("http://api"),
        );
        let store = MemoryStore::new();

        let enriched = enrich(&client, &store, context("")).await;
        assert_eq!(enriched.thematique().description.as_deref(), Some("Une description complète"));
        assert_eq!(enriched.thematique().domain.as_deref(), Some("Sciences"));
        assert_eq!(load_context(&store), Some(enriched));
    }

    #[tokio::test]
    async fn test_enrich_failure_keeps_context_and_storage() {
        let client = ApiClient::new(
            FakeTransport::new().respond_json(404, json!({"status": "error"})),
            Endpoints::from_base("http://api"),
        );
        let store = MemoryStore::new();

        let ctx = context("");
        assert_eq!(enrich(&client, &store, ctx.clone()).await, ctx);
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_long_description_skips_lookup() {
        let client = ApiClient::new(FakeTransport::new(), Endpoints::from_base("http://api"));
        let store = MemoryStore::new();
        enrich(&client, &store, context("Une description suffisante")).await;
        assert_eq!(client.transport().call_count(), 0);
    }

    #[test]
    fn test_summary_fallbacks() {
        let ctx = AssistantContext::Thematique(Thematique { id: "x".into(), ..Default::default() });
        let summary = ContextSummary::new(&ctx);
        assert_eq!(summary.title, "N/A");
        assert_eq!(summary.rows()[3], ("Description:", "Aucune description disponible"));
    }
}
