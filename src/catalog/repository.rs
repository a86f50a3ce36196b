use tracing::{error, warn};

use crate::api::{CachePolicy, HttpResponse, HttpTransport};
use crate::catalog::fallback;
use crate::config::{CatalogSource, SourceKind};
use crate::errors::AppError;
use crate::models::Thematique;
use crate::schema::Envelope;

/// Loads the catalog from the configured source.
#[derive(Debug, Clone)]
pub struct ThematiqueRepository<T> {
    transport: T,
    source: CatalogSource,
}

impl<T: HttpTransport> ThematiqueRepository<T> {
    pub fn new(transport: T, source: CatalogSource) -> Self {
        Self { transport, source }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and normalizes the catalog. Without a URL, or with the
    /// `fallback` kind, the built-in list is returned without any request.
    pub async fn load(&self) -> Result<Vec<Thematique>, AppError> {
        let Some(url) = self.source.url.as_deref() else {
            return Ok(fallback::thematiques());
        };

        match self.source.kind {
            SourceKind::Api => self.fetch_api(url).await,
            SourceKind::Json => self.fetch_json(url).await,
            SourceKind::Fallback => Ok(fallback::thematiques()),
        }
    }

    /// Never fails: any load error is logged and replaced by the built-in list.
    pub async fn load_or_fallback(&self) -> Vec<Thematique> {
        match self.load().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Falling back to the built-in catalog after a load error: {e}");
                fallback::thematiques()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse, AppError> {
        let resp = self.transport.get(url, &[], CachePolicy::Bypass).await?;
        if !resp.ok() {
            return Err(AppError::HttpStatus { url: url.to_string(), status: resp.status });
        }
        Ok(resp)
    }

    async fn fetch_api(&self, url: &str) -> Result<Vec<Thematique>, AppError> {
        let resp = self.fetch(url).await.inspect_err(|e| {
            error!("Catalog API request failed: {e}");
        })?;

        match Envelope::<Vec<Thematique>>::parse(&resp.body, "data") {
            Envelope::Success(items) => {
                Ok(items.into_iter().map(Thematique::with_defaults).collect())
            }
            Envelope::Rejected { status, message } => {
                error!("Catalog API answered '{status}': {message}");
                Err(AppError::malformed("catalog", format!("status '{status}': {message}")))
            }
            Envelope::Malformed(reason) => {
                error!("Catalog API payload rejected: {reason}");
                Err(AppError::malformed("catalog", reason))
            }
        }
    }

    async fn fetch_json(&self, url: &str) -> Result<Vec<Thematique>, AppError> {
        let resp = self.fetch(url).await?;
        serde_json::from_slice::<Vec<Thematique>>(&resp.body)
            .map_err(|e| AppError::malformed("catalog json", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::models::{DEFAULT_DOMAIN, DEFAULT_LEVEL};
    use serde_json::json;

    fn api_source() -> CatalogSource {
        CatalogSource { kind: SourceKind::Api, url: Some("http://api/api/thematiques".into()) }
    }

    #[tokio::test]
    async fn test_api_applies_defaults() {
        let transport = FakeTransport::new().respond_json(
            200,
            json!({"status": "success", "data": [
                {"id": "x", "titre": "T", "description": "D"},
                {"id": "y", "titre": "U", "description": "E", "niveau": "Avancé", "domaine": "Qualité",
                 "keywords": ["tests"]}
            ]}),
        );
        let repo = ThematiqueRepository::new(transport, api_source());
        let items = repo.load().await.unwrap();

        assert_eq!(items[0].level.as_deref(), Some(DEFAULT_LEVEL));
        assert_eq!(items[0].domain.as_deref(), Some(DEFAULT_DOMAIN));
        assert_eq!(items[1].level.as_deref(), Some("Avancé"));
        assert_eq!(items[1].keywords(), ["tests".to_string()]);

        let calls = repo.transport().calls();
        assert_eq!(calls[0].cache, CachePolicy::Bypass);
        assert_eq!(calls[0].url, "http://api/api/thematiques");
    }

    #[tokio::test]
    async fn test_json_preserves_absence() {
        let transport =
            FakeTransport::new().respond_json(200, json!([{"id": "x", "titre": "T"}]));
        let source = CatalogSource { kind: SourceKind::Json, url: Some("/t.json".into()) };
        let items = ThematiqueRepository::new(transport, source).load().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].level, None);
        assert_eq!(items[0].domain, None);
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_error() {
        let transport = FakeTransport::new()
            .respond_json(200, json!({"status": "error", "message": "OpenAlex down"}))
            .respond_json(200, json!({"status": "success", "data": "nope"}));
        let repo = ThematiqueRepository::new(transport, api_source());

        assert!(repo.load().await.unwrap_err().is_malformed());
        assert!(repo.load().await.unwrap_err().is_malformed());
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_builtin_list() {
        let transport = FakeTransport::new()
            .respond_json(503, json!({"status": "error"}))
            .fail("connection refused");
        let repo = ThematiqueRepository::new(transport, api_source());

        assert!(!repo.load_or_fallback().await.is_empty());
        assert_eq!(repo.load_or_fallback().await, fallback::thematiques());
    }

    #[tokio::test]
    async fn test_no_url_uses_fallback_without_request() {
        let repo = ThematiqueRepository::new(FakeTransport::new(), CatalogSource::fallback());
        assert_eq!(repo.load().await.unwrap().len(), 6);
        assert_eq!(repo.transport().call_count(), 0);
    }
}
