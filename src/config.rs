use std::str::FromStr;

use tracing::warn;

/// Base URL of the backend API server.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Where the catalog comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// `{status, data: [...]}` envelope, defaults applied.
    #[default]
    Api,
    /// Bare JSON array, mapped as-is.
    Json,
    /// Built-in list, no network.
    Fallback,
}

impl FromStr for SourceKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(SourceKind::Api),
            "json" => Ok(SourceKind::Json),
            "fallback" | "" => Ok(SourceKind::Fallback),
            other => Err(format!("Unknown catalog source: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub kind: SourceKind,
    pub url: Option<String>,
}

impl CatalogSource {
    pub fn fallback() -> Self {
        Self { kind: SourceKind::Fallback, url: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub catalog: String,
    pub detail: String,
    pub assistant: String,
    pub tts: String,
}

impl Endpoints {
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            catalog: format!("{base}/api/thematiques"),
            detail: format!("{base}/api/thematiques/detail"),
            assistant: format!("{base}/api/assistant"),
            tts: format!("{base}/api/tts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: CatalogSource,
    pub endpoints: Endpoints,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl AppConfig {
    /// Reads the overrides baked in at build time; a browser has no runtime env.
    pub fn from_build_env() -> Self {
        Self::resolve(
            option_env!("APPRENTI_API_BASE"),
            option_env!("APPRENTI_CATALOG_SOURCE"),
            option_env!("APPRENTI_CATALOG_URL"),
        )
    }

    pub fn resolve(
        api_base: Option<&str>,
        catalog_kind: Option<&str>,
        catalog_url: Option<&str>,
    ) -> Self {
        let api_base = api_base.filter(|b| !b.trim().is_empty()).unwrap_or(DEFAULT_API_BASE);
        let endpoints = Endpoints::from_base(api_base);

        let kind = match catalog_kind.map(SourceKind::from_str) {
            None => SourceKind::Api,
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                warn!("{e}; using the built-in catalog");
                SourceKind::Fallback
            }
        };
        let catalog_url = catalog_url.filter(|u| !u.trim().is_empty());
        let url = match kind {
            SourceKind::Fallback => None,
            SourceKind::Api => Some(catalog_url.unwrap_or(endpoints.catalog.as_str()).to_string()),
            SourceKind::Json => catalog_url.map(str::to_string),
        };

        Self { catalog: CatalogSource { kind, url }, endpoints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_api() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.kind, SourceKind::Api);
        assert_eq!(config.catalog.url.as_deref(), Some("http://localhost:5000/api/thematiques"));
        assert_eq!(config.endpoints.tts, "http://localhost:5000/api/tts");
        assert_eq!(config.endpoints.detail, "http://localhost:5000/api/thematiques/detail");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::resolve(
            Some("https://apprenti.example/"),
            Some("json"),
            Some("/data/thematiques.json"),
        );
        assert_eq!(config.endpoints.assistant, "https://apprenti.example/api/assistant");
        assert_eq!(config.catalog.kind, SourceKind::Json);
        assert_eq!(config.catalog.url.as_deref(), Some("/data/thematiques.json"));
    }

    #[test]
    fn test_json_without_url_and_unknown_kind() {
        let config = AppConfig::resolve(None, Some("json"), None);
        assert_eq!(config.catalog.url, None);

        let config = AppConfig::resolve(None, Some("ftp"), Some("x"));
        assert_eq!(config.catalog, CatalogSource::fallback());
    }

    #[test]
    fn test_blank_catalog_url_is_ignored() {
        let config = AppConfig::resolve(None, Some("api"), Some("  "));
        assert_eq!(config.catalog.url.as_deref(), Some("http://localhost:5000/api/thematiques"));

        let config = AppConfig::resolve(None, Some("json"), Some(""));
        assert_eq!(config.catalog.url, None);
    }
}
