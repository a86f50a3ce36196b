use apprenti::api::{ApiClient, CachePolicy, HttpResponse, HttpTransport};
use apprenti::catalog::ThematiqueRepository;
use apprenti::config::AppConfig;
use apprenti::errors::AppError;
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use web_sys::RequestCache;

/// `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        cache: CachePolicy,
    ) -> Result<HttpResponse, AppError> {
        let mut builder = Request::get(url).query(query.iter().copied());
        if cache == CachePolicy::Bypass {
            builder = builder.cache(RequestCache::NoCache);
        }
        let resp = builder
            .send()
            .await
            .map_err(|e| AppError::transport(url, e))?;
        read_response(url, resp).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, AppError> {
        let resp = Request::post(url)
            .json(body)
            .map_err(|e| AppError::Unexpected(format!("Serialize error: {e}")))?
            .send()
            .await
            .map_err(|e| AppError::transport(url, e))?;
        read_response(url, resp).await
    }
}

async fn read_response(url: &str, resp: Response) -> Result<HttpResponse, AppError> {
    let status = resp.status();
    let content_type = resp.headers().get("content-type");
    let body = resp
        .binary()
        .await
        .map_err(|e| AppError::transport(url, format!("Body read error: {e}")))?;
    Ok(HttpResponse { status, content_type, body })
}

pub fn config() -> AppConfig {
    AppConfig::from_build_env()
}

pub fn client() -> ApiClient<GlooTransport> {
    ApiClient::new(GlooTransport, config().endpoints)
}

pub fn repository() -> ThematiqueRepository<GlooTransport> {
    ThematiqueRepository::new(GlooTransport, config().catalog)
}
