use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use factbot_core::ExtractionError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::infobox::first_infobox_text;
use crate::normalize::RawText;
use crate::retry::retry_with_backoff;
use crate::ReferenceSource;

/// Wikipedia retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WikipediaConfig {
    /// `MediaWiki` action API endpoint
    #[serde(default = "WikipediaConfig::default_endpoint")]
    pub endpoint: String,

    /// Request timeout (seconds)
    #[serde(default = "WikipediaConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "WikipediaConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "WikipediaConfig::default_max_size")]
    pub max_size: usize,

    /// Delays (seconds) before each retry of a failed request
    #[serde(default = "WikipediaConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
}

impl WikipediaConfig {
    fn default_endpoint() -> String {
        "https://en.wikipedia.org/w/api.php".to_string()
    }

    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        format!("factbot/{} (command-line fact lookup)", env!("CARGO_PKG_VERSION"))
    }

    const fn default_max_size() -> usize {
        2_000_000 // 2MB
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![1, 2]
    }

    fn retry_durations(&self) -> Vec<Duration> {
        self.retry_delays
            .iter()
            .map(|secs| Duration::from_secs(*secs))
            .collect()
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
            retry_delays: Self::default_retry_delays(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParsedPage>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    properties: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

/// Reference source backed by the Wikipedia action API.
///
/// The entity name is searched first and the top hit's rendered page is
/// reduced to the text of its first infobox.
pub struct WikipediaSource {
    client: Client,
    endpoint: Url,
    config: WikipediaConfig,
}

impl WikipediaSource {
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid Wikipedia endpoint: {}", config.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("Only http and https endpoints are supported");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &WikipediaConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ExtractionError> {
        let url = Url::parse_with_params(self.endpoint.as_str(), params)
            .map_err(|e| ExtractionError::Retrieval(format!("Invalid URL: {e}")))?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ExtractionError::Retrieval(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractionError::Retrieval(format!("Failed to read response: {e}")))?;
        let body = checked_body(status, &bytes, self.config.max_size)?;

        serde_json::from_slice(body)
            .map_err(|e| ExtractionError::MalformedSource(format!("Unexpected API response: {e}")))
    }

    async fn search_title(&self, entity: &str) -> Result<String, ExtractionError> {
        let response: SearchResponse = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", entity),
                ("srlimit", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;
        top_search_title(response).ok_or_else(|| ExtractionError::EntityNotFound {
            entity: entity.to_string(),
        })
    }

    async fn page_html(&self, title: &str, entity: &str) -> Result<String, ExtractionError> {
        let response: ParseResponse = self
            .get_json(&[
                ("action", "parse"),
                ("page", title),
                ("prop", "text|properties"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;
        parsed_page_html(response, entity)
    }
}

#[async_trait]
impl ReferenceSource for WikipediaSource {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn fetch_reference_text(&self, entity: &str) -> Result<RawText, ExtractionError> {
        let entity = entity.trim();
        if entity.is_empty() {
            return Err(ExtractionError::MissingEntity);
        }

        let delays = self.config.retry_durations();
        let title = retry_with_backoff(|| self.search_title(entity), &delays).await?;
        info!("Resolved '{entity}' to page '{title}'");

        let html = retry_with_backoff(|| self.page_html(&title, entity), &delays).await?;
        let text = first_infobox_text(&html)
            .ok_or_else(|| ExtractionError::MalformedSource("Page has no infobox".to_string()))?;
        debug!("Infobox for '{title}' has {} chars", text.len());

        Ok(RawText::from(text))
    }
}

/// Non-success statuses and oversized bodies are transient retrieval failures.
fn checked_body(status: StatusCode, body: &[u8], max_size: usize) -> Result<&[u8], ExtractionError> {
    if !status.is_success() {
        return Err(ExtractionError::Retrieval(format!("HTTP status {status}")));
    }
    if body.len() > max_size {
        return Err(ExtractionError::Retrieval(format!(
            "Response too large: {} bytes (max: {max_size})",
            body.len()
        )));
    }
    Ok(body)
}

fn top_search_title(response: SearchResponse) -> Option<String> {
    response
        .query?
        .search
        .into_iter()
        .next()
        .map(|hit| hit.title)
}

fn parsed_page_html(response: ParseResponse, entity: &str) -> Result<String, ExtractionError> {
    if let Some(error) = response.error {
        debug!("API error {}: {}", error.code, error.info);
        return Err(ExtractionError::EntityNotFound {
            entity: entity.to_string(),
        });
    }
    let page = response
        .parse
        .ok_or_else(|| ExtractionError::MalformedSource("Empty parse response".to_string()))?;
    if is_disambiguation(&page.properties) {
        debug!("Page '{}' is a disambiguation page", page.title);
        return Err(ExtractionError::Ambiguous {
            entity: entity.to_string(),
        });
    }
    Ok(page.text)
}

/// Page properties come back as an object with `formatversion=2` and as a
/// list of `{name, *}` pairs with the legacy format.
fn is_disambiguation(properties: &serde_json::Value) -> bool {
    match properties {
        serde_json::Value::Object(map) => map.contains_key("disambiguation"),
        serde_json::Value::Array(items) => items
            .iter()
            .any(|item| item.get("name").and_then(|v| v.as_str()) == Some("disambiguation")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: DeserializeOwned>(value: serde_json::Value) -> T {
        let Ok(parsed) = serde_json::from_value(value) else {
            panic!("test JSON should deserialize");
        };
        parsed
    }

    #[test]
    fn test_wikipedia_config_default() {
        let config = WikipediaConfig::default();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.max_size, 2_000_000);
        assert_eq!(config.retry_delays, vec![1, 2]);
        assert!(config.user_agent.contains("factbot"));
        assert!(config.endpoint.ends_with("/w/api.php"));
    }

    #[test]
    fn test_wikipedia_config_partial_json_uses_defaults() {
        let config: WikipediaConfig = parse(json!({ "timeout": 3, "retry_delays": [] }));
        assert_eq!(config.timeout, 3);
        assert!(config.retry_delays.is_empty());
        assert_eq!(config.max_size, 2_000_000);
    }

    #[test]
    fn test_wikipedia_source_new() {
        assert!(WikipediaSource::new(WikipediaConfig::default()).is_ok());
    }

    #[test]
    fn test_wikipedia_source_rejects_bad_endpoint() {
        let config = WikipediaConfig {
            endpoint: "ftp://example.org/api".to_string(),
            ..WikipediaConfig::default()
        };
        assert!(WikipediaSource::new(config).is_err());

        let config = WikipediaConfig {
            endpoint: "not a url".to_string(),
            ..WikipediaConfig::default()
        };
        assert!(WikipediaSource::new(config).is_err());
    }

    #[test]
    fn test_top_search_title() {
        let response: SearchResponse = parse(json!({
            "batchcomplete": true,
            "query": {
                "searchinfo": { "totalhits": 3 },
                "search": [
                    { "ns": 0, "title": "France", "pageid": 5843419 },
                    { "ns": 0, "title": "French Republic", "pageid": 1 }
                ]
            }
        }));
        assert_eq!(top_search_title(response), Some("France".to_string()));
    }

    #[test]
    fn test_top_search_title_without_hits() {
        let response: SearchResponse = parse(json!({ "query": { "search": [] } }));
        assert_eq!(top_search_title(response), None);

        let response: SearchResponse = parse(json!({}));
        assert_eq!(top_search_title(response), None);
    }

    #[test]
    fn test_parsed_page_html() {
        let response: ParseResponse = parse(json!({
            "parse": {
                "title": "France",
                "pageid": 5843419,
                "text": "<table class=\"infobox\"></table>",
                "properties": { "wikibase_item": "Q142" }
            }
        }));
        assert_eq!(
            parsed_page_html(response, "france"),
            Ok("<table class=\"infobox\"></table>".to_string())
        );
    }

    #[test]
    fn test_parsed_page_api_error_is_entity_not_found() {
        let response: ParseResponse = parse(json!({
            "error": { "code": "missingtitle", "info": "The page you specified doesn't exist." }
        }));
        assert_eq!(
            parsed_page_html(response, "atlantis"),
            Err(ExtractionError::EntityNotFound {
                entity: "atlantis".to_string()
            })
        );
    }

    #[test]
    fn test_parsed_page_disambiguation_is_ambiguous() {
        let response: ParseResponse = parse(json!({
            "parse": {
                "title": "Georgia",
                "text": "<p>Georgia may refer to:</p>",
                "properties": { "disambiguation": "" }
            }
        }));
        assert_eq!(
            parsed_page_html(response, "georgia"),
            Err(ExtractionError::Ambiguous {
                entity: "georgia".to_string()
            })
        );
    }

    #[test]
    fn test_legacy_properties_list() {
        assert!(is_disambiguation(&json!([{ "name": "disambiguation", "*": "" }])));
        assert!(!is_disambiguation(&json!([{ "name": "wikibase_item", "*": "Q1" }])));
        assert!(!is_disambiguation(&serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_blank_entity_is_missing() {
        let Ok(source) = WikipediaSource::new(WikipediaConfig::default()) else {
            panic!("Failed to create WikipediaSource");
        };
        assert_eq!(
            source.fetch_reference_text("   ").await,
            Err(ExtractionError::MissingEntity)
        );
    }

    #[test]
    fn test_checked_body_rejects_error_status() {
        let result = checked_body(StatusCode::SERVICE_UNAVAILABLE, b"{}", 100);
        let Err(error) = result else {
            panic!("503 should fail");
        };
        assert!(error.is_transient());
        assert_eq!(
            error,
            ExtractionError::Retrieval("HTTP status 503 Service Unavailable".to_string())
        );
    }

    #[test]
    fn test_checked_body_enforces_max_size() {
        assert_eq!(checked_body(StatusCode::OK, b"{}", 2), Ok(&b"{}"[..]));
        assert_eq!(
            checked_body(StatusCode::OK, b"{ }", 2),
            Err(ExtractionError::Retrieval(
                "Response too large: 3 bytes (max: 2)".to_string()
            ))
        );
    }

    mod api {
        use super::super::*;
        use axum::extract::{Query, State};
        use axum::http::StatusCode as HttpStatus;
        use axum::response::{IntoResponse, Response};
        use axum::routing::get;
        use axum::{Json, Router};
        use serde_json::json;
        use std::collections::HashMap;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tokio::net::TcpListener;

        const FRANCE_HTML: &str = r#"<div class="mw-parser-output"><p>France is a country.</p><table class="infobox ib-country"><tbody><tr><th>Capital</th><td><a href="/wiki/Paris">Paris</a></td></tr><tr><th>Population</th><td>68,373,433</td></tr></tbody></table></div>"#;

        /// Canned `MediaWiki` API that fails the first `unavailable` requests.
        #[derive(Clone, Default)]
        struct FakeApi {
            unavailable: Arc<AtomicUsize>,
            requests: Arc<AtomicUsize>,
        }

        async fn handle(
            State(api): State<FakeApi>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Response {
            api.requests.fetch_add(1, Ordering::SeqCst);
            if api
                .unavailable
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return HttpStatus::SERVICE_UNAVAILABLE.into_response();
            }

            match params.get("action").map(String::as_str) {
                Some("query") if params.get("srsearch").map(String::as_str) == Some("France") => {
                    Json(json!({ "query": { "search": [{ "title": "France" }] } })).into_response()
                }
                Some("query") => Json(json!({ "query": { "search": [] } })).into_response(),
                Some("parse") => Json(json!({
                    "parse": {
                        "title": params.get("page"),
                        "text": FRANCE_HTML,
                        "properties": {}
                    }
                }))
                .into_response(),
                _ => HttpStatus::BAD_REQUEST.into_response(),
            }
        }

        async fn serve(api: FakeApi) -> String {
            let app = Router::new()
                .route("/w/api.php", get(handle))
                .with_state(api);

            let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
                panic!("test server should bind");
            };
            let Ok(addr) = listener.local_addr() else {
                panic!("test server has an address");
            };
            tokio::spawn(async move {
                let _ = axum::serve(listener, app).await;
            });

            format!("http://{addr}/w/api.php")
        }

        async fn source(api: &FakeApi, max_size: usize) -> WikipediaSource {
            let config = WikipediaConfig {
                endpoint: serve(api.clone()).await,
                max_size,
                retry_delays: vec![0, 0],
                ..WikipediaConfig::default()
            };
            let Ok(source) = WikipediaSource::new(config) else {
                panic!("local endpoint is valid");
            };
            source
        }

        #[tokio::test]
        async fn test_fetch_returns_infobox_text() {
            let api = FakeApi::default();
            let source = source(&api, 2_000_000).await;

            let Ok(text) = source.fetch_reference_text("France").await else {
                panic!("France should resolve");
            };
            assert!(text.as_str().contains("Capital Paris"));
            assert!(text.as_str().contains("Population 68,373,433"));
            assert!(!text.as_str().contains("is a country"));
            assert_eq!(api.requests.load(Ordering::SeqCst), 2);
        }

        #[tokio::test]
        async fn test_fetch_unknown_entity() {
            let api = FakeApi::default();
            let source = source(&api, 2_000_000).await;

            assert_eq!(
                source.fetch_reference_text("Narnia").await,
                Err(ExtractionError::EntityNotFound {
                    entity: "Narnia".to_string()
                })
            );
            assert_eq!(api.requests.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_unavailable_server_is_retried() {
            let api = FakeApi::default();
            api.unavailable.store(2, Ordering::SeqCst);
            let source = source(&api, 2_000_000).await;

            assert!(source.fetch_reference_text("France").await.is_ok());
            assert_eq!(api.requests.load(Ordering::SeqCst), 4);
        }

        #[tokio::test]
        async fn test_retries_give_up_after_last_delay() {
            let api = FakeApi::default();
            api.unavailable.store(10, Ordering::SeqCst);
            let source = source(&api, 2_000_000).await;

            assert_eq!(
                source.fetch_reference_text("France").await,
                Err(ExtractionError::Retrieval(
                    "HTTP status 503 Service Unavailable".to_string()
                ))
            );
            assert_eq!(api.requests.load(Ordering::SeqCst), 3);
        }

        #[tokio::test]
        async fn test_oversized_page_fails_with_retrieval() {
            let api = FakeApi::default();
            let source = source(&api, 200).await;

            let Err(ExtractionError::Retrieval(message)) =
                source.fetch_reference_text("France").await
            else {
                panic!("page body exceeds the size limit");
            };
            assert!(message.starts_with("Response too large"));
        }
    }
}
