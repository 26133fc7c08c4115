use crate::error::{ExportError, Result};
use crate::rules::RulesTable;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT_VALUE: &str = concat!("epack-export/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the rules fetch and document download.
pub fn build_client(timeout_ms: u64) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    Ok(Client::builder()
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_millis(timeout_ms))
        .build()?)
}

/// `url` with a `_ts=<millis>` query parameter appended.
pub fn cache_busted_url(url: &str, timestamp_ms: i64) -> Result<Url> {
    let mut parsed = Url::parse(url).map_err(|e| ExportError::fetch_error(url, &e.to_string()))?;
    parsed
        .query_pairs_mut()
        .append_pair("_ts", &timestamp_ms.to_string());
    Ok(parsed)
}

/// Parse a rules document.
///
/// The top level must be a JSON object carrying a `rules` object.
pub fn parse_rules(body: &str) -> Result<RulesTable> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let Some(obj) = value.as_object() else {
        return Err(ExportError::RulesFormat("top level is not an object".into()));
    };
    match obj.get("rules") {
        Some(serde_json::Value::Object(_)) => {}
        Some(_) => return Err(ExportError::RulesFormat("`rules` is not an object".into())),
        None => return Err(ExportError::RulesFormat("missing `rules`".into())),
    }
    Ok(serde_json::from_value(value)?)
}

/// Fetch the remote rules table, bypassing every HTTP cache.
pub async fn fetch_rules(client: &Client, url: &str) -> Result<RulesTable> {
    let busted = cache_busted_url(url, Utc::now().timestamp_millis())?;
    let resp = client
        .get(busted)
        .header(CACHE_CONTROL, "no-store")
        .header(PRAGMA, "no-cache")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ExportError::fetch_error(url, &e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ExportError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| ExportError::fetch_error(url, &e.to_string()))?;
    parse_rules(&body)
}

/// Download an HTML document once.
pub async fn fetch_document(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|e| ExportError::fetch_error(url, &e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ExportError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp.text().await?)
}
