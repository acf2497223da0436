//! HTTP access shared by all source providers.
//!
//! Every request is bounded by the timeout configured on the client. Nothing is retried here: a
//! failed fetch is reported once and callers that want another attempt re-run the extraction.

use super::error::{ExtractError, FetchError, ParseError};
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

const LOG_TARGET: &str = "      http";

const USER_AGENT: &str = concat!("cov19-exporter/", env!("CARGO_PKG_VERSION"));

/// Build a client whose every request is cut off after `timeout`.
pub fn build_client(timeout: Duration) -> crate::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .into_app_err("unable to create HTTP client")
}

/// Classify a transport failure, keeping timeouts apart from other network errors.
fn transport_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { url: url.to_string() }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

fn check_status(url: &str, response: &reqwest::Response) -> Result<(), FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// GET `url` and return the body as text.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    log::debug!(target: LOG_TARGET, "GET {url}");

    let response = client.get(url).send().await.map_err(|e| transport_error(url, e))?;
    check_status(url, &response)?;

    let text = response.text().await.map_err(|e| transport_error(url, e))?;
    log::debug!(target: LOG_TARGET, "Received {} bytes from {url}", text.len());
    Ok(text)
}

/// POST `body` as JSON to `url` and return the body, which must itself be JSON.
pub async fn post_json(client: &reqwest::Client, url: &str, body: &impl Serialize) -> Result<String, ExtractError> {
    log::debug!(target: LOG_TARGET, "POST {url}");

    let response = client.post(url).json(body).send().await.map_err(|e| transport_error(url, e))?;
    check_status(url, &response)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains("json") {
        return Err(ParseError::NotJson(content_type).into());
    }

    response.text().await.map_err(|e| transport_error(url, e).into())
}

/// Cut the JSON array out of a script-like response: from the first `[` to the last `]`.
pub fn extract_array(text: &str) -> Result<&str, ParseError> {
    let begin = text.find('[').ok_or(ParseError::MissingBracket("beginning"))?;
    let end = text.rfind(']').ok_or(ParseError::MissingBracket("end"))?;
    if end < begin {
        return Err(ParseError::MissingBracket("end"));
    }

    text.get(begin..=end).ok_or(ParseError::MissingBracket("end"))
}
