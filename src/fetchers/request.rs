use crate::error::PreviewError;
use crate::fetchers::Utf8StreamDecoder;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;

pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Why a fetch produced no HTML to extract from
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("unsupported content type {0:?}")]
    NotHtml(Option<String>),
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// Decoded prefix of an HTML page
    Html(String),
    /// Nothing usable came back; the caller degrades to a domain-only result
    Degraded(FetchFailure),
}

/// Issues the single bounded GET behind every preview.
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
    timeout: Duration,
    max_body_bytes: usize,
}

impl RequestFetcher {
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_body_bytes: usize,
    ) -> Result<Self, PreviewError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        // The timeout covers connect, headers and the whole body read
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(HeaderValue::from_str(user_agent)?)
            .default_headers(headers)
            .build()
            .map_err(PreviewError::ClientError)?;

        Ok(Self {
            client,
            timeout,
            max_body_bytes,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, PreviewError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Ok(FetchOutcome::Degraded(self.classify(e))),
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(FetchOutcome::Degraded(FetchFailure::Status(status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let is_html = content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));
        if !is_html {
            return Ok(FetchOutcome::Degraded(FetchFailure::NotHtml(content_type)));
        }

        match read_capped(response, self.max_body_bytes).await {
            Ok(html) => Ok(FetchOutcome::Html(html)),
            Err(e) if e.is_timeout() => {
                Ok(FetchOutcome::Degraded(FetchFailure::TimedOut(self.timeout)))
            }
            Err(e) => Err(PreviewError::BodyError(e)),
        }
    }

    fn classify(&self, error: reqwest::Error) -> FetchFailure {
        if error.is_timeout() {
            FetchFailure::TimedOut(self.timeout)
        } else {
            FetchFailure::Request(error)
        }
    }
}

/// Read the body until `max_bytes` of decoded text are buffered.
///
/// Dropping the response once the cap is hit abandons the rest of the download.
async fn read_capped(mut response: Response, max_bytes: usize) -> Result<String, reqwest::Error> {
    let mut decoder = Utf8StreamDecoder::new();
    let mut html = String::new();

    while html.len() < max_bytes {
        match response.chunk().await? {
            Some(chunk) => decoder.push(&chunk, &mut html),
            None => {
                decoder.finish(&mut html);
                break;
            }
        }
    }

    if html.len() > max_bytes {
        let mut cut = max_bytes;
        while !html.is_char_boundary(cut) {
            cut -= 1;
        }
        html.truncate(cut);
        debug!("Body capped at {} bytes", cut);
    }

    Ok(html)
}
