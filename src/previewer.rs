use crate::builder::LinkPreviewerBuilder;
use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::extractors::extract_from_html;
use crate::fetchers::{FetchOutcome, RequestFetcher};
use crate::model::PreviewResult;
use crate::normalize::{extract_domain, normalize_url, resolve_image_url, truncate_chars};
use log::{debug, info};

/// Fetches a page and turns it into a [`PreviewResult`].
///
/// Cloning is cheap; clones share the underlying HTTP connection pool. Calls
/// are independent of each other and keep no state between invocations.
#[derive(Debug, Clone)]
pub struct LinkPreviewer {
    fetcher: RequestFetcher,
    max_title_chars: usize,
    max_description_chars: usize,
}

impl LinkPreviewer {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use datavault::LinkPreviewer;
    /// use std::time::Duration;
    ///
    /// let previewer = LinkPreviewer::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> LinkPreviewerBuilder {
        LinkPreviewerBuilder::default()
    }

    pub fn from_config(config: &PreviewConfig) -> Result<Self, PreviewError> {
        LinkPreviewerBuilder::from_config(config).build()
    }

    pub(crate) fn new(
        fetcher: RequestFetcher,
        max_title_chars: usize,
        max_description_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            max_title_chars,
            max_description_chars,
        }
    }

    pub fn fetcher(&self) -> &RequestFetcher {
        &self.fetcher
    }

    /// Build a preview for a user-supplied URL.
    ///
    /// Unreachable hosts, timeouts, non-success statuses and non-HTML
    /// responses all produce `Ok` with a domain-only result. `Err` is reserved
    /// for internal faults such as a response stream breaking mid-read.
    pub async fn preview(&self, input: &str) -> Result<PreviewResult, PreviewError> {
        let url = normalize_url(input);
        let domain = extract_domain(&url, input);

        let html = match self.fetcher.fetch(&url).await? {
            FetchOutcome::Html(html) => html,
            FetchOutcome::Degraded(reason) => {
                info!("Returning domain-only preview for {}: {}", url, reason);
                return Ok(PreviewResult::fallback(url, domain));
            }
        };
        debug!("Fetched {} bytes of HTML from {}", html.len(), url);

        // The parsed document is not Send, keep it out of any await point
        let metadata = extract_from_html(&url, &html);

        Ok(PreviewResult {
            title: metadata
                .title
                .map(|title| truncate_chars(&title, self.max_title_chars)),
            description: metadata
                .description
                .map(|description| truncate_chars(&description, self.max_description_chars)),
            image: metadata.image.map(|image| resolve_image_url(&image, &url)),
            domain,
            url,
        })
    }
}
