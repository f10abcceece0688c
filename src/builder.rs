use std::time::Duration;

use crate::config::PreviewConfig;
use crate::fetchers::RequestFetcher;
use crate::{LinkPreviewer, PreviewError};

/// Builder for configuring a [`LinkPreviewer`]
///
/// Unset options fall back to [`PreviewConfig::default`].
#[derive(Debug, Default)]
pub struct LinkPreviewerBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    max_body_bytes: Option<usize>,
    max_title_chars: Option<usize>,
    max_description_chars: Option<usize>,
}

impl LinkPreviewerBuilder {
    /// Start from values loaded from configuration
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            timeout: Some(config.timeout()),
            user_agent: Some(config.user_agent.clone()),
            max_body_bytes: Some(config.max_body_bytes),
            max_title_chars: Some(config.max_title_chars),
            max_description_chars: Some(config.max_description_chars),
        }
    }

    /// Set the hard timeout for a fetch, body read included
    ///
    /// # Example
    /// ```
    /// use datavault::LinkPreviewer;
    /// use std::time::Duration;
    ///
    /// let builder = LinkPreviewer::builder()
    ///     .timeout(Duration::from_millis(2500));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the User-Agent header sent with every fetch
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set how many bytes of decoded HTML are kept from a response
    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = Some(bytes);
        self
    }

    pub fn max_title_chars(mut self, chars: usize) -> Self {
        self.max_title_chars = Some(chars);
        self
    }

    pub fn max_description_chars(mut self, chars: usize) -> Self {
        self.max_description_chars = Some(chars);
        self
    }

    /// Build the previewer
    ///
    /// # Errors
    /// Returns `PreviewError` if:
    /// - The user agent is not a valid header value
    /// - The HTTP client cannot be initialized
    pub fn build(self) -> Result<LinkPreviewer, PreviewError> {
        let defaults = PreviewConfig::default();

        let timeout = self.timeout.unwrap_or_else(|| defaults.timeout());
        let user_agent = self.user_agent.unwrap_or(defaults.user_agent);
        let max_body_bytes = self.max_body_bytes.unwrap_or(defaults.max_body_bytes);

        let fetcher = RequestFetcher::new(timeout, &user_agent, max_body_bytes)?;
        Ok(LinkPreviewer::new(
            fetcher,
            self.max_title_chars.unwrap_or(defaults.max_title_chars),
            self.max_description_chars
                .unwrap_or(defaults.max_description_chars),
        ))
    }
}
