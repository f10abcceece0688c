use serde::{Deserialize, Serialize};

/// Metadata extracted for a single link.
///
/// `domain` and `url` are always set. The other fields are present only when
/// extraction found a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute image URL (relative values are resolved against `url`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hostname without a leading `www.`
    pub domain: String,
    /// The normalized request URL
    pub url: String,
}

impl PreviewResult {
    /// Domain-only result used whenever the page cannot be fetched or parsed
    pub fn fallback(url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            title: None,
            description: None,
            image: None,
            domain: domain.into(),
            url: url.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image.is_none()
    }
}

/// Body of a preview invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// `{ success: true, data }` or `{ success: false, error }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PreviewResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PreviewResponse {
    pub fn ok(data: PreviewResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
