pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod normalize;
pub mod previewer;
pub mod server;
pub mod vault;

pub use builder::LinkPreviewerBuilder;
pub use error::{PreviewError, StoreError};
pub use model::{PreviewRequest, PreviewResponse, PreviewResult};
pub use previewer::LinkPreviewer;

/// Build a preview for `url` with the default configuration.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let preview = datavault::preview_url("www.rust-lang.org").await?;
/// assert_eq!(preview.domain, "rust-lang.org");
/// # Ok(())
/// # }
/// ```
pub async fn preview_url(url: &str) -> Result<PreviewResult, PreviewError> {
    LinkPreviewer::builder().build()?.preview(url).await
}
