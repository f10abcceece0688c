use crate::extractors::{meta_content, MetadataExtractor, PageMetadata, ParsingContext};
use scraper::Selector;

/// Plain document fallbacks: the `<title>` element and `<meta name="description">`.
/// Never yields an image.
pub struct DocumentExtractor;

impl DocumentExtractor {
    fn title(context: &ParsingContext) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        context
            .document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|title| !title.is_empty())
    }
}

impl MetadataExtractor for DocumentExtractor {
    fn name(&self) -> &'static str {
        "document"
    }

    fn extract(&self, context: &ParsingContext) -> PageMetadata {
        PageMetadata {
            title: Self::title(context),
            description: meta_content(&context.document, "name", "description"),
            image: None,
        }
    }
}
