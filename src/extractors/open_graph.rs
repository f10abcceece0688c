use crate::extractors::{meta_content, MetadataExtractor, PageMetadata, ParsingContext};

/// `<meta property="og:*">` tags
pub struct OpenGraphExtractor;

impl MetadataExtractor for OpenGraphExtractor {
    fn name(&self) -> &'static str {
        "open_graph"
    }

    fn extract(&self, context: &ParsingContext) -> PageMetadata {
        let document = &context.document;
        PageMetadata {
            title: meta_content(document, "property", "og:title"),
            description: meta_content(document, "property", "og:description"),
            image: meta_content(document, "property", "og:image"),
        }
    }
}
