use crate::extractors::{meta_content, MetadataExtractor, PageMetadata, ParsingContext};

/// `<meta name="twitter:*">` card tags
pub struct TwitterCardExtractor;

impl MetadataExtractor for TwitterCardExtractor {
    fn name(&self) -> &'static str {
        "twitter_card"
    }

    fn extract(&self, context: &ParsingContext) -> PageMetadata {
        let document = &context.document;
        PageMetadata {
            title: meta_content(document, "name", "twitter:title"),
            description: meta_content(document, "name", "twitter:description"),
            image: meta_content(document, "name", "twitter:image"),
        }
    }
}
