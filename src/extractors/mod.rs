use scraper::{Html, Selector};

mod document;
mod open_graph;
mod twitter;

pub use document::DocumentExtractor;
pub use open_graph::OpenGraphExtractor;
pub use twitter::TwitterCardExtractor;

pub struct ParsingContext {
    /// Normalized URL the page was fetched from
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// Fields a single extractor may find. Values are raw: no truncation and no
/// URL resolution yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl PageMetadata {
    /// Fill every field still missing from `other`
    pub fn or(self, other: PageMetadata) -> PageMetadata {
        PageMetadata {
            title: self.title.or(other.title),
            description: self.description.or(other.description),
            image: self.image.or(other.image),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some() && self.image.is_some()
    }
}

pub trait MetadataExtractor {
    fn name(&self) -> &'static str;
    fn extract(&self, context: &ParsingContext) -> PageMetadata;
}

/// Run the extractors in precedence order. For each field the first
/// extractor that finds a value wins.
pub fn extract_metadata(context: &ParsingContext) -> PageMetadata {
    let extractors: [&dyn MetadataExtractor; 3] = [
        &OpenGraphExtractor,
        &TwitterCardExtractor,
        &DocumentExtractor,
    ];

    let mut metadata = PageMetadata::default();
    for extractor in extractors {
        if metadata.is_complete() {
            break;
        }
        let found = extractor.extract(context);
        log::trace!(
            "{} extractor found {:?} on {}",
            extractor.name(),
            found,
            context.url
        );
        metadata = metadata.or(found);
    }
    metadata
}

/// Parse `html` and extract its preview metadata
pub fn extract_from_html(url: &str, html: &str) -> PageMetadata {
    extract_metadata(&ParsingContext::new(url, html))
}

/// `content` of the first `<meta>` whose `attr` equals `key`, ignoring ASCII case.
///
/// Tags with an empty or whitespace-only `content` are skipped.
pub(crate) fn meta_content(document: &Html, attr: &str, key: &str) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr(attr)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(key))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_title_beats_document_title() {
        let html = r#"
            <html><head>
                <title>Document Title</title>
                <meta property="og:title" content="Open Graph Title">
            </head></html>
        "#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Open Graph Title"));
    }

    #[test]
    fn test_per_field_precedence() {
        let html = r#"
            <html><head>
                <title>Doc</title>
                <meta name="twitter:title" content="Tweet Title">
                <meta name="twitter:description" content="Tweet description">
                <meta name="description" content="Plain description">
                <meta property="og:description" content="OG description">
                <meta name="twitter:image" content="/card.png">
            </head></html>
        "#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Tweet Title"));
        assert_eq!(metadata.description.as_deref(), Some("OG description"));
        assert_eq!(metadata.image.as_deref(), Some("/card.png"));
    }

    #[test]
    fn test_reversed_attribute_order() {
        let html = r#"
            <meta content="Reversed" property="og:title">
            <meta content="Reversed description" property="og:description">
            <meta content="https://example.com/a.png" property="og:image">
        "#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Reversed"));
        assert_eq!(metadata.description.as_deref(), Some("Reversed description"));
        assert_eq!(metadata.image.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_case_insensitive_names() {
        let html = r#"<META PROPERTY="OG:Title" CONTENT="Shouting"><TITLE>quiet</TITLE>"#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Shouting"));
    }

    #[test]
    fn test_empty_content_falls_through() {
        let html = r#"
            <meta property="og:title" content="">
            <meta name="twitter:title" content="   ">
            <title>  Real Title  </title>
        "#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_no_img_fallback() {
        let html = r#"<html><body><img src="/photo.jpg"><title>T</title></body></html>"#;
        let metadata = extract_from_html("https://example.com", html);
        assert!(metadata.image.is_none());
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<meta property="og:title" content="Fish &amp; Chips">"#;
        let metadata = extract_from_html("https://example.com", html);
        assert_eq!(metadata.title.as_deref(), Some("Fish & Chips"));
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(
            extract_from_html("https://example.com", ""),
            PageMetadata::default()
        );
    }
}
