//! URL helpers shared by the fetcher and the extractors.

use url::Url;

/// Trim the input and make sure it carries an `http://` or `https://` scheme.
///
/// Inputs without a scheme get `https://` prepended. Already normalized URLs
/// come back unchanged.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Host of `normalized` with one leading `www.` removed.
///
/// Falls back to the caller's original input when the URL cannot be parsed.
pub fn extract_domain(normalized: &str, original: &str) -> String {
    match Url::parse(normalized) {
        Ok(url) => match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => original.to_string(),
        },
        Err(_) => original.to_string(),
    }
}

/// Turn an image reference found in a page into an absolute URL.
///
/// Absolute `http(s)` URLs are returned untouched. Protocol-relative
/// references get `https:`; anything else is joined onto `base`. When joining
/// fails the raw value is kept.
pub fn resolve_image_url(raw: &str, base: &str) -> String {
    if has_http_scheme(raw) {
        return raw.to_string();
    }
    if raw.starts_with("//") {
        return format!("https:{raw}");
    }

    Url::parse(base)
        .and_then(|base| base.join(raw))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Keep at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
