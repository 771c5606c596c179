use axum::{response::{IntoResponse, Html}, http::header};
use regex::Regex;

pub enum HtmlOrRaw {
    Html(String),
    Raw(String, Vec<u8>),
}

impl IntoResponse for HtmlOrRaw {
    fn into_response(self) -> axum::response::Response {
        match self {
            HtmlOrRaw::Html(s) => Html(s).into_response(),
            HtmlOrRaw::Raw(content_type, data) => ([(header::CONTENT_TYPE, content_type)], data).into_response(),
        }
    }
}

pub fn safe_mime(mime: mime_guess::Mime) -> mime_guess::Mime {
    if mime.essence_str().starts_with("application/") {
        return mime::APPLICATION_OCTET_STREAM;
    } else {
        return mime;
    }
}

/// Format a byte count with binary units.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a count compactly: thousands as `k`, millions as `M`.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        format!("{}", count)
    } else if count < 1_000_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    }
}

/// Drop the octicon anchor SVGs GitHub's README renderer decorates
/// headings with.
pub fn strip_octicons(html: &str) -> String {
    let pattern = Regex::new(r#"(?s)<svg class="octicon.*?</svg>"#).unwrap();
    pattern.replace_all(html, "").into_owned()
}
