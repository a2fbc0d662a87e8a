//! Content-Type header helpers.

/// Mime types recognized by the response shortcuts.
pub mod mime {
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const TEXT_XML: &str = "text/xml";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const TEXT_JAVASCRIPT: &str = "text/javascript";
    pub const TEXT_PLAIN: &str = "text/plain";
    pub const HTML: &str = "text/html";
    pub const XHTML: &str = "application/xhtml+xml";
    pub const PDF: &str = "application/pdf";
    pub const CSV: &str = "text/csv";
    pub const ZIP: &str = "application/zip";
    pub const FLASH: &str = "application/x-shockwave-flash";
    pub const FLV: &str = "video/x-flv";
}

/// Extract the mime type: the part before the first `;`, lower-cased.
pub fn mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Extract the charset parameter.
///
/// Returns `None` when no `charset` parameter is declared and `Some("")` when
/// it is declared without a value.
pub fn charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=').unwrap_or((param, ""));
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}
