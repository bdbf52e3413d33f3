use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Output encoding utilities
pub struct Encoder;

impl Encoder {
    /// Escape the five markup-significant characters `& < > " '`.
    ///
    /// `%` is left alone so percent-encoded URLs survive the trip into an
    /// HTML attribute unchanged.
    pub fn safe_escape_html(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out
    }

    /// Percent-encode a single URL component (query value, path segment).
    ///
    /// Spaces become `%20`, never `+`.
    pub fn encode_url_component(text: &str) -> String {
        utf8_percent_encode(text, COMPONENT).to_string()
    }
}

/// Shorthand for [`Encoder::safe_escape_html`]
pub fn safe_escape_html(text: &str) -> String {
    Encoder::safe_escape_html(text)
}
