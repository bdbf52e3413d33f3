//! Scheme allow-lists shared by the URL and HTML pipelines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Schemes accepted when escaping a URL.
pub const URL_PROTOCOLS: &[&str] = &["http", "https", "mailto", "ftp"];

/// Schemes accepted in link attributes during HTML sanitization.
pub const HTML_PROTOCOLS: &[&str] = &[
    "http", "https", "mailto", "ftp", "ftps", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

// Entity spellings of ':' that browsers resolve before reading a scheme
static ENCODED_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&(?:#0*58;?|#x0*3a;?|colon;)").unwrap());

/// Case-insensitive membership test of `scheme` against `allowed`.
///
/// An empty scheme never matches.
pub fn is_allowed_protocol<S: AsRef<str>>(scheme: &str, allowed: &[S]) -> bool {
    !scheme.is_empty()
        && allowed
            .iter()
            .any(|protocol| protocol.as_ref().eq_ignore_ascii_case(scheme))
}

/// Extract the lower-cased scheme of a URL-like attribute value.
///
/// Whitespace and control characters are ignored the way browsers ignore
/// them (`java\tscript:`), and entity-encoded colons are resolved. Returns
/// `None` for relative references.
pub fn extract_scheme(value: &str) -> Option<String> {
    let value = ENCODED_COLON.replace_all(value, ":");
    let mut scheme = String::new();

    for c in value.chars() {
        match c {
            ':' => break,
            '/' | '?' | '#' => return None,
            c if c.is_ascii_whitespace() || c.is_ascii_control() => continue,
            c => scheme.push(c.to_ascii_lowercase()),
        }
    }

    if !value.contains(':') || scheme.is_empty() {
        return None;
    }

    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    // "a(b:c" has a colon but no valid scheme: report it as unknown
    if valid { Some(scheme) } else { Some(String::new()) }
}

/// An ordered set of permitted URL schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolAllowList {
    protocols: Vec<String>,
}

impl ProtocolAllowList {
    /// Create an allow-list from any sequence of schemes
    pub fn new<I, S>(protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protocols: protocols.into_iter().map(Into::into).collect(),
        }
    }

    /// The narrow list used by URL escaping
    pub fn url_default() -> Self {
        Self::new(URL_PROTOCOLS.iter().copied())
    }

    /// The broad list used by HTML sanitization
    pub fn html_default() -> Self {
        Self::new(HTML_PROTOCOLS.iter().copied())
    }

    /// Check whether `scheme` is a member, ignoring ASCII case
    pub fn is_allowed(&self, scheme: &str) -> bool {
        is_allowed_protocol(scheme, &self.protocols)
    }

    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
