// URL sanitization pipeline

use crate::email::sanitize_email;
use crate::parsed_url::{COMPONENT, ParsedUrl, clean_path, form_decode};
use crate::traits::{NoHook, UrlTransformer};
use crate::{Result, SanitizeError};
use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, CONTROLS, percent_encode, utf8_percent_encode};
use regex::Regex;
use scrubkit_xss::{ProtocolAllowList, safe_escape_html};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

static DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.-]+(:[0-9]+)?$").unwrap());

/// Characters an address may contain that would end or corrupt a mailto body
const MAILTO: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'[')
    .add(b']');

static DEFAULT_SANITIZER: Lazy<UrlSanitizer> = Lazy::new(UrlSanitizer::new);

/// Where the sanitized URL is going to be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UrlContext {
    /// Plain URL text
    #[default]
    Raw,
    /// Embedded in HTML; `& < > " '` are entity-escaped
    Display,
}

impl FromStr for UrlContext {
    type Err = Infallible;

    /// `"display"` selects [`UrlContext::Display`]; anything else is raw.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "display" {
            UrlContext::Display
        } else {
            UrlContext::Raw
        })
    }
}

impl From<&str> for UrlContext {
    fn from(s: &str) -> Self {
        // FromStr for UrlContext cannot fail
        s.parse().unwrap_or_default()
    }
}

/// URL sanitizer bound to a scheme allow-list.
#[derive(Debug, Clone)]
pub struct UrlSanitizer {
    allowed_protocols: ProtocolAllowList,
}

impl UrlSanitizer {
    /// Sanitizer accepting `http`, `https`, `mailto` and `ftp`
    pub fn new() -> Self {
        Self {
            allowed_protocols: ProtocolAllowList::url_default(),
        }
    }

    pub fn with_protocols(allowed_protocols: ProtocolAllowList) -> Self {
        Self { allowed_protocols }
    }

    pub fn allowed_protocols(&self) -> &ProtocolAllowList {
        &self.allowed_protocols
    }

    /// Normalize and validate a URL.
    ///
    /// Relative references starting with `/`, `?` or `#` are returned as
    /// given. Anything else without a scheme is treated as `http://`.
    /// `mailto:` addresses are run through the email sanitizer.
    pub fn escape<T>(&self, input: &str, context: UrlContext, hook: &T) -> Result<String>
    where
        T: UrlTransformer + ?Sized,
    {
        let input = input.trim().replace(' ', "%20");
        if input.is_empty() {
            return Ok(String::new());
        }

        let mut url = ParsedUrl::parse(&input)?;

        if url.scheme.is_empty() || is_host_and_port(&url) {
            if input.starts_with(['/', '#', '?']) {
                return Ok(input);
            }
            url = ParsedUrl::parse(&format!("http://{}", input))?;
        }

        url.scheme.make_ascii_lowercase();
        url.host.make_ascii_lowercase();

        if !self.allowed_protocols.is_allowed(&url.scheme) {
            debug!(scheme = %url.scheme, "rejected URL with disallowed protocol");
            return Err(SanitizeError::DisallowedProtocol(url.scheme));
        }

        if url.scheme == "mailto" && url.opaque.is_some() {
            sanitize_mailto(&mut url)?;
        } else if !DOMAIN.is_match(&url.host) {
            debug!(host = %url.host, "rejected URL with invalid domain");
            return Err(SanitizeError::InvalidDomain(url.host));
        }

        let mut url = hook.transform(url)?;

        if let Some(query) = url.raw_query.as_deref() {
            url.raw_query = Some(sanitize_query(query)?);
        }

        if url.opaque.is_none() {
            let path = clean_path(&url.path);
            url.path = if path == "." || path == "/." {
                String::new()
            } else {
                path
            };
        }

        // Display re-escapes the decoded fragment exactly once
        let mut out = url.to_string();

        if context == UrlContext::Display {
            out = safe_escape_html(&out);
        }

        Ok(out.replace('[', "%5B").replace(']', "%5D"))
    }
}

impl Default for UrlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize a URL with the default scheme allow-list.
///
/// ```
/// use scrubkit_validation::{NoHook, escape_url};
///
/// let url = escape_url("HtTp://ExAmPlE.CoM/a/../b?q=a+b", "raw", &NoHook).unwrap();
/// assert_eq!(url, "http://example.com/b?q=a%20b");
///
/// assert!(escape_url("javascript:alert(1)", "raw", &NoHook).is_err());
/// ```
pub fn escape_url<T>(input: &str, context: impl Into<UrlContext>, hook: &T) -> Result<String>
where
    T: UrlTransformer + ?Sized,
{
    DEFAULT_SANITIZER.escape(input, context.into(), hook)
}

/// [`escape_url`] for HTML display without a hook
pub fn sanitize_url(input: &str) -> Result<String> {
    escape_url(input, UrlContext::Display, &NoHook)
}

/// `localhost:8080/x` parses as scheme `localhost`; it is really a host and port
fn is_host_and_port(url: &ParsedUrl) -> bool {
    url.opaque.as_deref().is_some_and(|opaque| {
        let port = opaque.split('/').next().unwrap_or("");
        !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
    })
}

fn sanitize_mailto(url: &mut ParsedUrl) -> Result<()> {
    let Some(address) = url.opaque.as_deref() else {
        return Ok(());
    };

    let decoded = percent_encoding::percent_decode_str(address).decode_utf8_lossy();
    let clean = sanitize_email(&decoded, &NoHook)?;
    url.opaque = Some(utf8_percent_encode(&clean, MAILTO).to_string());
    Ok(())
}

/// Decode each pair once and re-encode it, keeping input order
fn sanitize_query(query: &str) -> Result<String> {
    if query.is_empty() {
        return Ok(String::new());
    }

    let mut pairs = Vec::new();
    for part in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        let key = form_decode(key)?;
        let value = form_decode(value).inspect_err(|_| {
            debug!("rejected URL with undecodable query value");
        })?;

        pairs.push(format!(
            "{}={}",
            percent_encode(&key, COMPONENT),
            percent_encode(&value, COMPONENT)
        ));
    }

    Ok(pairs.join("&"))
}
