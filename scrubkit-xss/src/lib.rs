//! # scrubkit XSS
//!
//! HTML-side building blocks for scrubkit.
//!
//! ## Features
//!
//! - ✅ **HTML Sanitization** - Strip disallowed tags, normalize entities, drop control characters
//! - ✅ **Tag Policies** - Map of allowed tags to their permitted attributes
//! - ✅ **Protocol Allow-Lists** - Case-insensitive scheme checks for URLs and links
//! - ✅ **Output Encoding** - HTML, attribute and URL component encoding
//!
//! ## Sanitization
//!
//! ```rust
//! use scrubkit_xss::{HtmlPolicy, sanitize_html};
//!
//! let policy = HtmlPolicy::new().allow_tag("b");
//! let clean = sanitize_html("<b>ok</b><script>alert(1)</script>", &policy);
//! assert_eq!(clean, "<b>ok</b>alert(1)");
//! ```
//!
//! The inner text of a removed tag is kept, only the markup goes. The
//! pipeline runs in a fixed order: control characters and `\0` sequences
//! are removed, then bare `&` is rewritten to `&amp;`, then tags are
//! filtered.
//!
//! ## Attribute Enforcement
//!
//! By default the attribute lists of a policy are not applied. Switch to
//! [`AttributeMode::Enforce`] to keep only listed attributes and to drop
//! links whose protocol is not allow-listed:
//!
//! ```rust
//! use scrubkit_xss::{AttributeMode, HtmlSanitizer};
//!
//! let sanitizer = HtmlSanitizer::new().with_attribute_mode(AttributeMode::Enforce);
//! let clean = sanitizer.sanitize(r#"<a href="javascript:alert(1)" title="x">go</a>"#);
//! assert_eq!(clean, "<a>go</a>");
//! ```
//!
//! ## Protocols
//!
//! ```rust
//! use scrubkit_xss::{ProtocolAllowList, is_allowed_protocol, URL_PROTOCOLS};
//!
//! assert!(is_allowed_protocol("HTTPS", URL_PROTOCOLS));
//! assert!(ProtocolAllowList::html_default().is_allowed("xmpp"));
//! assert!(!ProtocolAllowList::url_default().is_allowed("javascript"));
//! ```
//!
//! ## Encoding
//!
//! ```rust
//! use scrubkit_xss::{Encoder, safe_escape_html};
//!
//! assert_eq!(safe_escape_html("a=1&b=<2>%20"), "a=1&amp;b=&lt;2&gt;%20");
//! assert_eq!(Encoder::encode_url_component("a b"), "a%20b");
//! ```

pub mod encoder;
pub mod policy;
pub mod protocol;
pub mod sanitizer;

pub use encoder::{Encoder, safe_escape_html};
pub use policy::{AttributeMode, HtmlPolicy};
pub use protocol::{
    HTML_PROTOCOLS, ProtocolAllowList, URL_PROTOCOLS, extract_scheme, is_allowed_protocol,
};
pub use sanitizer::{
    HtmlSanitizer, html_sanitize_basic, normalize_entities, remove_control_chars, sanitize_html,
};
