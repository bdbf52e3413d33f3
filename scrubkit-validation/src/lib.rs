//! Input sanitizers for URLs, email addresses, file names and plain text
//!
//! Each sanitizer cleans what it can and returns a [`SanitizeError`] when
//! nothing safe is left. Behavior can be extended through a hook: any type
//! implementing one of the hook traits, including plain closures, or
//! [`NoHook`] for none.
//!
//! # Examples
//!
//! ## URLs
//!
//! ```
//! use scrubkit_validation::{NoHook, ParsedUrl, SanitizeError, UrlContext, escape_url};
//!
//! let clean = escape_url(" example.com/search?q=a+b ", UrlContext::Raw, &NoHook).unwrap();
//! assert_eq!(clean, "http://example.com/search?q=a%20b");
//!
//! // Hooks can rewrite the parsed URL or reject it
//! let force_https = |mut url: ParsedUrl| -> Result<ParsedUrl, SanitizeError> {
//!     url.scheme = "https".to_string();
//!     Ok(url)
//! };
//! let clean = escape_url("http://example.com", "raw", &force_https).unwrap();
//! assert_eq!(clean, "https://example.com");
//! ```
//!
//! ## Email addresses
//!
//! ```
//! use scrubkit_validation::{SanitizeError, sanitize_email, sanitize_email_basic};
//!
//! assert_eq!(sanitize_email_basic(" test..user@example.com ").unwrap(), "test.user@example.com");
//!
//! let block_tempmail = |local: String, domain: String| {
//!     if domain == "tempmail.com" {
//!         return Err(SanitizeError::hook("disposable domain"));
//!     }
//!     Ok((local, domain))
//! };
//! assert!(sanitize_email("user@tempmail.com", &block_tempmail).is_err());
//! ```
//!
//! ## File names
//!
//! ```
//! use scrubkit_validation::{ErrorKind, sanitize_file_name_basic};
//!
//! assert_eq!(sanitize_file_name_basic("Résumé (final).pdf").unwrap(), "Resume-final.pdf");
//!
//! let err = sanitize_file_name_basic("README").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidFormat);
//! ```

mod email;
mod errors;
mod filename;
mod parsed_url;
mod text;
mod traits;
mod url;

pub use email::*;
pub use errors::*;
pub use filename::*;
pub use parsed_url::*;
pub use text::*;
pub use traits::*;
pub use url::*;
