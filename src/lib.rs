// scrubkit - input sanitization toolkit
//
// Sanitizers for URLs, HTML fragments, email addresses, file names and
// plain text, with hooks for domain-specific rules.

// Re-export member crates
pub use scrubkit_config;
pub use scrubkit_validation;
pub use scrubkit_xss;

pub use scrubkit_config::{ConfigError, ConfigManager, SanitizerConfig};
pub use scrubkit_validation::{
    EmailRefiner, EmailSanitizer, ErrorKind, FileNameSanitizer, NameValidator, NoHook, ParsedUrl,
    Result, SanitizeError, TextExpander, UrlContext, UrlSanitizer, UrlTransformer, escape_plain_text,
    escape_url, sanitize_email, sanitize_email_basic, sanitize_file_name,
    sanitize_file_name_basic, sanitize_url,
};
pub use scrubkit_xss::{
    AttributeMode, Encoder, HtmlPolicy, HtmlSanitizer, ProtocolAllowList, html_sanitize_basic,
    is_allowed_protocol, safe_escape_html, sanitize_html,
};

pub mod must;
mod sanitizer;

pub use sanitizer::Sanitizer;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorKind,
        HtmlPolicy,
        NoHook,
        ParsedUrl,
        SanitizeError,
        Sanitizer,
        SanitizerConfig,
        UrlContext,
        escape_plain_text,
        escape_url,
        html_sanitize_basic,
        sanitize_email,
        sanitize_file_name,
        sanitize_html,
        sanitize_url,
    };
}
