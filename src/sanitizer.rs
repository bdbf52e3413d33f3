use scrubkit_config::{ConfigError, SanitizerConfig, Validate};
use scrubkit_validation::{
    EmailRefiner, EmailSanitizer, FileNameSanitizer, NameValidator, NoHook, Result, TextExpander,
    UrlContext, UrlSanitizer, UrlTransformer, escape_plain_text,
};
use scrubkit_xss::HtmlSanitizer;
use tracing::debug;

/// All sanitizers, configured once from a [`SanitizerConfig`].
///
/// The settings cannot change after construction, so one instance can be
/// shared freely across threads.
///
/// ```
/// use scrubkit::{NoHook, Sanitizer, SanitizerConfig, UrlContext};
///
/// let mut config = SanitizerConfig::default();
/// config.url.allowed_protocols = scrubkit::ProtocolAllowList::new(["https"]);
///
/// let sanitizer = Sanitizer::from_config(&config).unwrap();
/// assert!(sanitizer.escape_url("http://example.com", UrlContext::Raw, &NoHook).is_err());
/// assert_eq!(
///     sanitizer.escape_url("https://example.com", UrlContext::Raw, &NoHook).unwrap(),
///     "https://example.com"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Sanitizer {
    url: UrlSanitizer,
    html: HtmlSanitizer,
    email: EmailSanitizer,
    file: FileNameSanitizer,
}

impl Sanitizer {
    /// Sanitizer with the built-in defaults
    pub fn new() -> Self {
        Self {
            url: UrlSanitizer::new(),
            html: HtmlSanitizer::new(),
            email: EmailSanitizer::new(),
            file: FileNameSanitizer::new(),
        }
    }

    /// Validate `config` and build a sanitizer from it
    pub fn from_config(config: &SanitizerConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        debug!(
            url_protocols = config.url.allowed_protocols.len(),
            html_tags = config.html.allowed_tags.len(),
            enforce_attributes = config.html.enforce_attributes,
            "building sanitizer"
        );

        Ok(Self {
            url: UrlSanitizer::with_protocols(config.url.allowed_protocols.clone()),
            html: HtmlSanitizer::new()
                .with_policy(config.html.allowed_tags.clone())
                .with_protocols(config.html.allowed_protocols.clone())
                .with_attribute_mode(config.html.attribute_mode()),
            email: EmailSanitizer::with_min_length(config.email.min_length),
            file: FileNameSanitizer::with_max_length(config.file.max_name_length),
        })
    }

    pub fn escape_url<T>(&self, input: &str, context: UrlContext, hook: &T) -> Result<String>
    where
        T: UrlTransformer + ?Sized,
    {
        self.url.escape(input, context, hook)
    }

    /// URL for HTML display, without a hook
    pub fn sanitize_url(&self, input: &str) -> Result<String> {
        self.url.escape(input, UrlContext::Display, &NoHook)
    }

    pub fn sanitize_html(&self, content: &str) -> String {
        self.html.sanitize(content)
    }

    pub fn sanitize_email<T>(&self, input: &str, hook: &T) -> Result<String>
    where
        T: EmailRefiner + ?Sized,
    {
        self.email.sanitize(input, hook)
    }

    pub fn sanitize_file_name<T>(&self, input: &str, hook: &T) -> Result<String>
    where
        T: NameValidator + ?Sized,
    {
        self.file.sanitize(input, hook)
    }

    pub fn escape_plain_text<T>(&self, input: &str, hook: &T) -> String
    where
        T: TextExpander + ?Sized,
    {
        escape_plain_text(input, hook)
    }

    pub fn url(&self) -> &UrlSanitizer {
        &self.url
    }

    pub fn html(&self) -> &HtmlSanitizer {
        &self.html
    }

    pub fn email(&self) -> &EmailSanitizer {
        &self.email
    }

    pub fn file(&self) -> &FileNameSanitizer {
        &self.file
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
