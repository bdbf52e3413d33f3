// Hook capability traits

use crate::{ParsedUrl, Result};

/// Supplies extra characters the plain-text escaper should keep.
pub trait TextExpander {
    /// Characters allowed in addition to ASCII alphanumerics and whitespace.
    /// Called once per escape.
    fn extra_chars(&self) -> Vec<char>;
}

/// Customizes or rejects a URL after built-in validation and before
/// query, path and fragment normalization.
pub trait UrlTransformer {
    fn transform(&self, url: ParsedUrl) -> Result<ParsedUrl>;
}

/// Refines the sanitized local and domain parts of an email address.
pub trait EmailRefiner {
    fn refine(&self, local: String, domain: String) -> Result<(String, String)>;
}

/// Validates or rewrites a sanitized file name.
pub trait NameValidator {
    fn validate_name(&self, name: String) -> Result<String>;
}

/// The absent hook: adds nothing and passes everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHook;

impl TextExpander for NoHook {
    fn extra_chars(&self) -> Vec<char> {
        Vec::new()
    }
}

impl UrlTransformer for NoHook {
    fn transform(&self, url: ParsedUrl) -> Result<ParsedUrl> {
        Ok(url)
    }
}

impl EmailRefiner for NoHook {
    fn refine(&self, local: String, domain: String) -> Result<(String, String)> {
        Ok((local, domain))
    }
}

impl NameValidator for NoHook {
    fn validate_name(&self, name: String) -> Result<String> {
        Ok(name)
    }
}

impl<F> TextExpander for F
where
    F: Fn() -> Vec<char>,
{
    fn extra_chars(&self) -> Vec<char> {
        self()
    }
}

impl<F> UrlTransformer for F
where
    F: Fn(ParsedUrl) -> Result<ParsedUrl>,
{
    fn transform(&self, url: ParsedUrl) -> Result<ParsedUrl> {
        self(url)
    }
}

impl<F> EmailRefiner for F
where
    F: Fn(String, String) -> Result<(String, String)>,
{
    fn refine(&self, local: String, domain: String) -> Result<(String, String)> {
        self(local, domain)
    }
}

impl<F> NameValidator for F
where
    F: Fn(String) -> Result<String>,
{
    fn validate_name(&self, name: String) -> Result<String> {
        self(name)
    }
}

impl TextExpander for [char] {
    fn extra_chars(&self) -> Vec<char> {
        self.to_vec()
    }
}

impl TextExpander for str {
    fn extra_chars(&self) -> Vec<char> {
        self.chars().collect()
    }
}
