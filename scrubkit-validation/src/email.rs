// Email address sanitizer

use crate::traits::{EmailRefiner, NoHook};
use crate::{Result, SanitizeError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Shortest address accepted, in bytes
pub const MIN_EMAIL_LENGTH: usize = 6;

static QUOTED_LOCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 !#$%&'*+/=?^_`{|}~.@]+$").unwrap());

static UNQUOTED_LOCAL_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]").unwrap());

static LABEL_INVALID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9-]").unwrap());

static DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

static DEFAULT_SANITIZER: Lazy<EmailSanitizer> = Lazy::new(EmailSanitizer::new);

/// Email sanitizer with a configurable minimum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailSanitizer {
    min_length: usize,
}

impl EmailSanitizer {
    pub fn new() -> Self {
        Self {
            min_length: MIN_EMAIL_LENGTH,
        }
    }

    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Clean the local and domain parts of an address, then pass both to `hook`.
    ///
    /// Invalid characters are dropped rather than rejected; the call only
    /// fails when nothing usable is left. Sanitizing an address this
    /// function returned gives the same address back.
    pub fn sanitize<T>(&self, input: &str, hook: &T) -> Result<String>
    where
        T: EmailRefiner + ?Sized,
    {
        let input = input.trim();

        if input.len() < self.min_length {
            debug!(length = input.len(), "rejected email: too short");
            return Err(SanitizeError::TooShort {
                min: self.min_length,
                actual: input.len(),
            });
        }

        let at = match input.find('@') {
            Some(at) if at >= 1 => at,
            _ => return Err(SanitizeError::MissingAt),
        };

        let local = sanitize_local_part(&input[..at])?;
        let domain = sanitize_domain_part(&input[at + 1..])?;
        let (local, domain) = hook.refine(local, domain)?;

        // Dropped characters can leave an address shorter than the input
        let address = format!("{}@{}", local, domain);
        if address.len() < self.min_length {
            debug!(length = address.len(), "rejected email: too short after sanitization");
            return Err(SanitizeError::TooShort {
                min: self.min_length,
                actual: address.len(),
            });
        }

        Ok(address)
    }
}

impl Default for EmailSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize an email address with the default minimum length
pub fn sanitize_email<T>(input: &str, hook: &T) -> Result<String>
where
    T: EmailRefiner + ?Sized,
{
    DEFAULT_SANITIZER.sanitize(input, hook)
}

/// [`sanitize_email`] without a refiner
pub fn sanitize_email_basic(input: &str) -> Result<String> {
    sanitize_email(input, &NoHook)
}

fn sanitize_local_part(local: &str) -> Result<String> {
    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        let content = &local[1..local.len() - 1];
        if !QUOTED_LOCAL.is_match(content) {
            debug!("rejected email: invalid quoted local part");
            return Err(SanitizeError::InvalidLocalPart(
                "invalid characters in quoted local part".to_string(),
            ));
        }
        // Drop the quotes only when the bare form would survive unchanged
        return Ok(match clean_unquoted(content) {
            Some(bare) if bare == content => bare,
            _ => local.to_string(),
        });
    }

    clean_unquoted(local).ok_or_else(|| {
        debug!("rejected email: empty local part");
        SanitizeError::InvalidLocalPart("local part is empty after sanitization".to_string())
    })
}

fn clean_unquoted(local: &str) -> Option<String> {
    let cleaned = UNQUOTED_LOCAL_INVALID.replace_all(local, "");
    let cleaned = DOTS.replace_all(&cleaned, ".");
    let cleaned = cleaned.trim_matches('.');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn sanitize_domain_part(domain: &str) -> Result<String> {
    let domain = DOTS.replace_all(domain, ".");
    let domain = domain.trim_matches(|c: char| c == '.' || c == '-');
    if domain.is_empty() {
        return Err(SanitizeError::InvalidDomain(
            "domain is empty after sanitization".to_string(),
        ));
    }

    let mut labels: Vec<String> = domain
        .split('.')
        .map(|label| LABEL_INVALID.replace_all(label, "").into_owned())
        .collect();

    if labels.len() < 2 {
        return Err(SanitizeError::InvalidDomain(
            "domain must contain at least two labels".to_string(),
        ));
    }

    // Stripping can expose a hyphen at either end of the domain
    if let Some(first) = labels.first_mut() {
        *first = first.trim_start_matches('-').to_string();
    }
    if let Some(last) = labels.last_mut() {
        *last = last.trim_end_matches('-').to_string();
    }

    if labels.iter().any(String::is_empty) {
        debug!("rejected email: empty domain label");
        return Err(SanitizeError::InvalidDomain(
            "empty label after sanitization".to_string(),
        ));
    }

    Ok(labels.join("."))
}
