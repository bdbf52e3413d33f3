// File name sanitizer

use crate::traits::{NameValidator, NoHook};
use crate::{Result, SanitizeError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Longest file name accepted, in bytes
pub const MAX_FILE_NAME_LENGTH: usize = 255;

static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"[?\[\]/\\=<>:;,'"&$#*()|~`!{}%@‘«»”“]"##).unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\x0C\r ]+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static HYPHEN_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\.").unwrap());
static DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());
static SAFE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap());

static DEFAULT_SANITIZER: Lazy<FileNameSanitizer> = Lazy::new(FileNameSanitizer::new);

/// File name sanitizer with a configurable maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileNameSanitizer {
    max_length: usize,
}

impl FileNameSanitizer {
    pub fn new() -> Self {
        Self {
            max_length: MAX_FILE_NAME_LENGTH,
        }
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Reduce `input` to a portable `name.ext` file name.
    ///
    /// Accents are stripped, separators and shell metacharacters removed
    /// and runs of `-`, `.` and `_` collapsed. The result, after `hook`,
    /// must consist of ASCII letters, digits, `.`, `-` and `_`.
    pub fn sanitize<T>(&self, input: &str, hook: &T) -> Result<String>
    where
        T: NameValidator + ?Sized,
    {
        let name = normalize(input);

        if name.len() > self.max_length {
            debug!(length = name.len(), max = self.max_length, "rejected file name: too long");
            return Err(SanitizeError::TooLong {
                max: self.max_length,
                actual: name.len(),
            });
        }

        if !name.contains('.') {
            return Err(SanitizeError::MissingExtension);
        }

        if name.contains("..") {
            debug!("rejected file name: traversal sequence");
            return Err(SanitizeError::TraversalDetected);
        }

        let name = hook.validate_name(name)?;

        if !SAFE_NAME.is_match(&name) {
            debug!("rejected file name: invalid characters");
            return Err(SanitizeError::InvalidCharacters(name));
        }

        Ok(name)
    }
}

impl Default for FileNameSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize a file name with the default maximum length
pub fn sanitize_file_name<T>(input: &str, hook: &T) -> Result<String>
where
    T: NameValidator + ?Sized,
{
    DEFAULT_SANITIZER.sanitize(input, hook)
}

/// [`sanitize_file_name`] without a validator
pub fn sanitize_file_name_basic(input: &str) -> Result<String> {
    sanitize_file_name(input, &NoHook)
}

fn normalize(input: &str) -> String {
    let name = strip_accents(input.trim()).replace('+', "-");
    let name = SPECIAL_CHARS.replace_all(&name, "");
    let name = WHITESPACE.replace_all(&name, "-");
    let name = HYPHENS.replace_all(&name, "-");
    let name = HYPHEN_DOT.replace_all(&name, ".");
    let name = DOTS.replace_all(&name, ".");
    let name = UNDERSCORES.replace_all(&name, "_");
    name.trim_matches(|c: char| matches!(c, '.' | '-' | '_')).to_string()
}

/// `é` -> `e`: decompose, drop combining marks, recompose
fn strip_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_cleanup() {
        assert_eq!(
            sanitize_file_name_basic("  example  .txt  ").unwrap(),
            "example.txt"
        );
        assert_eq!(
            sanitize_file_name_basic("my--file..name..pdf").unwrap(),
            "my-file.name.pdf"
        );
        assert_eq!(
            sanitize_file_name_basic("my file (1).tar.gz").unwrap(),
            "my-file-1.tar.gz"
        );
        assert_eq!(sanitize_file_name_basic("a+b__c.txt").unwrap(), "a-b_c.txt");
    }

    #[test]
    fn test_accents_stripped() {
        assert_eq!(sanitize_file_name_basic("résumé.pdf").unwrap(), "resume.pdf");
        assert!(matches!(
            sanitize_file_name_basic("Über Straße.doc"),
            Err(SanitizeError::InvalidCharacters(_))
        ));
    }

    #[test]
    fn test_length_boundary() {
        let ok = format!("{}.txt", "a".repeat(251));
        assert_eq!(sanitize_file_name_basic(&ok).unwrap(), ok);

        let long = format!("{}.txt", "a".repeat(252));
        assert_eq!(
            sanitize_file_name_basic(&long).unwrap_err(),
            SanitizeError::TooLong { max: 255, actual: 256 }
        );
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(
            sanitize_file_name_basic("README").unwrap_err(),
            SanitizeError::MissingExtension
        );
        assert_eq!(
            sanitize_file_name_basic(".bashrc").unwrap_err(),
            SanitizeError::MissingExtension
        );
    }

    #[test]
    fn test_path_separators_removed() {
        assert_eq!(
            sanitize_file_name_basic("../../etc/passwd").unwrap_err(),
            SanitizeError::MissingExtension
        );
        assert_eq!(
            sanitize_file_name_basic("..\\..\\boot.ini").unwrap(),
            "boot.ini"
        );
    }

    #[test]
    fn test_hook_output_is_checked() {
        let bad = |name: String| -> Result<String> { Ok(format!("{}/x", name)) };
        assert!(matches!(
            sanitize_file_name("a.txt", &bad),
            Err(SanitizeError::InvalidCharacters(_))
        ));

        let upper = |name: String| -> Result<String> { Ok(name.to_uppercase()) };
        assert_eq!(sanitize_file_name("a.txt", &upper).unwrap(), "A.TXT");
    }

    #[test]
    fn test_custom_max_length() {
        let sanitizer = FileNameSanitizer::with_max_length(8);
        assert!(sanitizer.sanitize("abcd.txt", &NoHook).is_ok());
        assert!(matches!(
            sanitizer.sanitize("abcde.txt", &NoHook),
            Err(SanitizeError::TooLong { .. })
        ));
    }
}
