// Plain-text escaper

use crate::traits::TextExpander;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\x0C\r ]+").unwrap());

/// Reduce `input` to ASCII letters, digits and single spaces, plus any
/// characters `hook` adds.
///
/// The result is trimmed and every whitespace run is a single space, so
/// escaping it again changes nothing.
///
/// ```
/// use scrubkit_validation::{NoHook, escape_plain_text};
///
/// assert_eq!(escape_plain_text("  Hello,\n\tworld! ", &NoHook), "Hello world");
/// assert_eq!(escape_plain_text("me@host.io", "@."), "me@host.io");
/// ```
pub fn escape_plain_text<T>(input: &str, hook: &T) -> String
where
    T: TextExpander + ?Sized,
{
    let extra = hook.extra_chars();

    let collapsed = WHITESPACE.replace_all(input.trim(), " ");
    let kept: String = collapsed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || is_space(*c) || extra.contains(c))
        .collect();

    WHITESPACE.replace_all(&kept, " ").trim().to_string()
}

fn is_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}
