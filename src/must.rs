//! Fail-fast variants of the fallible sanitizers.
//!
//! Each function panics with the error's message instead of returning it.
//! Use them for trusted or constant input, where a failure is a bug.
//!
//! ```should_panic
//! scrubkit::must::sanitize_email_basic("not an email");
//! ```

use scrubkit_validation::{Result, UrlContext, UrlTransformer};

fn must<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| panic!("{}", e))
}

pub fn sanitize_email_basic(input: &str) -> String {
    must(scrubkit_validation::sanitize_email_basic(input))
}

pub fn sanitize_file_name_basic(input: &str) -> String {
    must(scrubkit_validation::sanitize_file_name_basic(input))
}

/// HTML sanitization never fails; provided so callers can use one module
pub fn html_sanitize_basic(input: &str) -> String {
    scrubkit_xss::html_sanitize_basic(input)
}

pub fn escape_url<T>(input: &str, context: impl Into<UrlContext>, hook: &T) -> String
where
    T: UrlTransformer + ?Sized,
{
    must(scrubkit_validation::escape_url(input, context, hook))
}

pub fn sanitize_url(input: &str) -> String {
    must(scrubkit_validation::sanitize_url(input))
}
