//! Integration tests for common scrubkit workflows.
//!
//! These tests go through the facade crate the way an application would.

use scrubkit::prelude::*;
use scrubkit::{ConfigManager, ProtocolAllowList};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Form Input Tests
// =============================================================================

#[test]
fn test_sanitize_signup_form() {
    init_tracing();

    let name = escape_plain_text("  Jane   <b>Doe</b>!! ", &NoHook);
    let email = sanitize_email(" Jane.Doe@Example.COM ", &NoHook).unwrap();
    let website = sanitize_url("janedoe.dev/about?ref=signup").unwrap();
    let bio = html_sanitize_basic("<b>Hi</b><script>steal()</script>");

    assert_eq!(name, "Jane bDoeb");
    assert_eq!(email, "Jane.Doe@Example.COM");
    assert_eq!(website, "http://janedoe.dev/about?ref=signup");
    assert_eq!(bio, "<b>Hi</b>steal()");
}

#[test]
fn test_upload_file_name() {
    init_tracing();

    let only_pdf = |name: String| -> Result<String, SanitizeError> {
        if name.ends_with(".pdf") {
            Ok(name)
        } else {
            Err(SanitizeError::hook("only PDF uploads are accepted"))
        }
    };

    assert_eq!(
        sanitize_file_name("Quarterly Report (Q3) final.pdf", &only_pdf).unwrap(),
        "Quarterly-Report-Q3-final.pdf"
    );
    assert_eq!(
        sanitize_file_name("notes.docx", &only_pdf).unwrap_err(),
        SanitizeError::hook("only PDF uploads are accepted")
    );
    assert_eq!(
        sanitize_file_name("Café menu.pdf", &only_pdf).unwrap(),
        "Cafe-menu.pdf"
    );
}

#[test]
fn test_error_kinds_drive_responses() {
    let status = |err: &SanitizeError| match err.kind() {
        ErrorKind::InvalidFormat | ErrorKind::LengthViolation => 400,
        ErrorKind::PolicyViolation | ErrorKind::TraversalDetected => 403,
        ErrorKind::HookRejection => 422,
    };

    assert_eq!(status(&sanitize_url("javascript:alert(1)").unwrap_err()), 403);
    assert_eq!(status(&sanitize_url("https://example.com/%").unwrap_err()), 400);
    assert_eq!(
        status(&scrubkit::sanitize_email_basic("x@y").unwrap_err()),
        400
    );
}

// =============================================================================
// Configured Sanitizer Tests
// =============================================================================

#[test]
fn test_sanitizer_from_manager() {
    init_tracing();

    let mut config = ConfigManager::new().build().unwrap();
    config.url.allowed_protocols = ProtocolAllowList::new(["https"]);
    config.html.enforce_attributes = true;

    let sanitizer = Sanitizer::from_config(&config).unwrap();

    assert!(sanitizer.sanitize_url("http://example.com").is_err());
    assert_eq!(
        sanitizer.sanitize_html(r#"<a href="javascript:x()" onclick="y()">go</a>"#),
        "<a>go</a>"
    );
    assert_eq!(
        sanitizer.sanitize_html(r#"<img src="/a.png" onerror="y()">"#),
        r#"<img src="/a.png">"#
    );
}

#[test]
fn test_attribute_passthrough_is_default() {
    let sanitizer = Sanitizer::new();
    let html = r#"<a href="javascript:x()">go</a>"#;

    assert_eq!(sanitizer.sanitize_html(html), html);
}

#[test]
fn test_sanitizer_shared_across_threads() {
    let sanitizer = Arc::new(Sanitizer::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let sanitizer = Arc::clone(&sanitizer);
            thread::spawn(move || {
                sanitizer
                    .sanitize_file_name(&format!("report {}.txt", i), &NoHook)
                    .unwrap()
            })
        })
        .collect();

    let names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        names,
        vec!["report-0.txt", "report-1.txt", "report-2.txt", "report-3.txt"]
    );
}

// =============================================================================
// URL Hook Tests
// =============================================================================

#[test]
fn test_url_hook_pipeline() {
    let enforce_https = |mut url: ParsedUrl| -> Result<ParsedUrl, SanitizeError> {
        if url.has_query_key("tracking_id") {
            return Err(SanitizeError::hook("tracking parameters are not allowed"));
        }
        url.scheme = "https".to_string();
        Ok(url)
    };

    assert_eq!(
        escape_url("http://example.com/a?b=c d", UrlContext::Display, &enforce_https).unwrap(),
        "https://example.com/a?b=c%20d"
    );
    assert_eq!(
        escape_url("http://example.com/?tracking_id=1", "display", &enforce_https)
            .unwrap_err()
            .kind(),
        ErrorKind::HookRejection
    );
}

#[test]
fn test_relative_urls_pass_through() {
    assert_eq!(sanitize_url("/docs?page=2").unwrap(), "/docs?page=2");
    assert_eq!(sanitize_url("#top").unwrap(), "#top");
}
