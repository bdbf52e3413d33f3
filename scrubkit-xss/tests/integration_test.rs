//! Integration tests for scrubkit-xss

use proptest::prelude::*;
use scrubkit_xss::*;
use std::collections::HashMap;

#[test]
fn test_html_sanitizer_creation() {
    let sanitizer = HtmlSanitizer::new();
    assert!(format!("{:?}", sanitizer).contains("HtmlSanitizer"));
    assert_eq!(sanitizer.attribute_mode(), AttributeMode::Passthrough);
    assert_eq!(sanitizer.policy(), &HtmlPolicy::basic());
}

#[test]
fn test_script_stripped_inner_text_kept() {
    let policy = HtmlPolicy::new().allow_tag("b");
    assert_eq!(
        sanitize_html("<script>alert(1)</script>", &policy),
        "alert(1)"
    );
}

#[test]
fn test_only_policy_tags_survive() {
    let policy = HtmlPolicy::new().allow_tag("b");
    assert_eq!(sanitize_html("<b>ok</b><i>no</i>", &policy), "<b>ok</b>no");
    assert_eq!(
        html_sanitize_basic("<b>Bold</b> and <i>italic</i>"),
        "<b>Bold</b> and italic"
    );
}

#[test]
fn test_policy_from_hash_map() {
    let mut map = HashMap::new();
    map.insert("P".to_string(), None);
    map.insert("a".to_string(), Some(vec!["href".to_string()]));
    let policy = HtmlPolicy::from(map);

    assert_eq!(
        sanitize_html("<p>x</p><div>y</div>", &policy),
        "<p>x</p>y"
    );
}

#[test]
fn test_unbalanced_output_is_possible() {
    let policy = HtmlPolicy::new().allow_tag("b");
    assert_eq!(sanitize_html("<b><i>x</b></i>", &policy), "<b>x</b>");
    assert_eq!(sanitize_html("<b>open", &policy), "<b>open");
}

#[test]
fn test_full_pipeline_order() {
    let policy = HtmlPolicy::new().allow_tag("b");
    let dirty = "<b>Tom & Jerry</b>\x01<sc\\0ript>&amp;</script>";

    assert_eq!(sanitize_html(dirty, &policy), "<b>Tom &amp; Jerry</b>&amp;");
}

#[test]
fn test_deeply_nested_tags_are_neutralized() {
    let input = format!("{}{}", "<".repeat(20_000), "i>".repeat(20_000));

    let clean = html_sanitize_basic(&input);
    assert!(!clean.contains('<'));
    assert_eq!(html_sanitize_basic(&clean), clean);
}

#[test]
fn test_attribute_gap_is_reproduced_by_default() {
    let html = r#"<img src="x.png" onerror="alert(1)">"#;
    assert_eq!(html_sanitize_basic(html), html);
}

#[test]
fn test_attribute_enforcement() {
    let sanitizer = HtmlSanitizer::new()
        .with_policy(HtmlPolicy::basic())
        .with_attribute_mode(AttributeMode::Enforce);

    assert_eq!(
        sanitizer.sanitize(r#"<img src="x.png" onerror="alert(1)">"#),
        r#"<img src="x.png">"#
    );
    assert_eq!(
        sanitizer.sanitize(r#"<a HREF="data:text/html,hi">x</a>"#),
        "<a>x</a>"
    );
}

#[test]
fn test_enforcement_uses_configured_protocols() {
    let sanitizer = HtmlSanitizer::new()
        .with_protocols(ProtocolAllowList::new(["https"]))
        .with_attribute_mode(AttributeMode::Enforce);

    assert_eq!(
        sanitizer.sanitize(r#"<a href="http://example.com">x</a>"#),
        "<a>x</a>"
    );
    assert_eq!(
        sanitizer.sanitize(r#"<a href="https://example.com">x</a>"#),
        r#"<a href="https://example.com">x</a>"#
    );
}

#[test]
fn test_encoder_escapes_markup() {
    let text = r#"<script>alert("XSS")</script>"#;
    let encoded = Encoder::safe_escape_html(text);

    assert!(!encoded.contains('<'));
    assert!(!encoded.contains('>'));
    assert_eq!(encoded, "&lt;script&gt;alert(&quot;XSS&quot;)&lt;/script&gt;");
    assert_eq!(Encoder::encode_url_component("<x y>"), "%3Cx%20y%3E");
}

#[test]
fn test_safe_escape_html_leaves_percent() {
    assert_eq!(
        safe_escape_html(r#"http://x.com/?q=%3C&r='"'"#),
        "http://x.com/?q=%3C&amp;r=&#39;&quot;&#39;"
    );
}

proptest! {
    #[test]
    fn prop_allow_list_is_reflexive(scheme in "[a-zA-Z][a-zA-Z0-9+.-]{0,15}") {
        prop_assert!(is_allowed_protocol(&scheme, &[scheme.as_str()]));
    }

    #[test]
    fn prop_allow_list_ignores_case(scheme in "[a-zA-Z][a-zA-Z0-9+.-]{0,15}") {
        let upper = scheme.to_ascii_uppercase();
        let lower = scheme.to_ascii_lowercase();
        prop_assert!(is_allowed_protocol(&upper, &[lower.as_str()]));
        prop_assert!(is_allowed_protocol(&lower, &[upper.as_str()]));
    }

    #[test]
    fn prop_sanitized_html_has_no_disallowed_tags(input in ".{0,200}") {
        let policy = HtmlPolicy::new().allow_tag("b");
        let clean = sanitize_html(&input, &policy);

        for tag in regex::Regex::new(r"<(/?[a-zA-Z][^>]*)>").unwrap().find_iter(&clean) {
            let name = tag.as_str()
                .trim_matches(|c: char| matches!(c, '<' | '>' | '/'))
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_ascii_lowercase();
            prop_assert_eq!(name, "b");
        }
    }
}
