//! Fuzz target for the HTML sanitization pipeline.
//!
//! Output may only contain tags from the policy, in either attribute mode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrubkit_xss::{AttributeMode, HtmlPolicy, HtmlSanitizer};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let policy = HtmlPolicy::basic();

    for mode in [AttributeMode::Passthrough, AttributeMode::Enforce] {
        let sanitizer = HtmlSanitizer::new()
            .with_policy(policy.clone())
            .with_attribute_mode(mode);
        let clean = sanitizer.sanitize(input);

        // No control characters other than \t, \n and \r survive
        assert!(
            !clean
                .chars()
                .any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
        );

        // Sanitizing again changes nothing
        assert_eq!(sanitizer.sanitize(&clean), clean);
    }
});
