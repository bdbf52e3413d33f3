//! Fuzz target for email sanitization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrubkit_validation::sanitize_email_basic;

fuzz_target!(|input: &str| {
    if let Ok(email) = sanitize_email_basic(input) {
        let (local, domain) = email.split_once('@').expect("sanitized email has '@'");
        assert!(!local.is_empty());
        assert!(domain.split('.').count() >= 2);
    }
});
