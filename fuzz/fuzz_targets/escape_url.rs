//! Fuzz target for the URL sanitization pipeline.
//!
//! Accepted URLs must use an allowed scheme and never contain raw brackets.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrubkit_validation::{NoHook, UrlContext, escape_url};

#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    input: String,
    display: bool,
}

fuzz_target!(|data: FuzzUrl| {
    let context = if data.display {
        UrlContext::Display
    } else {
        UrlContext::Raw
    };

    let Ok(clean) = escape_url(&data.input, context, &NoHook) else {
        return;
    };

    // Relative references come back exactly as given
    if data.input.trim().starts_with(['/', '#', '?']) {
        return;
    }

    assert!(!clean.contains('[') && !clean.contains(']'));

    if data.display {
        assert!(!clean.contains('<') && !clean.contains('"') && !clean.contains('\''));
    }

    if !clean.is_empty() {
        let scheme = clean.split(':').next().unwrap_or("");
        assert!(
            ["http", "https", "mailto", "ftp"].contains(&scheme),
            "unexpected scheme in {clean:?}"
        );
    }
});
