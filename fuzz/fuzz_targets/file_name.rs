//! Fuzz target for file name sanitization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrubkit_validation::sanitize_file_name_basic;

fuzz_target!(|input: &str| {
    if let Ok(name) = sanitize_file_name_basic(input) {
        assert!(name.len() <= 255);
        assert!(name.contains('.'));
        assert!(!name.contains(".."));
        assert!(!name.contains('/') && !name.contains('\\'));
        assert_eq!(sanitize_file_name_basic(&name), Ok(name.clone()));
    }
});
