//! Address Tests: validation and formatting through the public API
//!
//! 1. Known-good address validates and formats
//! 2. Short address is rejected by both helpers
//! 3. Prefix, length and alphabet are each necessary
//! 4. format_address is defined exactly where validate_address holds

use mina_connect::core::address::{ADDRESS_LEN, ADDRESS_PREFIX, BASE58_ALPHABET};
use mina_connect::{format_address, validate_address, WalletError};

const VALID: &str = "B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s";

fn expected_format(address: &str) -> String {
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[test]
fn valid_address_end_to_end() {
    assert_eq!(VALID.len(), 55);
    assert!(validate_address(VALID));
    assert_eq!(format_address(VALID).expect("format"), "B62qjV...PZ9s");
    assert_eq!(format_address(VALID).expect("format"), expected_format(VALID));
}

#[test]
fn short_address_end_to_end() {
    assert!(!validate_address("B62qshort"));
    match format_address("B62qshort") {
        Err(WalletError::InvalidInput(input)) => assert_eq!(input, "B62qshort"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn each_requirement_is_independently_necessary() {
    // Generated address: correct in every respect
    let body: String = BASE58_ALPHABET
        .chars()
        .rev()
        .cycle()
        .take(ADDRESS_LEN - ADDRESS_PREFIX.len())
        .collect();
    let base = format!("{}{}", ADDRESS_PREFIX, body);
    assert!(validate_address(&base));

    // Break only the prefix
    let bad_prefix = format!("C62q{}", body);
    assert_eq!(bad_prefix.len(), ADDRESS_LEN);
    assert!(!validate_address(&bad_prefix));

    // Break only the length
    assert!(!validate_address(&base[..ADDRESS_LEN - 1]));
    assert!(!validate_address(&format!("{}z", base)));

    // Break only the alphabet
    let bad_alphabet = format!("{}0{}", &base[..30], &base[31..]);
    assert_eq!(bad_alphabet.len(), ADDRESS_LEN);
    assert!(!validate_address(&bad_alphabet));
}

#[test]
fn formatter_domain_matches_validator() {
    let candidates = [
        VALID.to_string(),
        "B62qshort".to_string(),
        String::new(),
        VALID.to_lowercase(),
        VALID.replace('V', "O"),
        format!(" {}", &VALID[1..]),
        format!("{}1", &VALID[..ADDRESS_LEN - 1]),
        "B62q".repeat(14)[..ADDRESS_LEN].to_string(),
    ];

    for candidate in &candidates {
        let formatted = format_address(candidate);
        assert_eq!(formatted.is_ok(), validate_address(candidate), "candidate {:?}", candidate);
        if let Ok(short) = formatted {
            assert_eq!(short, expected_format(candidate));
            assert_eq!(short.len(), 13);
        }
    }
}
