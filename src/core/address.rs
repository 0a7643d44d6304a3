//! Mina address helpers
//!
//! Validation is lexical only: prefix, length and base-58 alphabet. No
//! checksum is decoded, so a typo that stays inside the alphabet passes.
//!
//! # Example
//!
//! ```
//! use mina_connect::{format_address, validate_address};
//!
//! let addr = "B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s";
//! assert!(validate_address(addr));
//! assert_eq!(format_address(addr).unwrap(), "B62qjV...PZ9s");
//! ```

use crate::error::{WalletError, WalletResult};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ADDRESS_PREFIX: &str = "B62q";
pub const ADDRESS_LEN: usize = 55;

/// Base-58 symbols: no `0`, `O`, `I` or `l`.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const HEAD: usize = 6;
const TAIL: usize = 4;
const ELLIPSIS: &str = "...";

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^B62q[1-9A-HJ-NP-Za-km-z]{51}$").expect("static address pattern")
});

/// Structural check of a Mina public key address. Never fails.
pub fn validate_address(address: &str) -> bool {
    address.len() == ADDRESS_LEN
        && address.starts_with(ADDRESS_PREFIX)
        && ADDRESS_RE.is_match(address)
}

/// Shorten a valid address to `B62qjV...PZ9s`.
pub fn format_address(address: &str) -> WalletResult<String> {
    if !validate_address(address) {
        return Err(WalletError::InvalidInput(address.to_string()));
    }
    // Validated input is ASCII, byte slicing is on char boundaries.
    Ok(format!(
        "{}{}{}",
        &address[..HEAD],
        ELLIPSIS,
        &address[address.len() - TAIL..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s";

    #[test]
    fn test_known_address_is_valid() {
        assert_eq!(VALID.len(), ADDRESS_LEN);
        assert!(validate_address(VALID));
    }

    #[test]
    fn test_format_known_address() {
        let formatted = format_address(VALID).expect("valid address");
        assert_eq!(formatted, "B62qjV...PZ9s");
        assert_eq!(formatted, format!("{}...{}", &VALID[..6], &VALID[VALID.len() - 4..]));
    }

    #[test]
    fn test_short_address_rejected() {
        assert!(!validate_address("B62qshort"));
        assert_eq!(
            format_address("B62qshort"),
            Err(WalletError::InvalidInput("B62qshort".to_string()))
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(!validate_address(""));
        assert!(format_address("").is_err());
    }

    #[test]
    fn test_length_check_is_necessary() {
        // Right prefix and alphabet, one symbol too many / too few
        let long = format!("{}a", VALID);
        let short = &VALID[..ADDRESS_LEN - 1];
        assert!(!validate_address(&long));
        assert!(!validate_address(short));
    }

    #[test]
    fn test_prefix_check_is_necessary() {
        // Same length and alphabet, different prefix
        let swapped = format!("B62r{}", &VALID[4..]);
        assert_eq!(swapped.len(), ADDRESS_LEN);
        assert!(!validate_address(&swapped));
    }

    #[test]
    fn test_alphabet_check_is_necessary() {
        for bad in ['0', 'O', 'I', 'l', '-', ' '] {
            let mut candidate = VALID.to_string();
            candidate.replace_range(20..21, &bad.to_string());
            assert_eq!(candidate.len(), ADDRESS_LEN);
            assert!(!validate_address(&candidate), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_multibyte_rejected_without_panic() {
        let mut candidate = VALID[..ADDRESS_LEN - 2].to_string();
        candidate.push('é');
        assert_eq!(candidate.len(), ADDRESS_LEN);
        assert!(!validate_address(&candidate));
        assert!(format_address(&candidate).is_err());
    }

    #[test]
    fn test_every_alphabet_symbol_accepted() {
        let body: String = BASE58_ALPHABET.chars().cycle().take(ADDRESS_LEN - ADDRESS_PREFIX.len()).collect();
        let candidate = format!("{}{}", ADDRESS_PREFIX, body);
        assert!(validate_address(&candidate));
    }
}
