//! Access token extraction.
//!
//! After authorizing in the browser the user is redirected to a URL whose
//! fragment carries the token (`...#token=<hex>`). Users may paste either that
//! URL or the bare token.

use log::*;
use regex::Regex;

const FRAGMENT_PATTERN: &str = r"[#&]token=([0-9A-Za-z]+)";
const BARE_PATTERN: &str = r"^[0-9A-Za-z]{32,}$";

/// Extract the access token from a pasted redirect URL or a bare token.
///
/// Returns `None` if the input holds neither.
///
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    for pattern in [FRAGMENT_PATTERN, BARE_PATTERN] {
        let re = match Regex::new(pattern) {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to compile regex pattern '{}': {}", pattern, e);
                continue;
            }
        };
        let token = re.captures(input).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_string())
        });
        if token.is_some() {
            return token;
        }
    }
    debug!("No token found in input of {} characters", input.len());
    None
}
