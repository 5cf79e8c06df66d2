//! CSRF state token generation and validation
//!
//! State tokens tie an authorization request to its redirect callback. They
//! are random, URL-safe, and compared by exact match only.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;

/// Generate a random state token for CSRF protection
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43
/// characters).
#[must_use]
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Validate that the state token matches
///
/// # Arguments
/// * `expected` - The state that was sent in the authorization request
/// * `actual` - The state received in the callback
///
/// # Returns
/// `true` if states match, `false` otherwise
#[must_use]
pub fn validate_state(expected: &str, actual: &str) -> bool {
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_states_are_unique_and_url_safe() {
        let state1 = generate_state();
        let state2 = generate_state();

        assert_ne!(state1, state2);
        assert!(state1.len() >= 43);
        assert!(state1.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn validation_is_exact_match_only() {
        let state = generate_state();

        assert!(validate_state(&state, &state));
        assert!(!validate_state(&state, "other"));
        assert!(!validate_state(&state, &state[..state.len() - 1]));
    }
}
