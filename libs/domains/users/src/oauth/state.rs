use std::time::Duration;

use oauth2::{CsrfToken, PkceCodeChallenge};

/// Cookie carrying the pending sign-in between redirect and callback
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// How long a started sign-in may take to come back
pub const STATE_TTL: Duration = Duration::from_secs(600);

/// CSRF `state` and PKCE verifier of one sign-in attempt.
///
/// Both halves are base64url, so `.` is a safe separator in the cookie value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthState {
    pub csrf: String,
    pub pkce_verifier: String,
}

impl OAuthState {
    pub fn generate() -> Self {
        let (_challenge, verifier) = PkceCodeChallenge::new_random_sha256();
        Self {
            csrf: CsrfToken::new_random().secret().clone(),
            pkce_verifier: verifier.secret().clone(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}.{}", self.csrf, self.pkce_verifier)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let (csrf, pkce_verifier) = raw.split_once('.')?;
        if csrf.is_empty() || pkce_verifier.is_empty() {
            return None;
        }
        Some(Self {
            csrf: csrf.to_string(),
            pkce_verifier: pkce_verifier.to_string(),
        })
    }

    /// Compare the callback's `state` in time independent of where it differs.
    pub fn matches(&self, returned: &str) -> bool {
        let expected = self.csrf.as_bytes();
        let returned = returned.as_bytes();
        expected.len() == returned.len()
            && expected
                .iter()
                .zip(returned)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_states_are_unique() {
        let a = OAuthState::generate();
        let b = OAuthState::generate();
        assert_ne!(a.csrf, b.csrf);
        assert_ne!(a.pkce_verifier, b.pkce_verifier);
        assert!(!a.csrf.contains('.'));
        assert!(!a.pkce_verifier.contains('.'));
    }

    #[test]
    fn test_cookie_value_decodes_back() {
        let state = OAuthState::generate();
        assert_eq!(OAuthState::decode(&state.encode()), Some(state));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(OAuthState::decode(""), None);
        assert_eq!(OAuthState::decode("no-separator"), None);
        assert_eq!(OAuthState::decode(".verifier"), None);
        assert_eq!(OAuthState::decode("csrf."), None);
    }

    #[test]
    fn test_matches() {
        let state = OAuthState {
            csrf: "abc123".into(),
            pkce_verifier: "v".into(),
        };
        assert!(state.matches("abc123"));
        assert!(!state.matches("abc124"));
        assert!(!state.matches("abc12"));
        assert!(!state.matches(""));
    }
}
