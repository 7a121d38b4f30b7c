//! Email verification tokens and links.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Random bytes behind each verification token.
pub const TOKEN_BYTES: usize = 48;

/// Fresh single-use token, URL-safe base64 without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Link the user follows to confirm their address.
pub fn verify_url(public_base_url: &str, token: &str) -> String {
    format!("{}/auth/verify/{token}", public_base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_url_safe_and_unpadded() {
        let token = generate_token();
        // 48 bytes encode to exactly 64 characters
        assert_eq!(token.len(), 64);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, generate_token());
    }

    #[test]
    fn verify_url_joins_base_and_token() {
        assert_eq!(
            verify_url("http://localhost:3000/", "abc"),
            "http://localhost:3000/auth/verify/abc"
        );
        assert_eq!(
            verify_url("https://board.example.com", "xyz"),
            "https://board.example.com/auth/verify/xyz"
        );
    }
}
