pub mod filter;
pub mod greeting;

use sha2::{ Digest, Sha256 };

pub use filter::{ filter_restricted_terms, RESTRICTED_TERMS };
pub use greeting::{ is_greeting, time_based_greeting, GREETINGS };

pub const DEFAULT_BRAND_NAME: &str = "ShaktiMaangPT";
pub const DEFAULT_TRAINING_MESSAGE: &str =
    "We are currently training the system to serve you better. Please try again later.";

/// Content-derived response id: the first 8 bytes of SHA-256(text), hex encoded.
///
/// Identical texts always share an id, so it must not be used as a key.
pub fn content_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(&digest[..8])
}

pub fn liveness_message(brand: &str) -> String {
    format!("Welcome to the {} backend! API is live and ready to assist you.", brand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_is_sixteen_hex_chars() {
        let id = content_id("Good morning! How can I assist you today?");
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn content_id_depends_only_on_text() {
        assert_eq!(content_id("same text"), content_id("same text"));
        assert_ne!(content_id("same text"), content_id("other text"));
    }

    #[test]
    fn content_id_of_empty_text_matches_sha256_prefix() {
        // SHA-256("") = e3b0c44298fc1c14...
        assert_eq!(content_id(""), "e3b0c44298fc1c14");
    }

    #[test]
    fn liveness_message_names_the_brand() {
        assert_eq!(
            liveness_message("ShaktiMaangPT"),
            "Welcome to the ShaktiMaangPT backend! API is live and ready to assist you."
        );
    }
}
