//! Simple data generators for tests

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

pub fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Unique-enough address for signup-style flows: timestamp plus random
/// suffix.
pub fn random_email() -> String {
    format!(
        "test-{}-{}@example.com",
        Utc::now().timestamp_millis(),
        random_string(6)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_string_has_requested_length() {
        assert_eq!(random_string(8).len(), 8);
        assert_eq!(random_string(0).len(), 0);
    }

    #[test]
    fn random_emails_are_well_formed_and_distinct() {
        let a = random_email();
        let b = random_email();
        assert!(a.starts_with("test-"));
        assert!(a.ends_with("@example.com"));
        assert_ne!(a, b);
    }
}
