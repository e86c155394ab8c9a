//! SHA-256 digest helper.

use sha2::{Digest, Sha256};

/// Hash `input` with SHA-256 and return the lowercase hex encoding.
pub fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // FIPS 180-2 test vector for "abc".
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_input_has_a_digest() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn output_is_lowercase_hex_of_fixed_length() {
        let d = sha256_hex("secret123");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn deterministic_and_distinct() {
        assert_eq!(sha256_hex("pw1"), sha256_hex("pw1"));
        assert_ne!(sha256_hex("pw1"), sha256_hex("pw2"));
    }
}
