//! Blake2b-256 hashing for claim identifiers and committee draws.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    finish(hasher)
}

fn finish(hasher: Blake2b256) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Hash `fields` under a domain `tag`.
///
/// Each field is preceded by its length as a little-endian `u64`, so moving
/// bytes across a field boundary always changes the digest.
pub fn blake2b_256_fields(tag: &[u8], fields: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(tag);
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    finish(hasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_256(b"claim"), blake2b_256(b"claim"));
    }

    #[test]
    fn blake2b_different_inputs() {
        assert_ne!(blake2b_256(b"provider"), blake2b_256(b"parameters"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn fields_are_length_prefixed() {
        let a = blake2b_256_fields(b"t", &[b"ab", b"c"]);
        let b = blake2b_256_fields(b"t", &[b"a", b"bc"]);
        assert_ne!(a, b);
        assert_ne!(a, blake2b_256_multi(&[b"t", b"ab", b"c"]));
    }

    #[test]
    fn tag_separates_domains() {
        assert_ne!(
            blake2b_256_fields(b"attest/claim-identifier/v1", &[b"x"]),
            blake2b_256_fields(b"attest/committee/v1", &[b"x"])
        );
    }
}
