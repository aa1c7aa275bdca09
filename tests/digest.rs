use hashcracker::{transform, DigestTransform, SaltedSha256};
use sha2::{Digest, Sha256};

#[test]
fn known_vectors() {
    let cases = [
        ("ab", "s", "7248d19d7040157997c7d465075b88ca5e59acfd318f937a80bae5d337d1a4ff"),
        ("ba", "s", "e32168d51c616158e62772270ac880e10cad4d697cd862d3a26e2db1b614f201"),
        ("ab", "t", "a473af4ecd1a5e6a0a319abbf55ab4302f5dec9cde9057c4691b42268e48b07c"),
        ("z9", "pepper", "0ad52e3ad69e1ce80ffa6406414f0d4905952e00745bdc122d6386b3168aa32d"),
        ("é", "s", "74933ce32c68707b11f883aee476946de463713ebec1abfd8d99d94c16589474"),
    ];
    for (candidate, salt, expected) in cases {
        assert_eq!(transform(candidate, salt), expected, "{candidate}/{salt}");
    }
}

#[test]
fn deterministic() {
    assert_eq!(transform("hunter2", "salt"), transform("hunter2", "salt"));
}

#[test]
fn either_input_changes_digest() {
    let base = transform("ab", "s");
    assert_ne!(base, transform("ac", "s"));
    assert_ne!(base, transform("ab", "S"));
    assert_ne!(base, transform("ab", ""));
}

#[test]
fn not_a_plain_hash_of_concatenation() {
    let naive = hex::encode(Sha256::digest(b"abs"));
    assert_ne!(transform("ab", "s"), naive);
}

#[test]
fn raw_digest_matches_hex() {
    let raw = SaltedSha256.digest("cab", "NaCl");
    assert_eq!(hex::encode(raw), transform("cab", "NaCl"));
    assert!(transform("cab", "NaCl").chars().all(|c| !c.is_ascii_uppercase()));
}
