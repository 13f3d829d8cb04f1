//! Tests for difficulty scoring and the engine

use crate::{
    DifficultyEngine, Sha1Engine, Sha256Engine, compute_difficulty, digest_difficulty,
    meets_difficulty,
};
use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

#[cfg(not(feature = "std"))]
use alloc::vec;

#[test]
fn test_known_vector_sha256() {
    // SHA-256("abc0") = 56abfbd7..., 0x56 = 0b0101_0110
    let digest = Sha256::digest(b"abc0");
    assert_eq!(
        hex::encode(digest),
        "56abfbd7d2ea606e667945422de5a368b8b0272b8f29081cb058b594dd7e3249"
    );
    assert_eq!(compute_difficulty::<Sha256>(b"abc", 0), 1);
}

#[test]
fn test_known_vector_sha1() {
    // SHA-1("abc0") = 062c648a..., 0x06 = 0b0000_0110
    let digest = Sha1::digest(b"abc0");
    assert_eq!(
        hex::encode(digest),
        "062c648aaf68174757c50ab1aeebb61e059c1d1b"
    );
    assert_eq!(compute_difficulty::<Sha1>(b"abc", 0), 1);
}

#[test]
fn test_message_is_plain_concatenation() {
    // No separator: "abc1" at 23 and "abc12" at 3 are the same message
    assert_eq!(
        compute_difficulty::<Sha256>(b"abc1", 23),
        compute_difficulty::<Sha256>(b"abc12", 3)
    );
    assert_eq!(
        compute_difficulty::<Sha256>(b"abc", 1230),
        digest_difficulty(&Sha256::digest(b"abc1230"))
    );
}

#[test]
fn test_digest_scoring_counts_low_bits() {
    assert_eq!(digest_difficulty(&[0x01, 0x00, 0x00]), 0);
    assert_eq!(digest_difficulty(&[0x80, 0xFF]), 7);
    assert_eq!(digest_difficulty(&[0x02]), 1);
    assert_eq!(digest_difficulty(&[0x00, 0x01]), 8);
    assert_eq!(digest_difficulty(&[0x00, 0x00, 0x10]), 20);
    // only the first non-zero byte matters
    assert_eq!(digest_difficulty(&[0x00, 0x04, 0x00, 0x00]), 10);
}

#[test]
fn test_all_zero_digest_saturates() {
    assert_eq!(digest_difficulty(&[0u8; 20]), 160);
    assert_eq!(digest_difficulty(&[0u8; 32]), 256);
    assert_eq!(digest_difficulty(&[0u8; 64]), 512);
    assert_eq!(digest_difficulty(&[]), 0);
}

#[test]
fn test_meets_difficulty() {
    let digest = [0x00, 0x00, 0x08, 0xFF];
    assert!(meets_difficulty(&digest, 0));
    assert!(meets_difficulty(&digest, 19));
    assert!(!meets_difficulty(&digest, 20));
}

#[test]
fn test_deterministic() {
    for counter in [0u64, 1, 9, 10, 123_456_789, u64::MAX] {
        let first = compute_difficulty::<Sha256>(b"deterministic", counter);
        let second = compute_difficulty::<Sha256>(b"deterministic", counter);
        assert_eq!(first, second);
    }
}

#[test]
fn test_bounded_by_digest_size() {
    for counter in 0..2_000u64 {
        assert!(compute_difficulty::<Sha1>(b"bound", counter) <= 160);
        assert!(compute_difficulty::<Sha256>(b"bound", counter) <= 256);
        assert!(compute_difficulty::<Sha512>(b"bound", counter) <= 512);
    }
}

#[test]
fn test_empty_identity() {
    assert_eq!(
        compute_difficulty::<Sha256>(b"", 42),
        digest_difficulty(&Sha256::digest(b"42"))
    );
}

#[test]
fn test_engine_matches_one_shot() {
    let identity = b"MEkDAgcAAgEgAiEA8o0n5XJQ1ms1U8w8x9ZxvEXr0PqW0AIw";
    let sha1 = Sha1Engine::new(identity);
    let sha256 = Sha256Engine::new(identity);

    for counter in (0..500u64).chain([9_999, 10_000, u64::MAX - 1, u64::MAX]) {
        assert_eq!(
            sha1.difficulty(counter),
            compute_difficulty::<Sha1>(identity, counter)
        );
        assert_eq!(
            sha256.difficulty(counter),
            compute_difficulty::<Sha256>(identity, counter)
        );
    }
}

#[test]
fn test_engine_reusability() {
    let engine = Sha256Engine::new(b"abc");
    assert_eq!(engine.difficulty(0), 1);
    let _ = engine.difficulty(1);
    let _ = engine.difficulty(2);
    assert_eq!(engine.difficulty(0), 1);

    let cloned = engine.clone();
    assert_eq!(cloned.difficulty(0), 1);
}

#[test]
fn test_engine_metadata() {
    let engine = Sha1Engine::new(b"twelve bytes");
    assert_eq!(engine.identity_len(), 12);
    assert_eq!(engine.digest_size(), 20);
    assert_eq!(engine.max_difficulty(), 160);

    let wide = DifficultyEngine::<Sha512>::new(b"");
    assert_eq!(wide.max_difficulty(), 512);
}

#[test]
fn test_engine_phase_delegation() {
    let identity = vec![0x42u8; 118];
    let engine = Sha256Engine::new(&identity);

    assert!(!engine.is_slow_phase(9));
    assert!(engine.is_slow_phase(10));
    assert_eq!(engine.its_until_slow_phase(3), Ok(7));
    assert_eq!(engine.its_until_slow_phase(10), Ok(0));
}

#[test]
fn test_difficulty_distribution() {
    // Roughly half of all counters score zero (lowest bit set)
    let engine = Sha256Engine::new(b"distribution");
    let zero = (0..4_000u64).filter(|c| engine.difficulty(*c) == 0).count();
    assert!(
        (1_600..=2_400).contains(&zero),
        "{} of 4000 counters scored zero (expected ~2000)",
        zero
    );
}

#[cfg(feature = "blake3")]
#[test]
fn test_blake3_engine() {
    use crate::Blake3Engine;

    let engine = Blake3Engine::new(b"abc");
    for counter in 0..200u64 {
        let score = engine.difficulty(counter);
        assert_eq!(score, compute_difficulty::<blake3::Hasher>(b"abc", counter));
        assert!(score <= 256);
    }
    assert_eq!(
        engine.difficulty(0),
        digest_difficulty(blake3::hash(b"abc0").as_bytes())
    );
}
