//! Property tests for integrity fingerprints.

use std::io::Write;

use proptest::prelude::*;

use bcr_openssl::{IntegrityAlgorithm, IntegrityHash};

fn algorithm() -> impl Strategy<Value = IntegrityAlgorithm> {
    proptest::sample::select(vec![
        IntegrityAlgorithm::Sha256,
        IntegrityAlgorithm::Sha384,
        IntegrityAlgorithm::Sha512,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: fingerprinting is a pure function of the bytes, whether they
    /// come from memory, a reader or a file.
    #[test]
    fn property_fingerprint_is_stable(
        bytes in proptest::collection::vec(any::<u8>(), 0..4096),
        algo in algorithm(),
    ) {
        let in_memory = IntegrityHash::from_bytes(algo, &bytes);
        let streamed = IntegrityHash::from_reader(algo, bytes.as_slice()).unwrap();
        prop_assert_eq!(&in_memory, &streamed);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        let from_file = IntegrityHash::of_file_with(algo, file.path()).unwrap();
        prop_assert_eq!(&in_memory, &from_file);

        let expected_prefix = format!("{}-", algo.name());
        prop_assert!(in_memory.as_str().starts_with(&expected_prefix));
        prop_assert_eq!(in_memory.algorithm(), algo);
    }

    /// PROPERTY: flipping any single byte changes the fingerprint.
    #[test]
    fn property_fingerprint_detects_single_byte_change(
        bytes in proptest::collection::vec(any::<u8>(), 1..1024),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut changed = bytes.clone();
        let i = index.index(changed.len());
        changed[i] ^= flip;

        prop_assert_ne!(
            IntegrityHash::from_bytes(IntegrityAlgorithm::Sha256, &bytes),
            IntegrityHash::from_bytes(IntegrityAlgorithm::Sha256, &changed)
        );
    }

    /// PROPERTY: every computed fingerprint parses back to itself.
    #[test]
    fn property_fingerprint_parses_back(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        algo in algorithm(),
    ) {
        let hash = IntegrityHash::from_bytes(algo, &bytes);
        prop_assert_eq!(IntegrityHash::parse(hash.as_str()).unwrap(), hash);
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,128}") {
        let _ = IntegrityHash::parse(&s);
    }
}

#[test]
fn empty_input_has_known_sha256() {
    assert_eq!(
        IntegrityHash::from_bytes(IntegrityAlgorithm::Sha256, b"").as_str(),
        "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
    );
}
