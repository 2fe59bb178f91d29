//! Property tests for release tag arithmetic.

use proptest::prelude::*;

use bcr_openssl::ReleaseTag;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the predecessor of `v.bcr.n` is `v.bcr.(n-1)`; `v.bcr.0` has none.
    #[test]
    fn property_previous_decrements_iteration(
        major in 0u32..10,
        minor in 0u32..10,
        patch in 0u32..20,
        iteration in 0u32..1000,
    ) {
        let tag = ReleaseTag::new(format!("{}.{}.{}.bcr.{}", major, minor, patch, iteration)).unwrap();
        match tag.previous() {
            Some(previous) => {
                prop_assert!(iteration > 0);
                prop_assert_eq!(
                    previous.as_str(),
                    format!("{}.{}.{}.bcr.{}", major, minor, patch, iteration - 1)
                );
            }
            None => prop_assert_eq!(iteration, 0),
        }
    }

    /// PROPERTY: the upstream version drives the compatibility level.
    #[test]
    fn property_compatibility_level_orders_versions(
        a in (0u32..10, 0u32..100, 0u32..100),
        b in (0u32..10, 0u32..100, 0u32..100),
    ) {
        let level = |(major, minor, patch): (u32, u32, u32)| {
            ReleaseTag::new(format!("{}.{}.{}.bcr.0", major, minor, patch))
                .unwrap()
                .upstream()
                .unwrap()
                .compatibility_level()
        };
        prop_assert_eq!(a.cmp(&b), level(a).cmp(&level(b)));
    }

    /// PROPERTY: tag parsing never panics and rejects path separators.
    #[test]
    fn property_tag_parse_never_panics(s in "(?s).{0,64}") {
        match s.parse::<ReleaseTag>() {
            Ok(tag) => prop_assert!(!tag.as_str().contains('/')),
            Err(_) => {}
        }
    }
}
