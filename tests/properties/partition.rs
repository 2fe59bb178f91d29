//! Property tests for the partitioner.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use bcr_openssl::{partition, GeneratedContentMap, Platform};

fn platform() -> impl Strategy<Value = Platform> {
    proptest::sample::select(Platform::ALL.to_vec())
}

fn path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z]{1,6}").unwrap();
    proptest::collection::vec(segment, 1..=3).prop_map(|segments| segments.join("/"))
}

/// Small content alphabet so equal contents across platforms are common
fn content() -> impl Strategy<Value = String> {
    proptest::sample::select(vec!["", "a", "b", "#define X 1\n"]).prop_map(str::to_string)
}

/// path -> platform -> content
fn observations() -> impl Strategy<Value = BTreeMap<String, BTreeMap<Platform, String>>> {
    proptest::collection::btree_map(
        path(),
        proptest::collection::btree_map(platform(), content(), 1..=6),
        0..12,
    )
}

fn build(records: &[(Platform, String, String)]) -> GeneratedContentMap {
    let mut map = GeneratedContentMap::new();
    for (platform, path, content) in records {
        map.record(*platform, path.clone(), content.clone()).unwrap();
    }
    map
}

fn flatten(obs: &BTreeMap<String, BTreeMap<Platform, String>>) -> Vec<(Platform, String, String)> {
    obs.iter()
        .flat_map(|(path, per_platform)| {
            per_platform
                .iter()
                .map(move |(platform, content)| (*platform, path.clone(), content.clone()))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a path is independent iff all its recorded contents are equal,
    /// specific otherwise, and never both.
    #[test]
    fn property_partition_membership(obs in observations()) {
        let map = build(&flatten(&obs));
        let result = partition(&map);

        for (path, per_platform) in &obs {
            let distinct: BTreeSet<&String> = per_platform.values().collect();
            prop_assert_eq!(result.is_independent(path), distinct.len() == 1);
            prop_assert_eq!(result.is_specific(path), distinct.len() > 1);
        }
        prop_assert!(result.independent().is_disjoint(result.specific()));
        prop_assert_eq!(
            result.independent().len() + result.specific().len(),
            obs.len()
        );
    }

    /// PROPERTY: recording order does not change the partition.
    #[test]
    fn property_partition_ignores_record_order(
        obs in observations(),
        seed in any::<u64>(),
    ) {
        let records = flatten(&obs);
        let mut shuffled = records.clone();
        // Deterministic permutation driven by the seed
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }

        prop_assert_eq!(partition(&build(&records)), partition(&build(&shuffled)));
    }

    /// PROPERTY: the canonical copy of an independent path is the content of
    /// its lexicographically-first platform.
    #[test]
    fn property_canonical_is_first_platform(obs in observations()) {
        let map = build(&flatten(&obs));
        let result = partition(&map);

        for path in result.independent() {
            let (first, expected) = obs[path].iter().next().unwrap();
            let (platform, content) = map.canonical(path).unwrap();
            prop_assert_eq!(platform, *first);
            prop_assert_eq!(content, expected.as_str());
        }
    }

    /// PROPERTY: specific contents cover every specific path for every
    /// platform, with an empty string where nothing was generated.
    #[test]
    fn property_specific_contents_fill_gaps(obs in observations(), target in platform()) {
        let map = build(&flatten(&obs));
        let result = partition(&map);
        let contents = result.specific_contents_for(&map, target);

        let keys: BTreeSet<&String> = contents.keys().collect();
        let specific: BTreeSet<&String> = result.specific().iter().collect();
        prop_assert_eq!(keys, specific);
        for (path, content) in &contents {
            let expected = obs[path].get(&target).map(String::as_str).unwrap_or("");
            prop_assert_eq!(content.as_str(), expected);
        }
    }
}
