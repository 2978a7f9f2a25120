//! Content-discovery blend: a deterministic union of recall pools, not a
//! scored ranking. Sections keep a fixed order so the feed shape is stable
//! between refreshes.

use crate::config::DiscoveryLimits;
use crate::models::DiscoveryPools;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

/// Assemble the discovery feed from the caller-supplied pools.
///
/// Takes up to the configured number of items from each pool in fixed
/// section order (collaborative, trending, serendipity, rising creators),
/// concatenates, and de-duplicates by `key` keeping the first occurrence.
pub fn blend<T, K, F>(pools: DiscoveryPools<T>, limits: &DiscoveryLimits, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let sections = [
        (pools.collaborative, limits.collaborative),
        (pools.trending, limits.trending),
        (pools.serendipity, limits.serendipity),
        (pools.rising_creators, limits.rising_creators),
    ];

    let mut seen: HashSet<K> = HashSet::new();
    let mut blended = Vec::new();

    for (pool, limit) in sections {
        for item in pool.into_iter().take(limit) {
            if seen.insert(key(&item)) {
                blended.push(item);
            }
        }
    }

    debug!(items = blended.len(), "Discovery blend assembled");
    blended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>, prefix: &str) -> Vec<String> {
        range.map(|i| format!("{prefix}-{i}")).collect()
    }

    #[test]
    fn sections_keep_fixed_order_and_caps() {
        let pools = DiscoveryPools {
            collaborative: ids(0..10, "cf"),
            trending: ids(0..10, "tr"),
            serendipity: ids(0..1, "sp"),
            rising_creators: ids(0..10, "rc"),
        };

        let blended = blend(pools, &DiscoveryLimits::default(), |item| item.clone());

        assert_eq!(blended.len(), 11);
        assert_eq!(
            blended,
            vec![
                "cf-0", "cf-1", "cf-2", "cf-3", "cf-4", "tr-0", "tr-1", "tr-2", "sp-0", "rc-0",
                "rc-1",
            ]
        );
    }

    #[test]
    fn duplicates_across_pools_keep_first_occurrence() {
        let pools = DiscoveryPools {
            collaborative: vec!["a".to_string(), "b".to_string()],
            trending: vec!["b".to_string(), "c".to_string()],
            serendipity: vec!["a".to_string()],
            rising_creators: vec!["d".to_string()],
        };

        let blended = blend(pools, &DiscoveryLimits::default(), |item| item.clone());
        assert_eq!(blended, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_pools_yield_partial_feed() {
        let pools = DiscoveryPools {
            collaborative: Vec::new(),
            trending: ids(0..2, "tr"),
            serendipity: Vec::new(),
            rising_creators: Vec::new(),
        };

        let blended = blend(pools, &DiscoveryLimits::default(), |item| item.clone());
        assert_eq!(blended, vec!["tr-0", "tr-1"]);
    }

    #[test]
    fn blend_is_deterministic() {
        let pools = DiscoveryPools {
            collaborative: ids(0..7, "cf"),
            trending: ids(0..4, "tr"),
            serendipity: ids(0..1, "sp"),
            rising_creators: ids(0..3, "rc"),
        };

        let first = blend(pools.clone(), &DiscoveryLimits::default(), |i| i.clone());
        let second = blend(pools, &DiscoveryLimits::default(), |i| i.clone());
        assert_eq!(first, second);
    }
}
