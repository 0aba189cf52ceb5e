//! Grouping of architectures by target platform.

use crate::bundler::{Architecture, Platform, platform_of};
use std::collections::BTreeMap;

/// Groups architectures by the platform they map to.
///
/// Platforms iterate in [`Platform`] order and each group keeps the input
/// order of its architectures with duplicates removed. Every group is
/// non-empty; an empty input yields an empty map.
pub fn group_by_platform(architectures: &[Architecture]) -> BTreeMap<Platform, Vec<Architecture>> {
    let mut groups: BTreeMap<Platform, Vec<Architecture>> = BTreeMap::new();

    for &arch in architectures {
        let group = groups.entry(platform_of(arch)).or_default();
        if !group.contains(&arch) {
            group.push(arch);
        }
    }

    groups
}
