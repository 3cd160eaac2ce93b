use fnv::FnvBuildHasher;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub type FnvHashSet<T> = HashSet<T, FnvBuildHasher>;
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

/// Hash set keyed by small values such as grid coordinates.
///
/// FNV is much faster than the default hasher on short keys, but not resistant to collision
/// attacks, which does not matter for maze cells.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// Hash map keyed by small values such as grid coordinates. See `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
