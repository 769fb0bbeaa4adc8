//! Allocation and collection helpers.
//!
//! - Re-exports of AHash-backed hash collections
//! - [`Pool`], a free list that recycles heavy records between passes

pub mod pool;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use pool::{Pool, Recycle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(32u32, 1.5f32);
        assert_eq!(map.get(&32), Some(&1.5));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }
}
