/// Node identity: a creation-ordered integer handed out once per node.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable, globally unique identifier of a node within a build.
///
/// Ids are only meaningful for identity (e.g. UI selection keys) and for
/// comparing construction order inside a single build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonic id source injected into the tree builder.
///
/// Backed by an atomic counter so several builds sharing one allocator
/// (e.g. on worker threads) still never see a duplicate id.
#[derive(Debug)]
pub struct NodeIdAllocator {
    next: AtomicU64,
}

impl NodeIdAllocator {
    /// First id handed out by a fresh allocator.
    pub const BASE: u64 = 1;

    pub fn new() -> Self {
        Self::starting_at(Self::BASE)
    }

    /// Create an allocator whose first id is `base`.
    pub fn starting_at(base: u64) -> Self {
        Self {
            next: AtomicU64::new(base),
        }
    }

    /// Draw the next id. Called exactly once per node construction.
    ///
    /// `u64::MAX` is never issued; it only marks an exhausted allocator.
    ///
    /// # Panics
    ///
    /// Panics once the id space is exhausted rather than wrapping around
    /// and reissuing an id.
    #[inline]
    pub fn next_id(&self) -> NodeId {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(id) => NodeId(id),
            Err(_) => panic!("node id space exhausted"),
        }
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> NodeId {
        NodeId(self.next.load(Ordering::Relaxed))
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ids_are_strictly_increasing() {
        let ids = NodeIdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!(a, NodeId(NodeIdAllocator::BASE));
        assert!(a < b && b < c);
        assert_eq!(ids.peek(), NodeId(c.get() + 1));
    }

    #[test]
    fn last_usable_id_is_issued() {
        let ids = NodeIdAllocator::starting_at(u64::MAX - 1);
        assert_eq!(ids.next_id().get(), u64::MAX - 1);
        assert_eq!(ids.peek().get(), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "node id space exhausted")]
    fn exhausted_allocator_panics_instead_of_wrapping() {
        let ids = NodeIdAllocator::starting_at(u64::MAX - 1);
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a, "id {b} issued after {a}");
    }

    #[test]
    #[should_panic(expected = "node id space exhausted")]
    fn allocator_starting_at_max_never_issues_it() {
        NodeIdAllocator::starting_at(u64::MAX).next_id();
    }

    #[test]
    fn custom_base() {
        let ids = NodeIdAllocator::starting_at(100);
        assert_eq!(ids.next_id().get(), 100);
    }

    #[test]
    fn shared_allocator_never_repeats_across_threads() {
        let ids = Arc::new(NodeIdAllocator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..1_000).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 4_000);
    }
}
