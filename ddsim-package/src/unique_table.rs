//! Per-qubit hash-consing of nodes

use crate::node::{Edge, NodeArena, NodeId};
use ahash::AHashMap;
use ddsim_core::QubitId;

/// Maps the outgoing edges of a node at one qubit to its unique handle
///
/// Lookups never touch reference counts. A node returned for the first time
/// is floating until the caller references it or the next sweep reclaims it.
#[derive(Debug)]
pub struct UniqueTable<const R: usize> {
    qubit: QubitId,
    entries: AHashMap<[Edge<R>; R], NodeId>,
    hits: usize,
    misses: usize,
}

impl<const R: usize> UniqueTable<R> {
    pub fn new(qubit: QubitId) -> Self {
        Self {
            qubit,
            entries: AHashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the node with exactly these edges, allocating it on a miss
    pub fn lookup(&mut self, edges: [Edge<R>; R], arena: &mut NodeArena<R>) -> NodeId {
        if let Some(&id) = self.entries.get(&edges) {
            self.hits += 1;
            return id;
        }

        self.misses += 1;
        let id = arena.alloc(self.qubit, edges);
        self.entries.insert(edges, id);
        id
    }

    /// Drop and free every node whose reference count is zero
    pub fn sweep(&mut self, arena: &mut NodeArena<R>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, id| {
            if arena.get(*id).ref_count > 0 {
                true
            } else {
                arena.release(*id);
                false
            }
        });
        before - self.entries.len()
    }

    #[inline]
    pub fn qubit(&self) -> QubitId {
        self.qubit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn lookup_counts(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
