//! Node storage for one diagram flavor

use crate::complex::ComplexId;
use crate::compute_table::ComputeTable;
use crate::node::{Edge, Node, NodeArena, NodeId};
use crate::unique_table::UniqueTable;
use ddsim_core::QubitId;

/// Arena, per-qubit unique tables and operation caches for `R`-ary nodes
#[derive(Debug)]
pub struct DiagramStore<const R: usize> {
    pub(crate) arena: NodeArena<R>,
    pub(crate) unique: Vec<UniqueTable<R>>,
    /// Sums keyed by the (ordered) operand pair
    pub(crate) add_table: ComputeTable<(Edge<R>, Edge<R>), Edge<R>>,
    /// Products of a matrix node with a node of this flavor
    pub(crate) multiply_table: ComputeTable<(NodeId, NodeId), Edge<R>>,
}

impl<const R: usize> DiagramStore<R> {
    pub(crate) fn new(compute_capacity: usize) -> Self {
        Self {
            arena: NodeArena::default(),
            unique: Vec::new(),
            add_table: ComputeTable::new(compute_capacity),
            multiply_table: ComputeTable::new(compute_capacity),
        }
    }

    pub(crate) fn find_or_insert(&mut self, qubit: usize, edges: [Edge<R>; R]) -> NodeId {
        while self.unique.len() <= qubit {
            let next = QubitId::new(self.unique.len());
            self.unique.push(UniqueTable::new(next));
        }
        self.unique[qubit].lookup(edges, &mut self.arena)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<R> {
        self.arena.get(id)
    }

    #[inline]
    pub fn live_nodes(&self) -> usize {
        self.arena.len()
    }

    /// Whether `edge` still refers to a live node and live weight
    pub(crate) fn edge_is_live(&self, edge: &Edge<R>, weight_live: impl Fn(ComplexId) -> bool) -> bool {
        (edge.node.is_terminal() || self.arena.contains(edge.node)) && weight_live(edge.weight)
    }

    /// Reclaim every unreferenced node
    pub(crate) fn sweep(&mut self) -> usize {
        let arena = &mut self.arena;
        self.unique.iter_mut().map(|table| table.sweep(arena)).sum()
    }

    /// Drop cache entries that mention reclaimed nodes or weights
    ///
    /// `matrices` is the arena holding the left operands of cached products;
    /// `None` means this store is the matrix store itself.
    pub(crate) fn prune_caches(
        &mut self,
        matrices: Option<&NodeArena<4>>,
        weight_live: impl Fn(ComplexId) -> bool,
    ) {
        let arena = &self.arena;
        let node_live = |id: NodeId| id.is_terminal() || arena.contains(id);
        let matrix_live = |id: NodeId| match matrices {
            Some(m) => id.is_terminal() || m.contains(id),
            None => node_live(id),
        };
        let live = |e: &Edge<R>| node_live(e.node) && weight_live(e.weight);

        self.add_table.retain(|(a, b), r| live(a) && live(b) && live(r));
        self.multiply_table
            .retain(|(m, v), r| matrix_live(*m) && node_live(*v) && live(r));
    }

    /// (hits, misses) summed over all unique tables
    pub(crate) fn unique_lookup_counts(&self) -> (usize, usize) {
        self.unique.iter().fold((0, 0), |(h, m), table| {
            let (th, tm) = table.lookup_counts();
            (h + th, m + tm)
        })
    }
}
