//! Diagram nodes, edges and the node arena
//!
//! A node at qubit `q` has `R` outgoing edges: two for state vectors
//! (`|0⟩`, `|1⟩`), four for matrices in row-major order
//! (`00, 01, 10, 11` = row·2 + column). Children of a node at qubit `q`
//! sit at qubit `q - 1`; children of qubit 0 are the terminal.

use crate::complex::ComplexId;
use ddsim_core::QubitId;
use std::fmt;

/// Handle to a node in a [`NodeArena`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The terminal node shared by every diagram
    pub const TERMINAL: Self = Self(u32::MAX);

    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.0 == Self::TERMINAL.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "T")
        } else {
            write!(f, "n{}", self.0)
        }
    }
}

/// Weighted pointer to a node
///
/// Two edges are equal exactly when they point to the same node with the
/// same canonical weight, so equality of canonical diagrams is a handle
/// comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<const R: usize> {
    pub(crate) node: NodeId,
    pub(crate) weight: ComplexId,
}

/// State-vector diagram
pub type VectorDd = Edge<2>;

/// Matrix diagram
pub type MatrixDd = Edge<4>;

impl<const R: usize> Edge<R> {
    #[inline]
    pub(crate) const fn new(node: NodeId, weight: ComplexId) -> Self {
        Self { node, weight }
    }

    /// The zero diagram
    #[inline]
    pub const fn zero() -> Self {
        Self::new(NodeId::TERMINAL, ComplexId::ZERO)
    }

    /// The scalar one
    #[inline]
    pub const fn one() -> Self {
        Self::new(NodeId::TERMINAL, ComplexId::ONE)
    }

    #[inline]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub const fn weight(&self) -> ComplexId {
        self.weight
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.weight.is_zero()
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        self.node.is_terminal()
    }
}

impl<const R: usize> fmt::Display for Edge<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}·{}", self.weight, self.node)
    }
}

/// A decision-diagram node
#[derive(Copy, Clone, Debug)]
pub struct Node<const R: usize> {
    pub(crate) qubit: QubitId,
    pub(crate) edges: [Edge<R>; R],
    pub(crate) ref_count: u32,
}

impl<const R: usize> Node<R> {
    #[inline]
    pub fn qubit(&self) -> QubitId {
        self.qubit
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<R>; R] {
        &self.edges
    }

    #[inline]
    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }
}

/// Slot storage for nodes of one flavor
#[derive(Debug)]
pub struct NodeArena<const R: usize> {
    slots: Vec<Option<Node<R>>>,
    free: Vec<u32>,
    live: usize,
    peak: usize,
}

impl<const R: usize> Default for NodeArena<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            peak: 0,
        }
    }
}

impl<const R: usize> NodeArena<R> {
    pub(crate) fn alloc(&mut self, qubit: QubitId, edges: [Edge<R>; R]) -> NodeId {
        let node = Node {
            qubit,
            edges,
            ref_count: 0,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        };
        assert!(index != NodeId::TERMINAL.0, "node arena exhausted");

        self.live += 1;
        self.peak = self.peak.max(self.live);
        NodeId(index)
    }

    pub(crate) fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.take().is_some() {
                self.free.push(id.0);
                self.live -= 1;
            }
        }
    }

    /// # Panics
    /// Panics on the terminal or a reclaimed handle.
    pub fn get(&self, id: NodeId) -> &Node<R> {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {}", id),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<R> {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {}", id),
        }
    }

    /// Whether `id` names a live node
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Highest simultaneous live node count seen
    #[inline]
    pub fn peak(&self) -> usize {
        self.peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_edges() {
        let zero = VectorDd::zero();
        let one = MatrixDd::one();
        assert!(zero.is_zero());
        assert!(zero.is_terminal());
        assert!(!one.is_zero());
        assert!(one.is_terminal());
        assert_eq!(one.weight(), ComplexId::ONE);
        assert_eq!(zero.to_string(), "c0·T");
    }

    #[test]
    fn test_arena_reuses_slots() {
        let mut arena = NodeArena::<2>::default();
        let a = arena.alloc(QubitId::new(0), [VectorDd::one(), VectorDd::zero()]);
        let b = arena.alloc(QubitId::new(0), [VectorDd::zero(), VectorDd::one()]);
        assert_eq!(arena.len(), 2);
        assert_ne!(a, b);

        arena.release(a);
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(QubitId::new(1), [VectorDd::one(), VectorDd::one()]);
        assert_eq!(c, a);
        assert_eq!(arena.get(c).qubit().index(), 1);
        assert_eq!(arena.peak(), 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut arena = NodeArena::<4>::default();
        let a = arena.alloc(QubitId::new(0), [MatrixDd::one(); 4]);
        arena.release(a);
        arena.release(a);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "dangling node handle")]
    fn test_terminal_has_no_node() {
        let arena = NodeArena::<2>::default();
        arena.get(NodeId::TERMINAL);
    }
}
