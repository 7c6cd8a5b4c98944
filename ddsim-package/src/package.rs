//! The decision-diagram package
//!
//! [`Package`] owns every table a diagram lives in: the complex table, one
//! [`DiagramStore`] per flavor (vectors and matrices) and the operation
//! caches. Diagrams are plain [`Edge`] handles that are only meaningful
//! together with the package that produced them.
//!
//! # Reference counting and collection
//!
//! Every node and weight produced by an operation starts unreferenced. Call
//! [`inc_ref`](Package::inc_ref) on each edge that must survive the next
//! collection and [`dec_ref`](Package::dec_ref) once it is no longer needed.
//! Referencing a node for the first time references its children, so one
//! `inc_ref` on a root protects the whole diagram.
//!
//! Collections only run inside [`garbage_collect`](Package::garbage_collect)
//! and [`collect_garbage`](Package::collect_garbage); none of the algebra
//! collects on its own, so intermediate results stay valid between calls.

use crate::complex::{ComplexId, ComplexTable};
use crate::compute_table::ComputeTable;
use crate::config::{PackageConfig, PathOrder};
use crate::error::{DdError, Result};
use crate::node::{Edge, MatrixDd, NodeId, VectorDd};
use crate::statistics::{GcStatistics, PackageStatistics};
use crate::store::DiagramStore;
use ahash::AHashSet;
use ddsim_core::{Complex64, Control, ControlKind, GateMatrix};
use tracing::debug;

/// Largest diagram [`get_vector`](Package::get_vector) and
/// [`get_matrix`](Package::get_matrix) expand densely
pub const DENSE_EXPORT_LIMIT: usize = 20;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Package {}
}

/// Gives generic operations access to the store of one diagram flavor
///
/// Implemented by [`Package`] for vectors (`R = 2`) and matrices (`R = 4`).
pub trait Flavor<const R: usize>: sealed::Sealed {
    #[doc(hidden)]
    fn store(&self) -> &DiagramStore<R>;
    #[doc(hidden)]
    fn store_mut(&mut self) -> &mut DiagramStore<R>;
}

/// Decision-diagram package
///
/// # Example
/// ```
/// use ddsim_package::Package;
///
/// let mut dd = Package::new();
/// let zero = dd.make_zero_state(3).unwrap();
/// let value = dd.get_value_by_path(zero, "000").unwrap();
/// assert!((value.re - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Package {
    config: PackageConfig,
    pub(crate) complex: ComplexTable,
    pub(crate) vectors: DiagramStore<2>,
    pub(crate) matrices: DiagramStore<4>,
    pub(crate) transpose_table: ComputeTable<NodeId, MatrixDd>,
    pub(crate) inner_table: ComputeTable<(NodeId, NodeId), Complex64>,
    gc_node_limit: usize,
    gc_complex_limit: usize,
    gc: GcStatistics,
}

impl Flavor<2> for Package {
    #[inline]
    fn store(&self) -> &DiagramStore<2> {
        &self.vectors
    }

    #[inline]
    fn store_mut(&mut self) -> &mut DiagramStore<2> {
        &mut self.vectors
    }
}

impl Flavor<4> for Package {
    #[inline]
    fn store(&self) -> &DiagramStore<4> {
        &self.matrices
    }

    #[inline]
    fn store_mut(&mut self) -> &mut DiagramStore<4> {
        &mut self.matrices
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

impl Package {
    /// Create a package with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(PackageConfig::default())
    }

    /// Create a package with a custom configuration
    ///
    /// # Errors
    /// Returns [`DdError::InvalidConfig`] if the configuration is rejected
    pub fn with_config(config: PackageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PackageConfig) -> Self {
        let capacity = config.compute_table_capacity;
        Self {
            complex: ComplexTable::new(config.tolerance),
            vectors: DiagramStore::new(capacity),
            matrices: DiagramStore::new(capacity),
            transpose_table: ComputeTable::new(capacity),
            inner_table: ComputeTable::new(capacity),
            gc_node_limit: config.gc_node_threshold,
            gc_complex_limit: config.gc_complex_threshold,
            gc: GcStatistics::default(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// The canonical complex table
    #[inline]
    pub fn complex_table(&self) -> &ComplexTable {
        &self.complex
    }

    /// The numeric value behind an edge weight
    #[inline]
    pub fn weight_value<const R: usize>(&self, edge: Edge<R>) -> Complex64 {
        self.complex.value(edge.weight)
    }

    /// Number of qubits spanned by `edge`
    ///
    /// The zero edge is compatible with any qubit count and yields `None`.
    pub fn qubit_count<const R: usize>(&self, edge: Edge<R>) -> Option<usize>
    where
        Self: Flavor<R>,
    {
        if edge.is_zero() {
            None
        } else if edge.is_terminal() {
            Some(0)
        } else {
            Some(Flavor::<R>::store(self).node(edge.node).qubit.index() + 1)
        }
    }

    pub(crate) fn check_qubit_counts<const A: usize, const B: usize>(
        &self,
        left: Edge<A>,
        right: Edge<B>,
    ) -> Result<()>
    where
        Self: Flavor<A> + Flavor<B>,
    {
        match (self.qubit_count(left), self.qubit_count(right)) {
            (Some(l), Some(r)) if l != r => Err(DdError::QubitCountMismatch { left: l, right: r }),
            _ => Ok(()),
        }
    }

    fn check_size(&self, num_qubits: usize) -> Result<()> {
        if num_qubits > self.config.max_qubits {
            return Err(DdError::TooManyQubits {
                requested: num_qubits,
                max: self.config.max_qubits,
            });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Node construction
    // ---------------------------------------------------------------------

    /// Build the canonical node at `qubit` with the given children
    ///
    /// The child of largest magnitude (lowest index on ties within relative
    /// tolerance) is normalized to weight one and its weight moves onto the
    /// returned edge. All-zero children yield the zero edge.
    pub(crate) fn make_node<const R: usize>(&mut self, qubit: usize, mut edges: [Edge<R>; R]) -> Edge<R>
    where
        Self: Flavor<R>,
    {
        let tolerance = self.config.tolerance;
        let mut pivot: Option<(usize, f64)> = None;

        for (i, edge) in edges.iter_mut().enumerate() {
            if edge.is_zero() {
                *edge = Edge::zero();
                continue;
            }
            debug_assert!(self.child_fits::<R>(qubit, edge), "child {} below qubit {}", edge, qubit);

            let magnitude = self.complex.value(edge.weight).norm();
            match pivot {
                Some((_, best)) if magnitude <= best * (1.0 + tolerance) => {}
                _ => pivot = Some((i, magnitude)),
            }
        }

        let Some((p, _)) = pivot else {
            return Edge::zero();
        };

        let factor = edges[p].weight;
        for (i, edge) in edges.iter_mut().enumerate() {
            if i == p {
                edge.weight = ComplexId::ONE;
            } else if !edge.is_zero() {
                let weight = self.complex.div(edge.weight, factor);
                *edge = if weight.is_zero() {
                    Edge::zero()
                } else {
                    Edge::new(edge.node, weight)
                };
            }
        }

        let node = Flavor::<R>::store_mut(self).find_or_insert(qubit, edges);
        Edge::new(node, factor)
    }

    fn child_fits<const R: usize>(&self, qubit: usize, child: &Edge<R>) -> bool
    where
        Self: Flavor<R>,
    {
        match qubit {
            0 => child.is_terminal(),
            _ => !child.is_terminal() && Flavor::<R>::store(self).node(child.node).qubit.index() == qubit - 1,
        }
    }

    /// Scale `edge` by `weight`
    pub(crate) fn scale<const R: usize>(&mut self, edge: Edge<R>, weight: ComplexId) -> Edge<R> {
        if edge.is_zero() {
            return edge;
        }
        let w = self.complex.mul(edge.weight, weight);
        if w.is_zero() {
            Edge::zero()
        } else {
            Edge::new(edge.node, w)
        }
    }

    // ---------------------------------------------------------------------
    // States and operators
    // ---------------------------------------------------------------------

    /// The all-zero basis state |0…0⟩ on `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`DdError::TooManyQubits`] above the configured maximum
    pub fn make_zero_state(&mut self, num_qubits: usize) -> Result<VectorDd> {
        self.check_size(num_qubits)?;
        let mut edge = VectorDd::one();
        for q in 0..num_qubits {
            edge = self.make_node(q, [edge, Edge::zero()]);
        }
        Ok(edge)
    }

    /// The computational basis state with qubit `i` set to `bits[i]`
    pub fn make_basis_state(&mut self, bits: &[bool]) -> Result<VectorDd> {
        self.check_size(bits.len())?;
        let mut edge = VectorDd::one();
        for (q, &bit) in bits.iter().enumerate() {
            let children = if bit {
                [Edge::zero(), edge]
            } else {
                [edge, Edge::zero()]
            };
            edge = self.make_node(q, children);
        }
        Ok(edge)
    }

    /// The identity operator on `num_qubits` qubits
    pub fn make_identity(&mut self, num_qubits: usize) -> Result<MatrixDd> {
        self.check_size(num_qubits)?;
        Ok(self.identity(num_qubits))
    }

    fn identity(&mut self, num_qubits: usize) -> MatrixDd {
        let mut edge = MatrixDd::one();
        for q in 0..num_qubits {
            edge = self.make_node(q, [edge, Edge::zero(), Edge::zero(), edge]);
        }
        edge
    }

    /// Lift a 2×2 gate on `target` under `controls` to a `num_qubits`-qubit
    /// operator
    ///
    /// Qubits that are neither target nor control are acted on by the
    /// identity. A positive control applies the gate on |1⟩ and the identity
    /// on |0⟩; a negative control the other way round.
    ///
    /// # Errors
    /// Returns an error if a qubit is out of range or appears twice
    pub fn make_gate_dd(
        &mut self,
        matrix: &GateMatrix,
        num_qubits: usize,
        target: usize,
        controls: &[Control],
    ) -> Result<MatrixDd> {
        self.check_size(num_qubits)?;
        let mut kinds: Vec<Option<ControlKind>> = vec![None; num_qubits];
        for q in std::iter::once(target).chain(controls.iter().map(|c| c.qubit.index())) {
            if q >= num_qubits {
                return Err(DdError::InvalidQubit { qubit: q, num_qubits });
            }
        }
        for control in controls {
            let q = control.qubit.index();
            if q == target || kinds[q].is_some() {
                return Err(ddsim_core::QuantumError::DuplicateQubit(control.qubit).into());
            }
            kinds[q] = Some(control.kind);
        }

        let zero = MatrixDd::zero();
        let mut blocks = [zero; 4];
        for (idx, block) in blocks.iter_mut().enumerate() {
            let weight = self.complex.lookup(matrix[idx / 2][idx % 2]);
            if !weight.is_zero() {
                *block = MatrixDd::new(NodeId::TERMINAL, weight);
            }
        }

        for (z, kind) in kinds.iter().enumerate().take(target) {
            for idx in 0..4 {
                let block = blocks[idx];
                blocks[idx] = match kind {
                    None => self.make_node(z, [block, zero, zero, block]),
                    Some(kind) => {
                        let idle = if idx / 2 == idx % 2 { self.identity(z) } else { zero };
                        match kind {
                            ControlKind::Positive => self.make_node(z, [idle, zero, zero, block]),
                            ControlKind::Negative => self.make_node(z, [block, zero, zero, idle]),
                        }
                    }
                };
            }
        }

        let mut edge = self.make_node(target, blocks);

        for (z, kind) in kinds.iter().enumerate().skip(target + 1) {
            edge = match kind {
                None => self.make_node(z, [edge, zero, zero, edge]),
                Some(ControlKind::Positive) => {
                    let idle = self.identity(z);
                    self.make_node(z, [idle, zero, zero, edge])
                }
                Some(ControlKind::Negative) => {
                    let idle = self.identity(z);
                    self.make_node(z, [edge, zero, zero, idle])
                }
            };
        }

        Ok(edge)
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    /// Amplitude (or matrix entry) reached by following `path`
    ///
    /// Vector paths use the symbols `0`/`1`; matrix paths `0`–`3` with
    /// `2·row + column`. Which qubit each position selects depends on the
    /// configured [`PathOrder`]. Hitting a zero edge yields zero.
    ///
    /// # Errors
    /// - [`DdError::InvalidPathSymbol`] for a symbol outside the alphabet
    /// - [`DdError::PathLength`] if the path length differs from the qubit count
    pub fn get_value_by_path<const R: usize>(&self, edge: Edge<R>, path: &str) -> Result<Complex64>
    where
        Self: Flavor<R>,
    {
        let mut digits = Vec::with_capacity(path.len());
        for (position, symbol) in path.chars().enumerate() {
            match symbol.to_digit(10) {
                Some(d) if (d as usize) < R => digits.push(d as usize),
                _ => return Err(DdError::InvalidPathSymbol { symbol, position }),
            }
        }

        let zero = Complex64::new(0.0, 0.0);
        let Some(num_qubits) = self.qubit_count(edge) else {
            return Ok(zero);
        };
        if num_qubits != digits.len() {
            return Err(DdError::PathLength {
                expected: num_qubits,
                actual: digits.len(),
            });
        }

        let store = Flavor::<R>::store(self);
        let mut value = self.complex.value(edge.weight);
        let mut current = edge;
        while !current.is_terminal() {
            let node = store.node(current.node);
            let q = node.qubit.index();
            let position = match self.config.path_order {
                PathOrder::QubitIndex => q,
                PathOrder::RootFirst => num_qubits - 1 - q,
            };
            current = node.edges[digits[position]];
            if current.is_zero() {
                return Ok(zero);
            }
            value *= self.complex.value(current.weight);
        }
        Ok(value)
    }

    /// Dense amplitudes of a state, basis index bit `q` = qubit `q`
    ///
    /// The zero edge has no defined size and yields an empty vector.
    ///
    /// # Errors
    /// Returns [`DdError::TooManyQubits`] above [`DENSE_EXPORT_LIMIT`]
    pub fn get_vector(&self, state: VectorDd) -> Result<Vec<Complex64>> {
        let Some(n) = self.qubit_count(state) else {
            return Ok(Vec::new());
        };
        Self::check_dense(n)?;

        let mut out = vec![Complex64::new(0.0, 0.0); 1 << n];
        self.fill_vector(state, Complex64::new(1.0, 0.0), 0, &mut out);
        Ok(out)
    }

    fn fill_vector(&self, edge: VectorDd, amplitude: Complex64, offset: usize, out: &mut [Complex64]) {
        if edge.is_zero() {
            return;
        }
        let amplitude = amplitude * self.complex.value(edge.weight);
        if edge.is_terminal() {
            out[offset] = amplitude;
            return;
        }
        let node = self.vectors.node(edge.node);
        let q = node.qubit.index();
        for (bit, child) in node.edges.iter().enumerate() {
            self.fill_vector(*child, amplitude, offset | (bit << q), out);
        }
    }

    /// Dense matrix of an operator, indexed `[row][column]`
    pub fn get_matrix(&self, operator: MatrixDd) -> Result<Vec<Vec<Complex64>>> {
        let Some(n) = self.qubit_count(operator) else {
            return Ok(Vec::new());
        };
        Self::check_dense(n)?;

        let dim = 1 << n;
        let mut out = vec![vec![Complex64::new(0.0, 0.0); dim]; dim];
        self.fill_matrix(operator, Complex64::new(1.0, 0.0), (0, 0), &mut out);
        Ok(out)
    }

    fn fill_matrix(
        &self,
        edge: MatrixDd,
        amplitude: Complex64,
        (row, col): (usize, usize),
        out: &mut [Vec<Complex64>],
    ) {
        if edge.is_zero() {
            return;
        }
        let amplitude = amplitude * self.complex.value(edge.weight);
        if edge.is_terminal() {
            out[row][col] = amplitude;
            return;
        }
        let node = self.matrices.node(edge.node);
        let q = node.qubit.index();
        for (idx, child) in node.edges.iter().enumerate() {
            let at = (row | ((idx >> 1) << q), col | ((idx & 1) << q));
            self.fill_matrix(*child, amplitude, at, out);
        }
    }

    fn check_dense(num_qubits: usize) -> Result<()> {
        if num_qubits > DENSE_EXPORT_LIMIT {
            return Err(DdError::TooManyQubits {
                requested: num_qubits,
                max: DENSE_EXPORT_LIMIT,
            });
        }
        Ok(())
    }

    /// Number of distinct non-terminal nodes reachable from `edge`
    pub fn node_count<const R: usize>(&self, edge: Edge<R>) -> usize
    where
        Self: Flavor<R>,
    {
        let store = Flavor::<R>::store(self);
        let mut seen = AHashSet::new();
        let mut stack = vec![edge];
        while let Some(e) = stack.pop() {
            if e.is_terminal() || !seen.insert(e.node) {
                continue;
            }
            stack.extend(store.node(e.node).edges.iter().filter(|c| !c.is_zero()));
        }
        seen.len()
    }

    /// Live nodes of both flavors
    pub fn live_nodes(&self) -> usize {
        self.vectors.live_nodes() + self.matrices.live_nodes()
    }

    /// Reference count of the node behind `edge` (0 for the terminal)
    pub fn node_ref_count<const R: usize>(&self, edge: Edge<R>) -> u32
    where
        Self: Flavor<R>,
    {
        if edge.is_terminal() {
            0
        } else {
            Flavor::<R>::store(self).node(edge.node).ref_count
        }
    }

    // ---------------------------------------------------------------------
    // Reference counting
    // ---------------------------------------------------------------------

    /// Protect `edge` from collection
    pub fn inc_ref<const R: usize>(&mut self, edge: Edge<R>)
    where
        Self: Flavor<R>,
    {
        self.complex.inc_ref(edge.weight);
        if edge.is_terminal() {
            return;
        }

        let (count, children) = {
            let node = Flavor::<R>::store_mut(self).arena.get_mut(edge.node);
            node.ref_count += 1;
            (node.ref_count, node.edges)
        };
        if count == 1 {
            for child in children {
                self.inc_ref(child);
            }
        }
    }

    /// Release one reference taken with [`inc_ref`](Self::inc_ref)
    ///
    /// # Panics
    /// Panics if the node or weight is not referenced.
    pub fn dec_ref<const R: usize>(&mut self, edge: Edge<R>)
    where
        Self: Flavor<R>,
    {
        self.complex.dec_ref(edge.weight);
        if edge.is_terminal() {
            return;
        }

        let (count, children) = {
            let node = Flavor::<R>::store_mut(self).arena.get_mut(edge.node);
            assert!(node.ref_count > 0, "node reference count underflow for {}", edge.node);
            node.ref_count -= 1;
            (node.ref_count, node.edges)
        };
        if count == 0 {
            for child in children {
                self.dec_ref(child);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Garbage collection
    // ---------------------------------------------------------------------

    /// Reclaim unreferenced nodes and weights
    ///
    /// Without `force`, nothing happens until the live node or complex
    /// counts exceed their limits; a limit doubles when a collection leaves
    /// the table above 90% of it. Returns the number of reclaimed nodes and
    /// weights.
    pub fn garbage_collect(&mut self, force: bool) -> usize {
        let nodes = self.live_nodes();
        let weights = self.complex.len();
        if !force && nodes <= self.gc_node_limit && weights <= self.gc_complex_limit {
            return 0;
        }

        let reclaimed_nodes = self.vectors.sweep() + self.matrices.sweep();
        let reclaimed_weights = self.complex.collect();
        self.prune_caches();

        if !force {
            if self.live_nodes() * 10 > self.gc_node_limit * 9 {
                self.gc_node_limit *= 2;
            }
            if self.complex.len() * 10 > self.gc_complex_limit * 9 {
                self.gc_complex_limit *= 2;
            }
        }

        self.gc.runs += 1;
        self.gc.reclaimed_nodes += reclaimed_nodes;
        self.gc.reclaimed_weights += reclaimed_weights;
        debug!(
            force,
            reclaimed_nodes,
            reclaimed_weights,
            live_nodes = self.live_nodes(),
            live_weights = self.complex.len(),
            "garbage collection"
        );

        reclaimed_nodes + reclaimed_weights
    }

    /// Forced collection
    pub fn collect_garbage(&mut self) -> usize {
        self.garbage_collect(true)
    }

    fn prune_caches(&mut self) {
        let complex = &self.complex;
        let weight_live = |w: ComplexId| complex.is_live(w);

        self.vectors
            .prune_caches(Some(&self.matrices.arena), weight_live);
        self.matrices.prune_caches(None, weight_live);

        let matrices = &self.matrices;
        self.transpose_table
            .retain(|id, r| matrices.arena.contains(*id) && matrices.edge_is_live(r, weight_live));
        let vectors = &self.vectors;
        self.inner_table
            .retain(|(a, b), _| vectors.arena.contains(*a) && vectors.arena.contains(*b));
    }

    /// Snapshot of table sizes, cache behaviour and collection counts
    pub fn statistics(&self) -> PackageStatistics {
        let (vh, vm) = self.vectors.unique_lookup_counts();
        let (mh, mm) = self.matrices.unique_lookup_counts();
        let (complex_hits, complex_misses) = self.complex.lookup_counts();
        PackageStatistics {
            vector_nodes: self.vectors.live_nodes(),
            matrix_nodes: self.matrices.live_nodes(),
            peak_nodes: self.vectors.arena.peak() + self.matrices.arena.peak(),
            complex_entries: self.complex.len(),
            complex_hits,
            complex_misses,
            unique_hits: vh + mh,
            unique_misses: vm + mm,
            add: self
                .vectors
                .add_table
                .statistics()
                .merge(&self.matrices.add_table.statistics()),
            multiply: self
                .vectors
                .multiply_table
                .statistics()
                .merge(&self.matrices.multiply_table.statistics()),
            gc: self.gc.clone(),
        }
    }
}
