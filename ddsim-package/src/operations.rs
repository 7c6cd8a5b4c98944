//! Diagram algebra
//!
//! All operations recurse over both operands level by level and memoize
//! node-level results in the package's compute tables. Results are
//! canonical, so equal diagrams come back as equal edges.

use crate::complex::ComplexId;
use crate::error::Result;
use crate::node::{Edge, MatrixDd, NodeId, VectorDd};
use crate::package::{Flavor, Package};
use ddsim_core::Complex64;

impl Package {
    /// Sum of two diagrams of the same flavor
    ///
    /// # Errors
    /// Returns [`DdError::QubitCountMismatch`](crate::DdError::QubitCountMismatch)
    /// if the operands span different qubit counts
    pub fn add<const R: usize>(&mut self, a: Edge<R>, b: Edge<R>) -> Result<Edge<R>>
    where
        Self: Flavor<R>,
    {
        self.check_qubit_counts(a, b)?;
        Ok(self.add_edges(a, b))
    }

    pub(crate) fn add_edges<const R: usize>(&mut self, a: Edge<R>, b: Edge<R>) -> Edge<R>
    where
        Self: Flavor<R>,
    {
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        if a.node == b.node {
            let weight = self.complex.add(a.weight, b.weight);
            return if weight.is_zero() {
                Edge::zero()
            } else {
                Edge::new(a.node, weight)
            };
        }

        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(sum) = Flavor::<R>::store_mut(self).add_table.get(&key) {
            return sum;
        }

        let store = Flavor::<R>::store(self);
        let (left, right) = (*store.node(a.node), *store.node(b.node));
        debug_assert_eq!(left.qubit, right.qubit);

        let mut edges = [Edge::zero(); R];
        for (i, edge) in edges.iter_mut().enumerate() {
            let x = self.scale(left.edges[i], a.weight);
            let y = self.scale(right.edges[i], b.weight);
            *edge = self.add_edges(x, y);
        }
        let sum = self.make_node(left.qubit.index(), edges);

        Flavor::<R>::store_mut(self).add_table.insert(key, sum);
        sum
    }

    /// Product of a matrix with a vector (`R = 2`) or another matrix (`R = 4`)
    ///
    /// # Errors
    /// Returns [`DdError::QubitCountMismatch`](crate::DdError::QubitCountMismatch)
    /// if the operands span different qubit counts
    pub fn multiply<const R: usize>(&mut self, a: MatrixDd, b: Edge<R>) -> Result<Edge<R>>
    where
        Self: Flavor<R>,
    {
        self.check_qubit_counts::<4, R>(a, b)?;
        Ok(self.multiply_edges(a, b))
    }

    fn multiply_edges<const R: usize>(&mut self, a: MatrixDd, b: Edge<R>) -> Edge<R>
    where
        Self: Flavor<R>,
    {
        if a.is_zero() || b.is_zero() {
            return Edge::zero();
        }

        let product = self.multiply_nodes::<R>(a.node, b.node);
        if product.is_zero() {
            return Edge::zero();
        }

        let value =
            self.complex.value(a.weight) * self.complex.value(b.weight) * self.complex.value(product.weight);
        let weight = self.complex.intern(value);
        if weight.is_zero() {
            Edge::zero()
        } else {
            Edge::new(product.node, weight)
        }
    }

    fn multiply_nodes<const R: usize>(&mut self, a: NodeId, b: NodeId) -> Edge<R>
    where
        Self: Flavor<R>,
    {
        if a.is_terminal() && b.is_terminal() {
            return Edge::one();
        }

        let key = (a, b);
        if let Some(product) = Flavor::<R>::store_mut(self).multiply_table.get(&key) {
            return product;
        }

        let left = *self.matrices.node(a);
        let right = *Flavor::<R>::store(self).node(b);
        debug_assert_eq!(left.qubit, right.qubit);

        let cols = R / 2;
        let mut edges = [Edge::zero(); R];
        for row in 0..2 {
            for col in 0..cols {
                let mut sum = Edge::zero();
                for k in 0..2 {
                    let term = self.multiply_edges(left.edges[2 * row + k], right.edges[k * cols + col]);
                    sum = self.add_edges(sum, term);
                }
                edges[row * cols + col] = sum;
            }
        }
        let product = self.make_node(left.qubit.index(), edges);

        Flavor::<R>::store_mut(self).multiply_table.insert(key, product);
        product
    }

    /// Conjugate transpose of a matrix diagram
    pub fn conjugate_transpose(&mut self, m: MatrixDd) -> MatrixDd {
        if m.is_zero() {
            return m;
        }
        let inner = self.transpose_node(m.node);
        let conj = self.complex.conj(m.weight);
        let weight = self.complex.mul(conj, inner.weight);
        if weight.is_zero() {
            MatrixDd::zero()
        } else {
            MatrixDd::new(inner.node, weight)
        }
    }

    fn transpose_node(&mut self, id: NodeId) -> MatrixDd {
        if id.is_terminal() {
            return MatrixDd::one();
        }
        if let Some(result) = self.transpose_table.get(&id) {
            return result;
        }

        let node = *self.matrices.node(id);
        let mut edges = [MatrixDd::zero(); 4];
        for row in 0..2 {
            for col in 0..2 {
                edges[2 * row + col] = self.conjugate_transpose(node.edges[2 * col + row]);
            }
        }
        let result = self.make_node(node.qubit.index(), edges);
        self.transpose_table.insert(id, result);
        result
    }

    /// Inner product ⟨a|b⟩
    ///
    /// # Errors
    /// Returns [`DdError::QubitCountMismatch`](crate::DdError::QubitCountMismatch)
    /// if the states span different qubit counts
    pub fn inner_product(&mut self, a: VectorDd, b: VectorDd) -> Result<Complex64> {
        self.check_qubit_counts(a, b)?;
        Ok(self.inner_edges(a, b))
    }

    /// |⟨a|b⟩|²
    pub fn fidelity(&mut self, a: VectorDd, b: VectorDd) -> Result<f64> {
        Ok(self.inner_product(a, b)?.norm_sqr())
    }

    fn inner_edges(&mut self, a: VectorDd, b: VectorDd) -> Complex64 {
        if a.is_zero() || b.is_zero() {
            return Complex64::new(0.0, 0.0);
        }
        let scale = self.complex.value(a.weight).conj() * self.complex.value(b.weight);
        scale * self.inner_nodes(a.node, b.node)
    }

    fn inner_nodes(&mut self, a: NodeId, b: NodeId) -> Complex64 {
        if a.is_terminal() && b.is_terminal() {
            return Complex64::new(1.0, 0.0);
        }
        if let Some(value) = self.inner_table.get(&(a, b)) {
            return value;
        }

        let (left, right) = (*self.vectors.node(a), *self.vectors.node(b));
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..2 {
            sum += self.inner_edges(left.edges[i], right.edges[i]);
        }
        self.inner_table.insert((a, b), sum);
        sum
    }

    /// Multiply every weight of `edge` by the scalar `factor`
    pub fn scalar_multiply<const R: usize>(&mut self, edge: Edge<R>, factor: Complex64) -> Edge<R> {
        let weight = self.complex.lookup(factor);
        if weight == ComplexId::ONE {
            return edge;
        }
        self.scale(edge, weight)
    }
}
