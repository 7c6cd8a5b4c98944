//! Circuit functionality and simulation
//!
//! Folds a circuit's operations into a single operator diagram, or applies
//! them one by one to a state. Between steps only the running result holds a
//! reference, so the package can reclaim every intermediate diagram.

use crate::error::Result;
use crate::node::{Edge, MatrixDd, VectorDd};
use crate::package::{Flavor, Package};
use crate::DdError;
use ddsim_core::{Operation, QuantumCircuit};
use tracing::{debug, trace};

/// Something whose overall effect can be built as a decision diagram
pub trait Functionality {
    /// The full operator, qubit 0 least significant
    ///
    /// The returned diagram carries one reference owned by the caller.
    fn build_functionality(&self, dd: &mut Package) -> Result<MatrixDd>;

    /// Apply every operation to `input` in order
    ///
    /// The returned diagram carries one reference owned by the caller;
    /// references the caller holds on `input` are untouched.
    ///
    /// A collection point follows every operation. An `input` the caller
    /// has not retained with [`Package::inc_ref`] is unreferenced from then
    /// on and may be reclaimed, so it must not be used after the call. A
    /// state made with [`Package::make_zero_state`] and passed straight in
    /// is such an input.
    fn simulate(&self, input: VectorDd, dd: &mut Package) -> Result<VectorDd>;
}

impl Package {
    /// Operator diagram of one circuit operation on `num_qubits` qubits
    pub fn operation_dd(&mut self, op: &Operation, num_qubits: usize) -> Result<MatrixDd> {
        self.make_gate_dd(&op.gate().matrix(), num_qubits, op.target().index(), op.controls())
    }

    /// Left-multiply `start` by each operation in turn
    fn apply_operations<'a, const R: usize>(
        &mut self,
        start: Edge<R>,
        num_qubits: usize,
        operations: impl Iterator<Item = &'a Operation>,
    ) -> Result<Edge<R>>
    where
        Self: Flavor<R>,
    {
        let mut current = start;
        self.inc_ref(current);

        for (index, op) in operations.enumerate() {
            let next = match self
                .operation_dd(op, num_qubits)
                .and_then(|gate| self.multiply(gate, current))
            {
                Ok(next) => next,
                Err(err) => {
                    self.dec_ref(current);
                    return Err(err);
                }
            };

            self.inc_ref(next);
            self.dec_ref(current);
            current = next;
            trace!(index, op = %op, "applied operation");

            self.garbage_collect(false);
        }

        Ok(current)
    }
}

impl Functionality for QuantumCircuit {
    #[tracing::instrument(skip_all, fields(qubits = self.num_qubits(), ops = self.num_ops()))]
    fn build_functionality(&self, dd: &mut Package) -> Result<MatrixDd> {
        let identity = dd.make_identity(self.num_qubits())?;
        let result = dd.apply_operations(identity, self.num_qubits(), self.operations())?;
        debug!(
            nodes = dd.node_count(result),
            live_nodes = dd.live_nodes(),
            "functionality built"
        );
        Ok(result)
    }

    #[tracing::instrument(skip_all, fields(qubits = self.num_qubits(), ops = self.num_ops()))]
    fn simulate(&self, input: VectorDd, dd: &mut Package) -> Result<VectorDd> {
        if let Some(n) = dd.qubit_count(input) {
            if n != self.num_qubits() {
                return Err(DdError::QubitCountMismatch {
                    left: self.num_qubits(),
                    right: n,
                });
            }
        }
        let result = dd.apply_operations(input, self.num_qubits(), self.operations())?;
        debug!(nodes = dd.node_count(result), "simulation finished");
        Ok(result)
    }
}
