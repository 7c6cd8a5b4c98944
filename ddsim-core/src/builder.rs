//! Runtime-sized circuit builder

use crate::{Control, Gate, Operation, QuantumCircuit, QuantumError, QubitId, Result};
use std::sync::Arc;

/// Collects operations for a circuit whose qubit count is known at runtime
///
/// The qubit count is fixed when the builder is created; [`build`](Self::build)
/// freezes the collected operations into an immutable [`QuantumCircuit`].
///
/// # Example
/// ```
/// use ddsim_core::{CircuitBuilder, Gate};
/// use ddsim_core::gate::GateMatrix;
/// use num_complex::Complex64;
/// use std::sync::Arc;
///
/// # #[derive(Debug)]
/// # struct MockGate;
/// # impl Gate for MockGate {
/// #     fn name(&self) -> &str { "H" }
/// #     fn matrix(&self) -> GateMatrix { [[Complex64::new(1.0, 0.0); 2]; 2] }
/// # }
/// let mut builder = CircuitBuilder::new(3).unwrap();
/// builder.apply(Arc::new(MockGate), 0, &[]).unwrap();
///
/// let circuit = builder.build();
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.num_ops(), 1);
/// ```
#[derive(Debug)]
pub struct CircuitBuilder {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    /// Create a builder for `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyCircuit`] if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a builder with room for `capacity` operations
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        })
    }

    /// Number of qubits of the circuit under construction
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations recorded so far
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Append `gate` on `target` under `controls`
    ///
    /// # Errors
    /// Returns error if:
    /// - the target or a control is out of range
    /// - a qubit appears more than once
    pub fn apply(
        &mut self,
        gate: Arc<dyn Gate>,
        target: usize,
        controls: &[Control],
    ) -> Result<&mut Self> {
        self.check_qubit(target)?;
        for c in controls {
            self.check_qubit(c.qubit.index())?;
        }

        let op = Operation::new(gate, QubitId::new(target), controls)?;
        self.operations.push(op);
        Ok(self)
    }

    /// Append an already validated operation
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidQubit`] if the operation does not fit
    /// this circuit's qubit count
    pub fn push(&mut self, op: Operation) -> Result<&mut Self> {
        for q in op.qubits() {
            self.check_qubit(q.index())?;
        }
        self.operations.push(op);
        Ok(self)
    }

    /// Freeze the builder into an immutable circuit
    pub fn build(self) -> QuantumCircuit {
        QuantumCircuit::from_parts(self.num_qubits, self.operations)
    }

    fn check_qubit(&self, index: usize) -> Result<()> {
        if index >= self.num_qubits {
            return Err(QuantumError::invalid_qubit(index, self.num_qubits));
        }
        Ok(())
    }
}
