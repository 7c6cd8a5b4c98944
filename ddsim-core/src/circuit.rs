//! Immutable quantum circuit representation

use crate::Operation;
use std::collections::BTreeMap;
use std::fmt;
use std::io;

/// A quantum circuit over a fixed number of qubits
///
/// Circuits are assembled with [`CircuitBuilder`](crate::CircuitBuilder) and
/// never change afterwards: the qubit count and operation sequence are fixed
/// for the circuit's lifetime.
///
/// # Example
/// ```
/// use ddsim_core::CircuitBuilder;
///
/// let circuit = CircuitBuilder::new(3).unwrap().build();
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.num_ops(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct QuantumCircuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl QuantumCircuit {
    pub(crate) fn from_parts(num_qubits: usize, operations: Vec<Operation>) -> Self {
        Self {
            num_qubits,
            operations,
        }
    }

    /// Number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of recorded elementary operations
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterate over the operations in program order
    pub fn operations(&self) -> impl ExactSizeIterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Operation counts keyed by gate name, controlled gates prefixed with
    /// their control count (e.g. `"c1-X"`)
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            let key = match op.controls().len() {
                0 => op.gate().name().to_string(),
                n => format!("c{}-{}", n, op.gate().name()),
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Write a short statistics report to `sink`
    pub fn print_statistics<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "Circuit statistics:")?;
        writeln!(sink, "  qubits:     {}", self.num_qubits)?;
        writeln!(sink, "  operations: {}", self.num_ops())?;
        for (name, count) in self.gate_counts() {
            writeln!(sink, "    {:<8} {}", name, count)?;
        }
        Ok(())
    }
}

impl fmt::Display for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QuantumCircuit({} qubits, {} operations)",
            self.num_qubits,
            self.num_ops()
        )?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}
