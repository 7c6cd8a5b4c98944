//! Builder shorthands for the standard gate set

use crate::standard::{Hadamard, PauliX, PauliZ, Phase};
use ddsim_core::{CircuitBuilder, Control, Result};
use std::sync::Arc;

/// Gate shorthands on [`CircuitBuilder`]
///
/// # Example
/// ```
/// use ddsim_core::CircuitBuilder;
/// use ddsim_gates::StandardGates;
///
/// let mut builder = CircuitBuilder::new(2).unwrap();
/// builder.h(0).unwrap().cx(0, 1).unwrap();
/// assert_eq!(builder.build().num_ops(), 2);
/// ```
pub trait StandardGates {
    /// Hadamard on `target`
    fn h(&mut self, target: usize) -> Result<&mut Self>;

    /// Pauli-X on `target`
    fn x(&mut self, target: usize) -> Result<&mut Self>;

    /// Pauli-Z on `target`
    fn z(&mut self, target: usize) -> Result<&mut Self>;

    /// Phase rotation P(θ) on `target`
    fn phase(&mut self, target: usize, theta: f64) -> Result<&mut Self>;

    /// CNOT with one positive control
    fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self>;

    /// Controlled-Z with one positive control
    fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self>;

    /// X under an arbitrary set of controls
    fn mcx(&mut self, controls: &[Control], target: usize) -> Result<&mut Self>;
}

impl StandardGates for CircuitBuilder {
    fn h(&mut self, target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(Hadamard), target, &[])
    }

    fn x(&mut self, target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(PauliX), target, &[])
    }

    fn z(&mut self, target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(PauliZ), target, &[])
    }

    fn phase(&mut self, target: usize, theta: f64) -> Result<&mut Self> {
        self.apply(Arc::new(Phase::new(theta)), target, &[])
    }

    fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(PauliX), target, &[Control::positive(control)])
    }

    fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(PauliZ), target, &[Control::positive(control)])
    }

    fn mcx(&mut self, controls: &[Control], target: usize) -> Result<&mut Self> {
        self.apply(Arc::new(PauliX), target, controls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddsim_core::QuantumError;

    #[test]
    fn test_shorthands_record_operations() {
        let mut builder = CircuitBuilder::new(3).unwrap();
        builder
            .h(0)
            .unwrap()
            .x(1)
            .unwrap()
            .cz(0, 2)
            .unwrap()
            .mcx(&[Control::positive(0), Control::negative(1)], 2)
            .unwrap();
        let circuit = builder.build();

        assert_eq!(circuit.num_ops(), 4);
        let names: Vec<_> = circuit.operations().map(|op| op.gate().name().to_string()).collect();
        assert_eq!(names, vec!["H", "X", "Z", "X"]);
        assert_eq!(circuit.get_operation(3).unwrap().controls().len(), 2);
    }

    #[test]
    fn test_shorthand_errors_propagate() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        assert!(matches!(builder.cx(1, 1), Err(QuantumError::DuplicateQubit(_))));
        assert!(matches!(builder.h(4), Err(QuantumError::InvalidQubit(4, 2))));
    }
}
