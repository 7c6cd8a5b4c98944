//! Gate definitions and controlled gate operations

use crate::{Control, QuantumError, QubitId, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Row-major 2×2 unitary acting on the target qubit of an operation
pub type GateMatrix = [[Complex64; 2]; 2];

/// Trait for single-target quantum gates
///
/// Multi-qubit gates are expressed as a single-target gate plus controls on
/// an [`Operation`], which is the shape a decision-diagram gate constructor
/// consumes. Gates are stateless and reusable across circuits.
///
/// # Example
/// ```
/// use ddsim_core::gate::{Gate, GateMatrix};
/// use num_complex::Complex64;
///
/// #[derive(Debug)]
/// struct Flip;
///
/// impl Gate for Flip {
///     fn name(&self) -> &str { "X" }
///     fn matrix(&self) -> GateMatrix {
///         let (o, l) = (Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0));
///         [[o, l], [l, o]]
///     }
/// }
///
/// assert_eq!(Flip.description(), "gate 'X'");
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "X", "P")
    fn name(&self) -> &str;

    /// The 2×2 unitary applied to the target qubit
    fn matrix(&self) -> GateMatrix;

    /// Whether this gate is its own inverse
    fn is_hermitian(&self) -> bool {
        false
    }

    /// Whether the matrix is diagonal in the computational basis
    fn is_diagonal(&self) -> bool {
        let m = self.matrix();
        m[0][1] == Complex64::new(0.0, 0.0) && m[1][0] == Complex64::new(0.0, 0.0)
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("gate '{}'", self.name())
    }
}

/// A gate applied to one target qubit under zero or more controls
#[derive(Clone)]
pub struct Operation {
    gate: Arc<dyn Gate>,
    target: QubitId,
    controls: SmallVec<[Control; 2]>, // Most operations have at most two controls
}

impl Operation {
    /// Create a new operation
    ///
    /// # Errors
    /// Returns [`QuantumError::DuplicateQubit`] if the target also appears as
    /// a control, or a control qubit is listed twice.
    pub fn new(gate: Arc<dyn Gate>, target: QubitId, controls: &[Control]) -> Result<Self> {
        for (i, c) in controls.iter().enumerate() {
            if c.qubit == target {
                return Err(QuantumError::DuplicateQubit(target));
            }
            if controls[i + 1..].iter().any(|other| other.qubit == c.qubit) {
                return Err(QuantumError::DuplicateQubit(c.qubit));
            }
        }

        Ok(Self {
            gate,
            target,
            controls: SmallVec::from_slice(controls),
        })
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Get the target qubit
    #[inline]
    pub fn target(&self) -> QubitId {
        self.target
    }

    /// Get the control qubits
    #[inline]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Iterate over every qubit touched by this operation
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        std::iter::once(self.target).chain(self.controls.iter().map(|c| c.qubit))
    }

    /// Number of qubits touched (target plus controls)
    #[inline]
    pub fn num_qubits(&self) -> usize {
        1 + self.controls.len()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.controls.is_empty() {
            write!(f, "c{}-", self.controls.len())?;
        }
        write!(f, "{}(", self.gate.name())?;
        for c in &self.controls {
            write!(f, "{}, ", c)?;
        }
        write!(f, "{})", self.target)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockGate;

    impl Gate for MockGate {
        fn name(&self) -> &str {
            "Z"
        }

        fn matrix(&self) -> GateMatrix {
            let one = Complex64::new(1.0, 0.0);
            let zero = Complex64::new(0.0, 0.0);
            [[one, zero], [zero, -one]]
        }
    }

    #[test]
    fn test_operation_creation() {
        let op = Operation::new(Arc::new(MockGate), QubitId::new(1), &[Control::positive(0)])
            .unwrap();
        assert_eq!(op.target(), QubitId::new(1));
        assert_eq!(op.controls().len(), 1);
        assert_eq!(op.num_qubits(), 2);
        let qubits: Vec<_> = op.qubits().collect();
        assert_eq!(qubits, vec![QubitId::new(1), QubitId::new(0)]);
    }

    #[test]
    fn test_target_used_as_control() {
        let result = Operation::new(Arc::new(MockGate), QubitId::new(1), &[Control::negative(1)]);
        assert!(matches!(result, Err(QuantumError::DuplicateQubit(q)) if q.index() == 1));
    }

    #[test]
    fn test_duplicate_controls() {
        let result = Operation::new(
            Arc::new(MockGate),
            QubitId::new(0),
            &[Control::positive(2), Control::negative(2)],
        );
        assert!(matches!(result, Err(QuantumError::DuplicateQubit(_))));
    }

    #[test]
    fn test_default_diagonal_detection() {
        assert!(MockGate.is_diagonal());
        assert!(!MockGate.is_hermitian());
    }

    #[test]
    fn test_operation_display() {
        let op = Operation::new(Arc::new(MockGate), QubitId::new(2), &[Control::positive(0)])
            .unwrap();
        let display = op.to_string();
        assert!(display.contains("Z"));
        assert!(display.contains("q0"));
        assert!(display.contains("q2"));
    }
}
