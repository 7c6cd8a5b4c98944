//! Error types for circuit construction

use crate::QubitId;
use thiserror::Error;

/// Errors that can occur while building quantum circuits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantumError {
    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// The same qubit appears twice in one operation (as target and control,
    /// or as two controls)
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// A problem parameter handed to a circuit generator is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = err.to_string();
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_duplicate_qubit_error() {
        let err = QuantumError::DuplicateQubit(QubitId::new(2));
        assert!(err.to_string().contains("q2"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = QuantumError::invalid_argument("hidden integer wider than 64 bits");
        assert!(err.to_string().contains("64 bits"));
    }
}
