//! Error types for the decision-diagram package

use ddsim_core::QuantumError;
use thiserror::Error;

/// Result type for package operations
pub type Result<T> = std::result::Result<T, DdError>;

/// Errors reported by [`Package`](crate::Package) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DdError {
    /// Path string length differs from the diagram's qubit count
    #[error("Path length {actual} does not match the diagram's {expected} qubits")]
    PathLength { expected: usize, actual: usize },

    /// Path symbol outside the edge-index alphabet
    #[error("Invalid path symbol '{symbol}' at position {position}")]
    InvalidPathSymbol { symbol: char, position: usize },

    /// Operands span different qubit counts
    #[error("Qubit count mismatch: left operand has {left} qubits, right operand has {right}")]
    QubitCountMismatch { left: usize, right: usize },

    /// Requested size exceeds the configured or supported maximum
    #[error("{requested} qubits exceed the supported maximum of {max}")]
    TooManyQubits { requested: usize, max: usize },

    /// Qubit index outside the diagram
    #[error("Invalid qubit index {qubit} for a {num_qubits}-qubit diagram")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    /// Rejected package configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed circuit or generator input
    #[error(transparent)]
    Circuit(#[from] QuantumError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddsim_core::QubitId;

    #[test]
    fn test_path_errors_display() {
        let err = DdError::PathLength {
            expected: 3,
            actual: 5,
        };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3 qubits"));

        let err = DdError::InvalidPathSymbol {
            symbol: 'x',
            position: 2,
        };
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_circuit_error_conversion() {
        let err: DdError = QuantumError::DuplicateQubit(QubitId::new(1)).into();
        assert!(matches!(err, DdError::Circuit(_)));
        assert!(err.to_string().contains("q1"));
    }
}
