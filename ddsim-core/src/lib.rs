//! Circuit model for decision-diagram quantum simulation
//!
//! This crate provides the types a circuit generator works with:
//! - [`QubitId`] and [`Control`]: qubit addressing and control polarity
//! - [`Gate`]: trait for single-target gates with a 2×2 matrix
//! - [`Operation`]: a gate on one target under any number of controls
//! - [`QuantumCircuit`]: an immutable, ordered sequence of operations
//! - [`CircuitBuilder`]: the only way to assemble a circuit
//!
//! # Example
//! ```
//! use ddsim_core::CircuitBuilder;
//!
//! let builder = CircuitBuilder::new(2).unwrap();
//! let circuit = builder.build();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod builder;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

// Re-exports for convenience
pub use builder::CircuitBuilder;
pub use circuit::QuantumCircuit;
pub use error::QuantumError;
pub use gate::{Gate, GateMatrix, Operation};
pub use num_complex::Complex64;
pub use qubit::{Control, ControlKind, QubitId};

/// Type alias for results of circuit construction
pub type Result<T> = std::result::Result<T, QuantumError>;
