//! Standard gate library for decision-diagram simulation
//!
//! All gates are single-target 2×2 unitaries with pre-computed matrices;
//! controlled variants are built by attaching controls to an
//! [`Operation`](ddsim_core::Operation).
//!
//! # Example
//!
//! ```
//! use ddsim_gates::standard::{Hadamard, RotationX};
//! use ddsim_gates::matrices;
//! use ddsim_core::Gate;
//! use std::f64::consts::PI;
//!
//! let h = Hadamard::matrix();
//! assert_eq!(h, &matrices::HADAMARD);
//!
//! let rx = RotationX::new(PI / 2.0);
//! assert_eq!(rx.matrix(), matrices::rotation_x(PI / 2.0));
//! ```

pub mod matrices;
pub mod shorthand;
pub mod standard;

// Re-export commonly used items
pub use shorthand::StandardGates;
pub use standard::*;
