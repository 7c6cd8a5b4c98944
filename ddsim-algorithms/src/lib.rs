//! Circuit generators for decision-diagram simulation
//!
//! Each generator builds a [`QuantumCircuit`](ddsim_core::QuantumCircuit)
//! from its problem parameters and implements
//! [`Functionality`](ddsim_package::Functionality), so it can be handed
//! straight to a [`Package`](ddsim_package::Package).
//!
//! # Example
//! ```
//! use ddsim_algorithms::BernsteinVazirani;
//! use ddsim_package::{Functionality, Package};
//!
//! let bv = BernsteinVazirani::new(170).unwrap();
//! let mut dd = Package::new();
//! let func = bv.build_functionality(&mut dd).unwrap();
//! let zero = dd.make_zero_state(bv.num_qubits()).unwrap();
//! let result = dd.multiply(func, zero).unwrap();
//!
//! let path = bv.expected_path(dd.config().path_order);
//! let amplitude = dd.get_value_by_path(result, &path).unwrap();
//! assert!((amplitude.re - 1.0).abs() < 1e-9);
//! ```

pub mod bernstein_vazirani;

pub use bernstein_vazirani::{BernsteinVazirani, MAX_HIDDEN_BITS};
