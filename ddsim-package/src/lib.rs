//! Decision-diagram engine for quantum circuit simulation
//!
//! States and operators are stored as edge-weighted decision diagrams:
//! - [`complex`]: canonical, tolerance-deduplicated edge weights
//! - [`node`]: nodes, weighted edges and their arena
//! - [`unique_table`]: per-qubit hash-consing, so equal sub-diagrams share one node
//! - [`Package`]: the facade owning all tables, with the diagram algebra,
//!   reference counting and garbage collection
//! - [`Functionality`]: builds a circuit's operator or simulates it on a state
//!
//! # Example
//! ```
//! use ddsim_package::Package;
//! use ddsim_core::Complex64;
//!
//! let mut dd = Package::new();
//! let h = std::f64::consts::FRAC_1_SQRT_2;
//! let hadamard = [
//!     [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
//!     [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
//! ];
//!
//! let gate = dd.make_gate_dd(&hadamard, 2, 0, &[]).unwrap();
//! let zero = dd.make_zero_state(2).unwrap();
//! let plus = dd.multiply(gate, zero).unwrap();
//!
//! let amplitude = dd.get_value_by_path(plus, "10").unwrap();
//! assert!((amplitude.re - h).abs() < 1e-12);
//! ```

pub mod complex;
pub mod compute_table;
pub mod config;
pub mod error;
pub mod functionality;
pub mod node;
mod operations;
pub mod package;
pub mod statistics;
pub mod store;
pub mod unique_table;

// Re-exports for convenience
pub use complex::{ComplexId, ComplexTable};
pub use compute_table::CacheStatistics;
pub use config::{PackageConfig, PathOrder, DEFAULT_TOLERANCE};
pub use error::{DdError, Result};
pub use functionality::Functionality;
pub use node::{Edge, MatrixDd, Node, NodeId, VectorDd};
pub use package::{Flavor, Package, DENSE_EXPORT_LIMIT};
pub use statistics::{GcStatistics, PackageStatistics};
