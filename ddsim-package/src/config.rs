//! Package configuration

use crate::error::{DdError, Result};

/// Default tolerance for merging complex weights
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Largest qubit count any configuration may allow
pub const QUBIT_LIMIT: usize = 65_535;

/// How path strings map onto qubits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathOrder {
    /// `path[i]` selects the edge at qubit `i`
    #[default]
    QubitIndex,
    /// `path[0]` selects the edge at the root (highest qubit)
    RootFirst,
}

/// Configuration for a [`Package`](crate::Package)
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Complex values closer than this on both components are merged
    ///
    /// Default: 1e-10
    pub tolerance: f64,

    /// Live node count above which a non-forced collection runs
    ///
    /// Default: 131072
    pub gc_node_threshold: usize,

    /// Live complex entry count above which a non-forced collection runs
    ///
    /// Default: 65536
    pub gc_complex_threshold: usize,

    /// Entries per compute table before it is flushed (0 = unbounded)
    ///
    /// Default: 32768
    pub compute_table_capacity: usize,

    /// Largest accepted qubit count
    ///
    /// Default: 128
    pub max_qubits: usize,

    /// Path string convention for [`get_value_by_path`](crate::Package::get_value_by_path)
    pub path_order: PathOrder,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            gc_node_threshold: 131_072,
            gc_complex_threshold: 65_536,
            compute_table_capacity: 32_768,
            max_qubits: 128,
            path_order: PathOrder::QubitIndex,
        }
    }
}

impl PackageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for short-lived packages and tests
    ///
    /// Collects early and keeps the caches small.
    pub fn small() -> Self {
        Self {
            gc_node_threshold: 1_024,
            gc_complex_threshold: 1_024,
            compute_table_capacity: 1_024,
            ..Default::default()
        }
    }

    /// Configuration for wide circuits
    pub fn large() -> Self {
        Self {
            gc_node_threshold: 1 << 21,
            gc_complex_threshold: 1 << 20,
            compute_table_capacity: 1 << 18,
            max_qubits: 1_024,
            ..Default::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_gc_thresholds(mut self, nodes: usize, complex: usize) -> Self {
        self.gc_node_threshold = nodes;
        self.gc_complex_threshold = complex;
        self
    }

    pub fn with_compute_table_capacity(mut self, capacity: usize) -> Self {
        self.compute_table_capacity = capacity;
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_path_order(mut self, order: PathOrder) -> Self {
        self.path_order = order;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance < 1e-3) {
            return Err(DdError::InvalidConfig(format!(
                "tolerance must be in (0, 1e-3), got {}",
                self.tolerance
            )));
        }

        if self.gc_node_threshold == 0 || self.gc_complex_threshold == 0 {
            return Err(DdError::InvalidConfig(
                "garbage collection thresholds must be > 0".to_string(),
            ));
        }

        if self.max_qubits == 0 || self.max_qubits > QUBIT_LIMIT {
            return Err(DdError::InvalidConfig(format!(
                "max_qubits must be in 1..={}, got {}",
                QUBIT_LIMIT, self.max_qubits
            )));
        }

        Ok(())
    }
}
