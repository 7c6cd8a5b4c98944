//! Package statistics

use crate::compute_table::CacheStatistics;
use std::fmt;

/// Counters kept across garbage collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcStatistics {
    /// Collections that actually ran
    pub runs: usize,
    pub reclaimed_nodes: usize,
    pub reclaimed_weights: usize,
}

/// Snapshot returned by [`Package::statistics`](crate::Package::statistics)
#[derive(Debug, Clone, PartialEq)]
pub struct PackageStatistics {
    pub vector_nodes: usize,
    pub matrix_nodes: usize,
    /// Sum of the per-flavor peak live node counts
    pub peak_nodes: usize,
    /// Live complex entries including the four pinned constants
    pub complex_entries: usize,
    /// Complex lookups answered by an existing entry
    pub complex_hits: usize,
    pub complex_misses: usize,
    pub unique_hits: usize,
    pub unique_misses: usize,
    /// Addition caches of both flavors
    pub add: CacheStatistics,
    /// Multiplication caches of both flavors
    pub multiply: CacheStatistics,
    pub gc: GcStatistics,
}

impl PackageStatistics {
    /// Live nodes of both flavors
    pub fn live_nodes(&self) -> usize {
        self.vector_nodes + self.matrix_nodes
    }

    /// Share of unique-table lookups that found an existing node, in percent
    pub fn unique_hit_rate(&self) -> f64 {
        let total = self.unique_hits + self.unique_misses;
        if total == 0 {
            0.0
        } else {
            self.unique_hits as f64 / total as f64 * 100.0
        }
    }
}

impl fmt::Display for PackageStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decision diagram statistics:")?;
        writeln!(
            f,
            "  nodes:    {} vector, {} matrix (peak {})",
            self.vector_nodes, self.matrix_nodes, self.peak_nodes
        )?;
        writeln!(
            f,
            "  complex:  {} entries, {} hits, {} misses",
            self.complex_entries, self.complex_hits, self.complex_misses
        )?;
        writeln!(
            f,
            "  unique:   {} hits, {} misses ({:.1}%)",
            self.unique_hits,
            self.unique_misses,
            self.unique_hit_rate()
        )?;
        writeln!(f, "  add:      {}", self.add)?;
        writeln!(f, "  multiply: {}", self.multiply)?;
        writeln!(
            f,
            "  gc:       {} runs, {} nodes and {} weights reclaimed",
            self.gc.runs, self.gc.reclaimed_nodes, self.gc.reclaimed_weights
        )
    }
}
