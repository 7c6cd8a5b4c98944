//! Bernstein–Vazirani circuit generator
//!
//! For a hidden integer `h` of bit length `n` the circuit uses `n` data
//! qubits (qubit `i` carries bit `i` of `h`) and one ancilla on qubit `n`.
//! It consists of
//! 1. a Hadamard on every qubit,
//! 2. a phase-kickback oracle: one Z on data qubit `i` per set bit `i`,
//! 3. a Hadamard on every qubit.
//!
//! Run on |0…0⟩ the data qubits end in |h⟩ and the ancilla returns to |0⟩,
//! so the amplitude at the path spelling `h` is exactly one.

use ddsim_core::{CircuitBuilder, QuantumCircuit, QuantumError, Result};
use ddsim_gates::StandardGates;
use ddsim_package::{Functionality, MatrixDd, Package, PathOrder, VectorDd};
use std::io;
use tracing::debug;

/// Widest supported hidden integer
pub const MAX_HIDDEN_BITS: usize = 64;

/// A Bernstein–Vazirani instance for one hidden integer
///
/// # Example
/// ```
/// use ddsim_algorithms::BernsteinVazirani;
///
/// let bv = BernsteinVazirani::new(0b1011).unwrap();
/// assert_eq!(bv.num_qubits(), 5);
/// assert_eq!(bv.num_ops(), 2 * 5 + 3);
/// assert_eq!(bv.expected_path(Default::default()), "11010");
/// ```
#[derive(Debug, Clone)]
pub struct BernsteinVazirani {
    hidden: u64,
    circuit: QuantumCircuit,
}

impl BernsteinVazirani {
    /// Build the circuit for `hidden`
    pub fn new(hidden: u64) -> Result<Self> {
        let data_qubits = bit_length(hidden);
        let size = data_qubits + 1;
        let mut builder = CircuitBuilder::with_capacity(size, 2 * size + hidden.count_ones() as usize)?;

        for q in 0..size {
            builder.h(q)?;
        }
        for bit in (0..data_qubits).filter(|&bit| hidden >> bit & 1 == 1) {
            builder.z(bit)?;
        }
        for q in 0..size {
            builder.h(q)?;
        }

        let circuit = builder.build();
        debug!(hidden, qubits = size, ops = circuit.num_ops(), "built Bernstein-Vazirani circuit");
        Ok(Self { hidden, circuit })
    }

    /// Build the circuit for a hidden integer written in binary, most
    /// significant bit first
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidArgument`] if the string is empty,
    /// contains a digit other than `0`/`1`, or is wider than
    /// [`MAX_HIDDEN_BITS`] significant bits
    pub fn from_bit_string(bits: &str) -> Result<Self> {
        if bits.is_empty() {
            return Err(QuantumError::invalid_argument("empty hidden integer"));
        }
        if let Some((position, digit)) = bits.chars().enumerate().find(|(_, c)| *c != '0' && *c != '1') {
            return Err(QuantumError::invalid_argument(format!(
                "non-binary digit '{}' at position {}",
                digit, position
            )));
        }

        let significant = bits.trim_start_matches('0');
        if significant.len() > MAX_HIDDEN_BITS {
            return Err(QuantumError::invalid_argument(format!(
                "hidden integer has {} bits, at most {} are supported",
                significant.len(),
                MAX_HIDDEN_BITS
            )));
        }

        let hidden = significant
            .bytes()
            .fold(0u64, |acc, b| (acc << 1) | u64::from(b - b'0'));
        Self::new(hidden)
    }

    #[inline]
    pub fn hidden_integer(&self) -> u64 {
        self.hidden
    }

    /// Qubit count: bit length of the hidden integer plus the ancilla
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    #[inline]
    pub fn num_ops(&self) -> usize {
        self.circuit.num_ops()
    }

    #[inline]
    pub fn circuit(&self) -> &QuantumCircuit {
        &self.circuit
    }

    /// The ancilla qubit
    #[inline]
    pub fn ancilla(&self) -> usize {
        self.num_qubits() - 1
    }

    /// Path string of the basis state the circuit maps |0…0⟩ to
    ///
    /// Bit `i` of the hidden integer is written as `1` at the position of
    /// qubit `i`; the ancilla is `0`.
    pub fn expected_path(&self, order: PathOrder) -> String {
        let size = self.num_qubits();
        let symbol = |q: usize| if q < 64 && self.hidden >> q & 1 == 1 { '1' } else { '0' };
        match order {
            PathOrder::QubitIndex => (0..size).map(symbol).collect(),
            PathOrder::RootFirst => (0..size).rev().map(symbol).collect(),
        }
    }

    pub fn print_statistics<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "Bernstein-Vazirani (hidden integer {})", self.hidden)?;
        self.circuit.print_statistics(sink)
    }
}

impl Functionality for BernsteinVazirani {
    fn build_functionality(&self, dd: &mut Package) -> ddsim_package::Result<MatrixDd> {
        self.circuit.build_functionality(dd)
    }

    fn simulate(&self, input: VectorDd, dd: &mut Package) -> ddsim_package::Result<VectorDd> {
        self.circuit.simulate(input, dd)
    }
}

/// Number of significant bits of `value` (0 for 0)
fn bit_length(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(170), 8);
        assert_eq!(bit_length(u64::MAX), 64);
    }

    #[test]
    fn test_zero_has_only_the_ancilla() {
        let bv = BernsteinVazirani::new(0).unwrap();
        assert_eq!(bv.num_qubits(), 1);
        assert_eq!(bv.num_ops(), 2);
        assert_eq!(bv.ancilla(), 0);
        assert_eq!(bv.expected_path(PathOrder::QubitIndex), "0");
    }

    #[test]
    fn test_gate_layout() {
        let bv = BernsteinVazirani::new(0b101).unwrap();
        let names: Vec<_> = bv
            .circuit()
            .operations()
            .map(|op| format!("{}{}", op.gate().name(), op.target().index()))
            .collect();
        assert_eq!(
            names,
            vec!["H0", "H1", "H2", "H3", "Z0", "Z2", "H0", "H1", "H2", "H3"]
        );
    }

    #[test]
    fn test_path_orders() {
        let bv = BernsteinVazirani::new(0b110).unwrap();
        assert_eq!(bv.expected_path(PathOrder::QubitIndex), "0110");
        assert_eq!(bv.expected_path(PathOrder::RootFirst), "0110".chars().rev().collect::<String>());
    }

    #[test]
    fn test_from_bit_string() {
        let bv = BernsteinVazirani::from_bit_string("00101010").unwrap();
        assert_eq!(bv.hidden_integer(), 42);
        assert_eq!(bv.num_qubits(), 7);

        assert!(matches!(
            BernsteinVazirani::from_bit_string("10201"),
            Err(QuantumError::InvalidArgument(_))
        ));
        assert!(BernsteinVazirani::from_bit_string("").is_err());

        let wide = "1".repeat(65);
        assert!(matches!(
            BernsteinVazirani::from_bit_string(&wide),
            Err(QuantumError::InvalidArgument(msg)) if msg.contains("65 bits")
        ));

        let max = BernsteinVazirani::from_bit_string(&format!("000{}", "1".repeat(64))).unwrap();
        assert_eq!(max.hidden_integer(), u64::MAX);
        assert_eq!(max.num_qubits(), 65);
    }

    #[test]
    fn test_print_statistics() {
        let bv = BernsteinVazirani::new(3).unwrap();
        let mut out = Vec::new();
        bv.print_statistics(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hidden integer 3"));
        assert!(text.contains("operations: 8"));
    }
}
