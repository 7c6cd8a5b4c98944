//! Integration tests for circuit construction

use ddsim_core::{
    gate::GateMatrix, CircuitBuilder, Complex64, Control, ControlKind, Gate, Operation, QuantumError,
    QubitId,
};
use std::sync::Arc;

#[derive(Debug)]
struct HadamardGate;

impl Gate for HadamardGate {
    fn name(&self) -> &str {
        "H"
    }

    fn matrix(&self) -> GateMatrix {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        [
            [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
            [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
        ]
    }

    fn is_hermitian(&self) -> bool {
        true
    }
}

#[derive(Debug)]
struct NotGate;

impl Gate for NotGate {
    fn name(&self) -> &str {
        "X"
    }

    fn matrix(&self) -> GateMatrix {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        [[zero, one], [one, zero]]
    }
}

#[test]
fn test_ghz_circuit() {
    let h: Arc<dyn Gate> = Arc::new(HadamardGate);
    let x: Arc<dyn Gate> = Arc::new(NotGate);

    let mut builder = CircuitBuilder::new(4).unwrap();
    builder.apply(h, 0, &[]).unwrap();
    for q in 1..4 {
        builder.apply(x.clone(), q, &[Control::positive(q - 1)]).unwrap();
    }
    let circuit = builder.build();

    assert_eq!(circuit.num_qubits(), 4);
    assert_eq!(circuit.num_ops(), 4);
    assert_eq!(circuit.gate_counts()["c1-X"], 3);

    let last = circuit.get_operation(3).unwrap();
    assert_eq!(last.target(), QubitId::new(3));
    assert_eq!(last.controls(), &[Control::positive(2)]);
    assert_eq!(last.to_string(), "c1-X(q2, q3)");
}

#[test]
fn test_toffoli_with_mixed_polarity() {
    let mut builder = CircuitBuilder::new(3).unwrap();
    builder
        .apply(Arc::new(NotGate), 2, &[Control::positive(0), Control::negative(1)])
        .unwrap();
    let circuit = builder.build();

    let op = circuit.get_operation(0).unwrap();
    assert_eq!(op.num_qubits(), 3);
    let kinds: Vec<_> = op.controls().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ControlKind::Positive, ControlKind::Negative]);
    assert!(op.to_string().contains("!q1"));
}

#[test]
fn test_invalid_operations_leave_builder_unchanged() {
    let mut builder = CircuitBuilder::new(2).unwrap();
    builder.apply(Arc::new(HadamardGate), 0, &[]).unwrap();

    assert!(matches!(
        builder.apply(Arc::new(NotGate), 1, &[Control::positive(1)]),
        Err(QuantumError::DuplicateQubit(_))
    ));
    assert!(matches!(
        builder.apply(Arc::new(NotGate), 0, &[Control::positive(7)]),
        Err(QuantumError::InvalidQubit(7, 2))
    ));
    assert_eq!(builder.num_operations(), 1);
}

#[test]
fn test_operations_are_shared_not_copied() {
    let h: Arc<dyn Gate> = Arc::new(HadamardGate);
    let op = Operation::new(h.clone(), QubitId::new(0), &[]).unwrap();

    let mut builder = CircuitBuilder::new(1).unwrap();
    builder.push(op.clone()).unwrap().push(op).unwrap();
    let circuit = builder.build();

    assert_eq!(circuit.num_ops(), 2);
    // builder's two copies plus the local handle
    assert_eq!(Arc::strong_count(&h), 3);
}

#[test]
fn test_statistics_output() {
    let mut builder = CircuitBuilder::new(2).unwrap();
    builder.apply(Arc::new(HadamardGate), 0, &[]).unwrap();
    builder.apply(Arc::new(HadamardGate), 1, &[]).unwrap();
    let circuit = builder.build();

    let mut out = Vec::new();
    circuit.print_statistics(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("operations: 2"));
    assert!(text.contains("H"));
}
