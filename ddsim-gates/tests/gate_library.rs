//! Properties of the standard gate set

use approx::assert_relative_eq;
use ddsim_core::{CircuitBuilder, Control, Gate, GateMatrix};
use ddsim_gates::matrices::{adjoint, multiply, IDENTITY};
use ddsim_gates::*;
use std::collections::HashSet;
use std::f64::consts::PI;
use std::sync::Arc;

fn all_gates() -> Vec<Arc<dyn Gate>> {
    vec![
        Arc::new(Identity),
        Arc::new(Hadamard),
        Arc::new(PauliX),
        Arc::new(PauliY),
        Arc::new(PauliZ),
        Arc::new(SGate),
        Arc::new(SGateDagger),
        Arc::new(TGate),
        Arc::new(TGateDagger),
        Arc::new(SXGate),
        Arc::new(Phase::new(0.4)),
        Arc::new(RotationX::new(1.1)),
        Arc::new(RotationY::new(-0.3)),
        Arc::new(RotationZ::new(PI / 3.0)),
    ]
}

fn assert_matrix_eq(a: &GateMatrix, b: &GateMatrix) {
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-12);
            assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_every_gate_is_unitary() {
    for gate in all_gates() {
        let m = gate.matrix();
        assert_matrix_eq(&multiply(&adjoint(&m), &m), &IDENTITY);
    }
}

#[test]
fn test_hermitian_gates_are_self_adjoint() {
    for gate in all_gates().into_iter().filter(|g| g.is_hermitian()) {
        let m = gate.matrix();
        assert_matrix_eq(&adjoint(&m), &m);
    }
}

#[test]
fn test_fixed_gate_names_are_unique() {
    let names: HashSet<String> = all_gates()
        .iter()
        .take(10)
        .map(|g| g.name().to_string())
        .collect();
    assert_eq!(names.len(), 10);
}

#[test]
fn test_dagger_pairs_cancel() {
    assert_matrix_eq(&multiply(SGate::matrix(), SGateDagger::matrix()), &IDENTITY);
    assert_matrix_eq(&multiply(TGate::matrix(), TGateDagger::matrix()), &IDENTITY);
}

#[test]
fn test_rotation_composition() {
    let a = RotationZ::new(0.25).matrix();
    let b = RotationZ::new(0.5).matrix();
    assert_matrix_eq(&multiply(&a, &b), &RotationZ::new(0.75).matrix());
}

#[test]
fn test_shorthands_use_standard_gates() {
    let mut builder = CircuitBuilder::new(3).unwrap();
    builder
        .h(0)
        .unwrap()
        .cx(0, 1)
        .unwrap()
        .mcx(&[Control::positive(0), Control::positive(1)], 2)
        .unwrap()
        .phase(2, PI)
        .unwrap();
    let circuit = builder.build();

    let gate_counts = circuit.gate_counts();
    assert_eq!(gate_counts["H"], 1);
    assert_eq!(gate_counts["c1-X"], 1);
    assert_eq!(gate_counts["c2-X"], 1);
    assert_matrix_eq(
        &circuit.get_operation(3).unwrap().gate().matrix(),
        PauliZ::matrix(),
    );
}
