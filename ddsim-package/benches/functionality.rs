//! Benchmarks for building circuit functionality

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ddsim_core::{CircuitBuilder, QuantumCircuit};
use ddsim_gates::StandardGates;
use ddsim_package::{Functionality, Package};

/// H layer, CNOT ladder, H layer
fn entangling_circuit(num_qubits: usize) -> QuantumCircuit {
    let mut builder = CircuitBuilder::with_capacity(num_qubits, 3 * num_qubits).unwrap();
    for q in 0..num_qubits {
        builder.h(q).unwrap();
    }
    for q in 1..num_qubits {
        builder.cx(q - 1, q).unwrap();
    }
    for q in 0..num_qubits {
        builder.h(q).unwrap();
    }
    builder.build()
}

fn bench_build_functionality(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_functionality");

    for num_qubits in [8, 16, 32, 64].iter() {
        let circuit = entangling_circuit(*num_qubits);
        group.throughput(Throughput::Elements(circuit.num_ops() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut dd = Package::new();
                    let func = circuit.build_functionality(&mut dd).unwrap();
                    black_box(dd.node_count(func))
                })
            },
        );
    }

    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");

    for num_qubits in [16, 64, 128].iter() {
        let circuit = entangling_circuit(*num_qubits);
        group.throughput(Throughput::Elements(circuit.num_ops() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut dd = Package::new();
                    let zero = dd.make_zero_state(circuit.num_qubits()).unwrap();
                    let state = circuit.simulate(zero, &mut dd).unwrap();
                    black_box(dd.node_count(state))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_functionality, bench_simulate);
criterion_main!(benches);
