//! Bernstein–Vazirani functionality tests

use approx::assert_relative_eq;
use ddsim_algorithms::BernsteinVazirani;
use ddsim_package::{Functionality, Package, PackageConfig, PathOrder};

const HIDDEN_INTEGERS: [u64; 10] = [
    0, // zero
    3,
    63,
    170, // up to 8 bits
    819,
    4032,
    33153, // up to 16 bits
    87381,
    16777215,
    1234567891011, // beyond 32 bits
];

fn check_functionality(hidden: u64, config: PackageConfig) {
    let bv = BernsteinVazirani::new(hidden).unwrap();
    let size = bv.num_qubits();

    assert_eq!(size, (64 - hidden.leading_zeros()) as usize + 1);
    assert_eq!(bv.num_ops(), 2 * size + hidden.count_ones() as usize);

    let order = config.path_order;
    let mut dd = Package::with_config(config).unwrap();
    let func = bv.build_functionality(&mut dd).unwrap();
    let zero = dd.make_zero_state(size).unwrap();
    let result = dd.multiply(func, zero).unwrap();

    let value = dd.get_value_by_path(result, &bv.expected_path(order)).unwrap();
    assert_relative_eq!(value.re, 1.0, epsilon = 1e-9);
    assert_relative_eq!(value.im, 0.0, epsilon = 1e-9);
}

#[test]
fn test_functionality_for_hidden_integers() {
    for hidden in HIDDEN_INTEGERS {
        check_functionality(hidden, PackageConfig::default());
    }
}

#[test]
fn test_functionality_root_first_paths() {
    for hidden in HIDDEN_INTEGERS {
        check_functionality(hidden, PackageConfig::default().with_path_order(PathOrder::RootFirst));
    }
}

#[test]
fn test_functionality_with_aggressive_collection() {
    for hidden in [170, 87381, 1234567891011] {
        check_functionality(hidden, PackageConfig::small().with_gc_thresholds(1, 1));
    }
}

#[test]
fn test_result_is_a_basis_state() {
    let bv = BernsteinVazirani::new(819).unwrap();
    let mut dd = Package::new();
    let zero = dd.make_zero_state(bv.num_qubits()).unwrap();
    let result = bv.simulate(zero, &mut dd).unwrap();

    // One node per qubit
    assert_eq!(dd.node_count(result), bv.num_qubits());

    let path = bv.expected_path(PathOrder::QubitIndex);
    let mut flipped: Vec<char> = path.chars().collect();
    flipped[0] = if flipped[0] == '1' { '0' } else { '1' };
    let other: String = flipped.into_iter().collect();
    let value = dd.get_value_by_path(result, &other).unwrap();
    assert_relative_eq!(value.norm(), 0.0, epsilon = 1e-9);
}

#[test]
fn test_repeated_builds_do_not_grow_tables() {
    let bv = BernsteinVazirani::new(33153).unwrap();
    let mut dd = Package::new();

    for _ in 0..4 {
        let func = bv.build_functionality(&mut dd).unwrap();
        dd.dec_ref(func);
        dd.collect_garbage();
        assert_eq!(dd.live_nodes(), 0);
        assert_eq!(dd.complex_table().len(), 4);
    }
}

#[test]
fn test_widest_hidden_integer() {
    let bv = BernsteinVazirani::new(u64::MAX).unwrap();
    assert_eq!(bv.num_qubits(), 65);
    assert_eq!(bv.num_ops(), 2 * 65 + 64);
    check_functionality(u64::MAX, PackageConfig::default());
}

#[test]
fn test_widest_bit_lengths() {
    // 63 and 64 significant bits, sparse and dense
    for hidden in [1u64 << 62, (1u64 << 63) - 1, 1u64 << 63, u64::MAX - 1] {
        check_functionality(hidden, PackageConfig::default());
    }
}

#[test]
fn test_widest_with_aggressive_collection() {
    check_functionality(1u64 << 63, PackageConfig::small().with_gc_thresholds(1, 1));
    check_functionality(u64::MAX, PackageConfig::small().with_gc_thresholds(1, 1));
}
