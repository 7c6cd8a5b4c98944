//! Pre-computed single-qubit gate matrices
//!
//! Every gate in this library is a single-target 2×2 unitary; multi-qubit
//! gates (CNOT, CZ, Toffoli, ...) are the same matrices placed under
//! controls, which is how a decision-diagram gate constructor consumes them.

use ddsim_core::GateMatrix;
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// 1/√2
pub const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// H = 1/√2 · [[1, 1], [1, -1]]
pub const HADAMARD: GateMatrix = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// X = [[0, 1], [1, 0]]
pub const PAULI_X: GateMatrix = [[ZERO, ONE], [ONE, ZERO]];

/// Y = [[0, -i], [i, 0]]
pub const PAULI_Y: GateMatrix = [[ZERO, Complex64::new(0.0, -1.0)], [I, ZERO]];

/// Z = [[1, 0], [0, -1]]
pub const PAULI_Z: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

/// I = [[1, 0], [0, 1]]
pub const IDENTITY: GateMatrix = [[ONE, ZERO], [ZERO, ONE]];

/// S = [[1, 0], [0, i]]
pub const S_GATE: GateMatrix = [[ONE, ZERO], [ZERO, I]];

/// S† = [[1, 0], [0, -i]]
pub const S_GATE_DAGGER: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(0.0, -1.0)]];

/// T = [[1, 0], [0, e^(iπ/4)]]
pub const T_GATE: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)]];

/// T† = [[1, 0], [0, e^(-iπ/4)]]
pub const T_GATE_DAGGER: GateMatrix = [[ONE, ZERO], [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)]];

/// √X = 1/2 · [[1+i, 1-i], [1-i, 1+i]]
pub const SX_GATE: GateMatrix = [
    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
];

/// RX(θ) = [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]]
pub fn rotation_x(theta: f64) -> GateMatrix {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
        [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
pub fn rotation_y(theta: f64) -> GateMatrix {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
        [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
    ]
}

/// RZ(θ) = [[e^(-iθ/2), 0], [0, e^(iθ/2)]]
pub fn rotation_z(theta: f64) -> GateMatrix {
    let half = theta / 2.0;
    [
        [Complex64::from_polar(1.0, -half), ZERO],
        [ZERO, Complex64::from_polar(1.0, half)],
    ]
}

/// P(θ) = [[1, 0], [0, e^(iθ)]]
pub fn phase(theta: f64) -> GateMatrix {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

/// Product `a · b` of two 2×2 matrices
pub fn multiply(a: &GateMatrix, b: &GateMatrix) -> GateMatrix {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

/// Conjugate transpose of a 2×2 matrix
pub fn adjoint(m: &GateMatrix) -> GateMatrix {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn assert_matrix_eq(a: &GateMatrix, b: &GateMatrix) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-12);
                assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_hadamard_squares_to_identity() {
        assert_matrix_eq(&multiply(&HADAMARD, &HADAMARD), &IDENTITY);
    }

    #[test]
    fn test_hzh_is_x() {
        let hzh = multiply(&HADAMARD, &multiply(&PAULI_Z, &HADAMARD));
        assert_matrix_eq(&hzh, &PAULI_X);
    }

    #[test]
    fn test_t_squared_is_s() {
        assert_matrix_eq(&multiply(&T_GATE, &T_GATE), &S_GATE);
        assert_matrix_eq(&adjoint(&S_GATE), &S_GATE_DAGGER);
        assert_matrix_eq(&adjoint(&T_GATE), &T_GATE_DAGGER);
    }

    #[test]
    fn test_sx_squared_is_x() {
        assert_matrix_eq(&multiply(&SX_GATE, &SX_GATE), &PAULI_X);
    }

    #[test]
    fn test_phase_pi_is_z() {
        assert_matrix_eq(&phase(PI), &PAULI_Z);
        assert_matrix_eq(&phase(PI / 2.0), &S_GATE);
    }

    #[test]
    fn test_rotations_at_pi() {
        // RX(π) = -iX, RZ(π) = -iZ up to numerics
        let minus_i = Complex64::new(0.0, -1.0);
        let rx = rotation_x(PI);
        assert_relative_eq!(rx[0][1].im, minus_i.im, epsilon = 1e-12);
        assert_relative_eq!(rx[0][0].re, 0.0, epsilon = 1e-12);

        let ry = rotation_y(PI);
        assert_relative_eq!(ry[1][0].re, 1.0, epsilon = 1e-12);

        let rz = rotation_z(PI);
        assert_relative_eq!(rz[0][0].im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rz[1][1].im, 1.0, epsilon = 1e-12);
    }
}
