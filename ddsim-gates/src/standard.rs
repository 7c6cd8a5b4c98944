//! Standard gate types

use crate::matrices;
use ddsim_core::gate::{Gate, GateMatrix};

/// Declares a unit struct gate backed by a constant matrix
macro_rules! fixed_gate {
    ($(#[$doc:meta])* $gate:ident, $name:expr, $matrix:expr, hermitian = $herm:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $gate;

        impl $gate {
            /// Returns the pre-computed gate matrix
            #[inline]
            pub const fn matrix() -> &'static GateMatrix {
                &$matrix
            }
        }

        impl Gate for $gate {
            fn name(&self) -> &str {
                $name
            }

            fn matrix(&self) -> GateMatrix {
                $matrix
            }

            fn is_hermitian(&self) -> bool {
                $herm
            }
        }
    };
}

fixed_gate!(
    /// Identity gate
    Identity, "I", matrices::IDENTITY, hermitian = true
);

fixed_gate!(
    /// Hadamard gate
    ///
    /// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
    Hadamard, "H", matrices::HADAMARD, hermitian = true
);

fixed_gate!(
    /// Pauli-X gate (NOT)
    PauliX, "X", matrices::PAULI_X, hermitian = true
);

fixed_gate!(
    /// Pauli-Y gate
    PauliY, "Y", matrices::PAULI_Y, hermitian = true
);

fixed_gate!(
    /// Pauli-Z gate
    ///
    /// Phase flip: Z|1⟩ = -|1⟩
    PauliZ, "Z", matrices::PAULI_Z, hermitian = true
);

fixed_gate!(
    /// S gate (√Z)
    SGate, "S", matrices::S_GATE, hermitian = false
);

fixed_gate!(
    /// S† gate
    SGateDagger, "Sdg", matrices::S_GATE_DAGGER, hermitian = false
);

fixed_gate!(
    /// T gate (√S)
    TGate, "T", matrices::T_GATE, hermitian = false
);

fixed_gate!(
    /// T† gate
    TGateDagger, "Tdg", matrices::T_GATE_DAGGER, hermitian = false
);

fixed_gate!(
    /// √X gate
    SXGate, "SX", matrices::SX_GATE, hermitian = false
);

/// Phase gate P(θ) = diag(1, e^(iθ))
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    theta: f64,
}

impl Phase {
    pub const fn new(theta: f64) -> Self {
        Self { theta }
    }

    pub const fn angle(&self) -> f64 {
        self.theta
    }
}

impl Gate for Phase {
    fn name(&self) -> &str {
        "P"
    }

    fn matrix(&self) -> GateMatrix {
        matrices::phase(self.theta)
    }

    fn is_diagonal(&self) -> bool {
        true
    }

    fn description(&self) -> String {
        format!("P({:.4})", self.theta)
    }
}

/// Declares a rotation gate parameterized by one angle
macro_rules! rotation_gate {
    ($(#[$doc:meta])* $gate:ident, $name:expr, $matrix_fn:path) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $gate {
            theta: f64,
        }

        impl $gate {
            pub const fn new(theta: f64) -> Self {
                Self { theta }
            }

            pub const fn angle(&self) -> f64 {
                self.theta
            }
        }

        impl Gate for $gate {
            fn name(&self) -> &str {
                $name
            }

            fn matrix(&self) -> GateMatrix {
                $matrix_fn(self.theta)
            }

            fn description(&self) -> String {
                format!("{}({:.4})", $name, self.theta)
            }
        }
    };
}

rotation_gate!(
    /// Rotation about the X axis
    RotationX, "RX", matrices::rotation_x
);

rotation_gate!(
    /// Rotation about the Y axis
    RotationY, "RY", matrices::rotation_y
);

rotation_gate!(
    /// Rotation about the Z axis
    RotationZ, "RZ", matrices::rotation_z
);
