//! Qubit addressing and control specifications

use std::fmt;

/// Type-safe identifier for a qubit
///
/// Qubit 0 is the least significant qubit and sits directly above the
/// terminal in a decision diagram; the highest index is the root level.
///
/// # Example
/// ```
/// use ddsim_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

/// Which basis state of a control qubit enables the controlled gate
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ControlKind {
    /// Gate fires when the control is |1⟩
    Positive,
    /// Gate fires when the control is |0⟩
    Negative,
}

/// A control qubit together with its polarity
///
/// # Example
/// ```
/// use ddsim_core::{Control, ControlKind, QubitId};
///
/// let c: Control = QubitId::new(3).into();
/// assert_eq!(c.kind, ControlKind::Positive);
/// assert_eq!(Control::negative(1).to_string(), "!q1");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Control {
    pub qubit: QubitId,
    pub kind: ControlKind,
}

impl Control {
    /// Control that fires on |1⟩
    #[inline]
    pub const fn positive(qubit: usize) -> Self {
        Self {
            qubit: QubitId::new(qubit),
            kind: ControlKind::Positive,
        }
    }

    /// Control that fires on |0⟩
    #[inline]
    pub const fn negative(qubit: usize) -> Self {
        Self {
            qubit: QubitId::new(qubit),
            kind: ControlKind::Negative,
        }
    }
}

impl From<QubitId> for Control {
    #[inline]
    fn from(qubit: QubitId) -> Self {
        Self {
            qubit,
            kind: ControlKind::Positive,
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ControlKind::Positive => write!(f, "{}", self.qubit),
            ControlKind::Negative => write!(f, "!{}", self.qubit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        assert!(QubitId::new(0) < QubitId::new(1));
        assert_eq!(QubitId::from(4).index(), 4);
        assert_eq!(usize::from(QubitId::new(7)), 7);
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(QubitId::new(5).to_string(), "q5");
    }

    #[test]
    fn test_control_constructors() {
        let pos = Control::positive(2);
        let neg = Control::negative(2);
        assert_eq!(pos.qubit, neg.qubit);
        assert_ne!(pos, neg);
        assert_eq!(pos.to_string(), "q2");
        assert_eq!(neg.to_string(), "!q2");
    }
}
