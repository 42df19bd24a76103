//! Spring topology: particle index pairs with rest length and stiffness.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connection class of a spring, in the order the grid builder emits them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpringKind {
    /// `(x, y)` to `(x + 1, y)`.
    StructuralRight,
    /// `(x, y)` to `(x, y + 1)`.
    StructuralDown,
    /// `(x, y)` to `(x + 1, y + 1)`.
    ShearDiagonal,
    /// `(x, y)` to `(x - 1, y + 1)`.
    ShearAntiDiagonal,
    /// `(x, y)` to `(x + 2, y)`, half stiffness.
    BendHorizontal,
    /// `(x, y)` to `(x, y + 2)`, half stiffness.
    BendVertical,
}

impl SpringKind {
    pub fn is_structural(self) -> bool {
        matches!(self, SpringKind::StructuralRight | SpringKind::StructuralDown)
    }

    pub fn is_shear(self) -> bool {
        matches!(self, SpringKind::ShearDiagonal | SpringKind::ShearAntiDiagonal)
    }

    pub fn is_bend(self) -> bool {
        matches!(self, SpringKind::BendHorizontal | SpringKind::BendVertical)
    }
}

/// A damped spring between two particles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spring {
    pub p1: usize,
    pub p2: usize,
    pub rest_length: f32,
    pub stiffness: f32,
    pub kind: SpringKind,
}

impl Spring {
    pub fn new(p1: usize, p2: usize, rest_length: f32, stiffness: f32, kind: SpringKind) -> Self {
        debug_assert!(p1 != p2, "spring endpoints must be distinct");
        Spring { p1, p2, rest_length, stiffness, kind }
    }

    /// True if `index` is one of the endpoints.
    pub fn touches(&self, index: usize) -> bool {
        self.p1 == index || self.p2 == index
    }
}
