//! # Position Math
//!
//! World-space coordinates and the straight-line distance used by the
//! speed and range checks. Distance units match the client's world scale
//! (1 unit = 1 meter).

use serde::{Deserialize, Serialize};

/// A position in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
    /// Z coordinate in world space.
    pub z: f32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(1.0, 2.0, 3.0);
        let b = Position::new(-4.0, 0.5, 9.0);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < f32::EPSILON);
    }
}
