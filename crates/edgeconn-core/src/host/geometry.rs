//! Edge geometry for [`MemoryGraph`](super::MemoryGraph).
//!
//! Parallel edges are drawn as a fan: each edge of a bundle is bowed away
//! from the straight chord by a multiple of the bundle spacing, centered
//! on the chord. A single edge is straight. Loops are stacked above their
//! node.

use crate::types::Position;

/// Geometry settings of the in-memory host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Distance between neighbouring edges of a parallel bundle, measured
    /// at the midpoint. Default: 40.0.
    pub bundle_spacing: f64,

    /// Height of a loop's midpoint above its node. Default: 40.0.
    pub loop_height: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            bundle_spacing: 40.0,
            loop_height: 40.0,
        }
    }
}

/// Where an edge sits inside its parallel bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleSlot {
    pub index: usize,
    pub len: usize,
}

impl BundleSlot {
    pub fn single() -> Self {
        Self { index: 0, len: 1 }
    }

    /// Signed offset in spacing units; 0 for the center of the bundle.
    pub fn offset(&self) -> f64 {
        self.index as f64 - (self.len as f64 - 1.0) / 2.0
    }
}

/// Midpoint of an edge between `a` and `b`, where `a`/`b` are given in the
/// bundle's canonical endpoint order so every edge of the bundle bows
/// relative to the same normal.
///
/// Returns a non-finite point when the bundle cannot be drawn, i.e. two
/// or more parallel edges between coincident endpoints.
pub fn edge_midpoint(a: Position, b: Position, slot: BundleSlot, config: &GeometryConfig) -> Position {
    let center = Position::mean(a, b);
    let offset = slot.offset();
    if offset == 0.0 {
        return center;
    }

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    // len == 0 yields NaN on purpose; callers must not assign it.
    let (nx, ny) = (-dy / len, dx / len);

    Position {
        x: center.x + nx * offset * config.bundle_spacing,
        y: center.y + ny * offset * config.bundle_spacing,
    }
}

/// Midpoint of a loop on a node at `at`.
pub fn loop_midpoint(at: Position, slot: BundleSlot, config: &GeometryConfig) -> Position {
    Position {
        x: at.x,
        y: at.y - config.loop_height * (slot.index as f64 + 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_edge_is_straight() {
        let mid = edge_midpoint(
            Position::new(0.0, 0.0),
            Position::new(10.0, 0.0),
            BundleSlot::single(),
            &GeometryConfig::default(),
        );
        assert_eq!(mid, Position::new(5.0, 0.0));
    }

    #[test]
    fn test_bundle_fans_symmetrically() {
        let config = GeometryConfig::default();
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 0.0);
        let first = edge_midpoint(a, b, BundleSlot { index: 0, len: 2 }, &config);
        let second = edge_midpoint(a, b, BundleSlot { index: 1, len: 2 }, &config);
        assert_eq!(first, Position::new(5.0, -20.0));
        assert_eq!(second, Position::new(5.0, 20.0));
    }

    #[test]
    fn test_odd_bundle_keeps_center_edge_straight() {
        let config = GeometryConfig::default();
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.0, 10.0);
        let middle = edge_midpoint(a, b, BundleSlot { index: 1, len: 3 }, &config);
        assert_eq!(middle, Position::new(0.0, 5.0));
    }

    #[test]
    fn test_coincident_bundle_is_not_drawable() {
        let p = Position::new(3.0, 3.0);
        let mid = edge_midpoint(p, p, BundleSlot { index: 0, len: 2 }, &GeometryConfig::default());
        assert!(!mid.is_valid());
        // a lone edge between coincident nodes still has a midpoint
        let lone = edge_midpoint(p, p, BundleSlot::single(), &GeometryConfig::default());
        assert_eq!(lone, p);
    }

    #[test]
    fn test_loops_stack_upwards() {
        let config = GeometryConfig::default();
        let at = Position::new(1.0, 1.0);
        assert_eq!(loop_midpoint(at, BundleSlot { index: 0, len: 2 }, &config), Position::new(1.0, -39.0));
        assert_eq!(loop_midpoint(at, BundleSlot { index: 1, len: 2 }, &config), Position::new(1.0, -79.0));
    }
}
