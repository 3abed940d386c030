//! The 16-entry marching-squares lookup table.
//!
//! For a 2×2 neighborhood `a = (x, y)`, `b = (x+1, y)`, `c = (x, y+1)`,
//! `d = (x+1, y+1)` the case code is `a | b<<1 | c<<2 | d<<3`. Each entry lists
//! the polygons to emit, counter-clockwise with +y up, as slots that the
//! surface cache resolves to vertex indices.

/// Vertex slot of one cell: a corner, or the crossing on one of its edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
    C,
    D,
    /// Edge a-b (x-edge of `a`).
    Ab,
    /// Edge c-d (x-edge of `c`).
    Cd,
    /// Edge a-c (y-edge of `a`).
    Ac,
    /// Edge b-d (y-edge of `b`).
    Bd,
}

impl Slot {
    pub const CORNERS: [Slot; 4] = [Slot::A, Slot::B, Slot::C, Slot::D];

    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(self, Slot::A | Slot::B | Slot::C | Slot::D)
    }

    /// Corner bit in the case code, for corner slots.
    #[inline]
    pub fn corner_bit(self) -> Option<u8> {
        match self {
            Slot::A => Some(1),
            Slot::B => Some(2),
            Slot::C => Some(4),
            Slot::D => Some(8),
            _ => None,
        }
    }

    /// The two corner bits bounding an edge slot.
    #[inline]
    pub fn edge_bits(self) -> Option<(u8, u8)> {
        match self {
            Slot::Ab => Some((1, 2)),
            Slot::Cd => Some((4, 8)),
            Slot::Ac => Some((1, 4)),
            Slot::Bd => Some((2, 8)),
            _ => None,
        }
    }

    /// Position in the unit cell (a at the origin), used for winding checks.
    pub fn unit_position(self) -> (f32, f32) {
        match self {
            Slot::A => (0.0, 0.0),
            Slot::B => (1.0, 0.0),
            Slot::C => (0.0, 1.0),
            Slot::D => (1.0, 1.0),
            Slot::Ab => (0.5, 0.0),
            Slot::Cd => (0.5, 1.0),
            Slot::Ac => (0.0, 0.5),
            Slot::Bd => (1.0, 0.5),
        }
    }
}

#[inline]
pub fn case_code(a: bool, b: bool, c: bool, d: bool) -> u8 {
    (a as u8) | (b as u8) << 1 | (c as u8) << 2 | (d as u8) << 3
}

use Slot::*;

/// Diagonal pairs (6 and 9) are always two disconnected triangles.
pub static CASES: [&[&[Slot]]; 16] = [
    &[],
    &[&[A, Ab, Ac]],
    &[&[Ab, B, Bd]],
    &[&[A, B, Bd, Ac]],
    &[&[Cd, C, Ac]],
    &[&[A, Ab, Cd, C]],
    &[&[Ab, B, Bd], &[Cd, C, Ac]],
    &[&[A, B, Bd, Cd, C]],
    &[&[Bd, D, Cd]],
    &[&[A, Ab, Ac], &[Bd, D, Cd]],
    &[&[Ab, B, D, Cd]],
    &[&[A, B, D, Cd, Ac]],
    &[&[Bd, D, C, Ac]],
    &[&[A, Ab, Bd, D, C]],
    &[&[Ab, B, D, C, Ac]],
    &[&[A, B, D, C]],
];

#[inline]
pub fn polygons(code: u8) -> &'static [&'static [Slot]] {
    CASES[(code & 0x0F) as usize]
}

/// Triangles emitted for a case code.
pub fn triangle_count(code: u8) -> usize {
    polygons(code).iter().map(|p| p.len() - 2).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_bits() {
        assert_eq!(case_code(false, false, false, false), 0);
        assert_eq!(case_code(true, false, false, false), 1);
        assert_eq!(case_code(false, true, true, false), 6);
        assert_eq!(case_code(true, true, true, true), 15);
    }

    #[test]
    fn shape_classes() {
        for code in [1u8, 2, 4, 8] {
            assert_eq!(polygons(code).len(), 1);
            assert_eq!(polygons(code)[0].len(), 3);
        }
        for code in [3u8, 5, 10, 12, 15] {
            assert_eq!(polygons(code).len(), 1);
            assert_eq!(polygons(code)[0].len(), 4);
        }
        for code in [7u8, 11, 13, 14] {
            assert_eq!(polygons(code).len(), 1);
            assert_eq!(polygons(code)[0].len(), 5);
        }
        for code in [6u8, 9] {
            assert_eq!(polygons(code).len(), 2);
            assert!(polygons(code).iter().all(|p| p.len() == 3));
        }
        assert!(polygons(0).is_empty());
        assert_eq!(triangle_count(15), 2);
        assert_eq!(triangle_count(7), 3);
    }
}
