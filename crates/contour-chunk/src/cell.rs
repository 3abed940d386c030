use contour_geom::Vec2;

/// One occupancy sample plus the anchor points triangulation reads from it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub state: bool,
    pub center: Vec2,
    /// Midpoint towards the next cell along +x.
    pub x_edge: Vec2,
    /// Midpoint towards the next cell along +y.
    pub y_edge: Vec2,
}

impl Cell {
    /// Cell at column `x`, row `y`. A non-positive `size` leaves every anchor
    /// at the origin.
    pub fn new(x: usize, y: usize, size: f32) -> Self {
        if !(size > 0.0) {
            return Self::default();
        }
        let center = Vec2::new((x as f32 + 0.5) * size, (y as f32 + 0.5) * size);
        let half = size * 0.5;
        Self {
            state: false,
            center,
            x_edge: center + Vec2::new(half, 0.0),
            y_edge: center + Vec2::new(0.0, half),
        }
    }

    #[inline]
    fn translated(src: &Cell, by: Vec2) -> Self {
        Self {
            state: src.state,
            center: src.center + by,
            x_edge: src.x_edge + by,
            y_edge: src.y_edge + by,
        }
    }

    /// Copy of a right-hand neighbor's cell shifted by `offset` along +x.
    #[inline]
    pub fn x_ghost_of(src: &Cell, offset: f32) -> Self {
        Self::translated(src, Vec2::new(offset, 0.0))
    }

    /// Copy of a below neighbor's cell shifted by `offset` along +y.
    #[inline]
    pub fn y_ghost_of(src: &Cell, offset: f32) -> Self {
        Self::translated(src, Vec2::new(0.0, offset))
    }

    /// Copy of a diagonal neighbor's cell shifted by `offset` on both axes.
    #[inline]
    pub fn xy_ghost_of(src: &Cell, offset: f32) -> Self {
        Self::translated(src, Vec2::splat(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_sit_at_center_and_edge_midpoints() {
        let c = Cell::new(2, 1, 0.5);
        assert_eq!(c.center, Vec2::new(1.25, 0.75));
        assert_eq!(c.x_edge, Vec2::new(1.5, 0.75));
        assert_eq!(c.y_edge, Vec2::new(1.25, 1.0));
        assert!(!c.state);
    }

    #[test]
    fn non_positive_size_leaves_anchors_at_origin() {
        assert_eq!(Cell::new(3, 3, 0.0), Cell::default());
        assert_eq!(Cell::new(3, 3, -1.0), Cell::default());
    }

    #[test]
    fn ghosts_copy_state_and_translate() {
        let mut src = Cell::new(0, 0, 1.0);
        src.state = true;
        let gx = Cell::x_ghost_of(&src, 4.0);
        let gy = Cell::y_ghost_of(&src, 4.0);
        let gxy = Cell::xy_ghost_of(&src, 4.0);
        assert!(gx.state && gy.state && gxy.state);
        assert_eq!(gx.center, Vec2::new(4.5, 0.5));
        assert_eq!(gy.x_edge, Vec2::new(1.0, 4.5));
        assert_eq!(gxy.y_edge, Vec2::new(4.5, 5.0));
    }
}
