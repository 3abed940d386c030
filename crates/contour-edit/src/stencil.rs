use serde::Deserialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StencilKind {
    #[default]
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StencilError {
    #[error("stencil radius must be non-negative, got {0}")]
    NegativeRadius(i32),
}

/// Edit descriptor: decides per cell whether to overwrite its state.
///
/// The center is in the cell coordinates of whatever grid the stencil is
/// applied to; the map re-centers one stencil per chunk with [`Stencil::with_center`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    kind: StencilKind,
    fill: bool,
    center_x: i64,
    center_y: i64,
    radius: i32,
}

impl Stencil {
    pub fn new(kind: StencilKind, fill: bool, radius: i32) -> Result<Self, StencilError> {
        if radius < 0 {
            return Err(StencilError::NegativeRadius(radius));
        }
        Ok(Self {
            kind,
            fill,
            center_x: 0,
            center_y: 0,
            radius,
        })
    }

    /// Infallible constructor for radii that cannot be negative.
    pub fn from_step(kind: StencilKind, fill: bool, radius: u8) -> Self {
        Self {
            kind,
            fill,
            center_x: 0,
            center_y: 0,
            radius: radius as i32,
        }
    }

    #[inline]
    pub fn square(fill: bool, radius: i32) -> Result<Self, StencilError> {
        Self::new(StencilKind::Square, fill, radius)
    }

    #[inline]
    pub fn circle(fill: bool, radius: i32) -> Result<Self, StencilError> {
        Self::new(StencilKind::Circle, fill, radius)
    }

    #[inline]
    #[must_use]
    pub fn with_center(mut self, x: i64, y: i64) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }

    #[inline]
    pub fn kind(&self) -> StencilKind {
        self.kind
    }

    #[inline]
    pub fn fill(&self) -> bool {
        self.fill
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn x_start(&self) -> i64 {
        self.center_x.saturating_sub(self.radius as i64)
    }

    #[inline]
    pub fn x_end(&self) -> i64 {
        self.center_x.saturating_add(self.radius as i64)
    }

    #[inline]
    pub fn y_start(&self) -> i64 {
        self.center_y.saturating_sub(self.radius as i64)
    }

    #[inline]
    pub fn y_end(&self) -> i64 {
        self.center_y.saturating_add(self.radius as i64)
    }

    /// Membership test. Both kinds share the inclusive bounding box; the
    /// circle narrows it to `dx² + dy² <= r²`.
    #[inline]
    pub fn affects(&self, x: i64, y: i64) -> bool {
        // i128 keeps the offsets exact for any i64 pair; squaring only
        // happens inside the box, where |dx|, |dy| <= i32::MAX.
        let dx = x as i128 - self.center_x as i128;
        let dy = y as i128 - self.center_y as i128;
        let r = self.radius as i128;
        if dx.abs() > r || dy.abs() > r {
            return false;
        }
        match self.kind {
            StencilKind::Square => true,
            StencilKind::Circle => dx * dx + dy * dy <= r * r,
        }
    }

    #[inline]
    pub fn decide(&self, x: i64, y: i64, current: bool) -> bool {
        if self.affects(x, y) { self.fill } else { current }
    }

    /// Same as [`Stencil::decide`]; kept as the name brush callers expect.
    #[inline]
    pub fn apply(&self, x: i64, y: i64, current: bool) -> bool {
        self.decide(x, y, current)
    }
}
