//! The 2D lattice: counts, domain mapping and wrap-aware index math.

use glam::DVec2;
use weft_core::{FieldError, GridPoint2d, WrapMode};

/// A regular 2D lattice of `count_x * count_y` nodes over a [`Domain2d`].
///
/// Grid space has one unit per cell spacing with its origin at the domain's
/// minimum corner: `g = (p - min) * scale` with `scale = count / span`.
/// Node `(i, j)` therefore sits at world position `min + (i, j) / scale`.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use weft_core::WrapMode;
/// use weft_grid::{Domain2d, Grid2d};
///
/// let grid = Grid2d::new(Domain2d::from_corners(DVec2::ZERO, DVec2::splat(4.0)), 4, 4)
///     .unwrap()
///     .with_wrap(WrapMode::Repeat, WrapMode::Repeat);
/// assert_eq!(grid.count(), 16);
/// assert_eq!(grid.index_of(1, 2), 9);
/// assert_eq!(grid.index_of_wrapped(-1, 0), 3);
/// ```
///
/// [`Domain2d`]: crate::Domain2d
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid2d {
    domain: crate::Domain2d,
    count_x: usize,
    count_y: usize,
    wrap_x: WrapMode,
    wrap_y: WrapMode,
    scale: DVec2,
}

impl Grid2d {
    /// Create a lattice with [`WrapMode::Clamp`] on both axes.
    ///
    /// Returns `Err(FieldError::EmptyGrid)` if either count is 0 and
    /// `Err(FieldError::InvalidDomain)` if an axis is degenerate.
    pub fn new(domain: crate::Domain2d, count_x: usize, count_y: usize) -> Result<Self, FieldError> {
        if count_x == 0 || count_y == 0 {
            return Err(FieldError::EmptyGrid);
        }
        domain.validate()?;
        let scale = DVec2::new(count_x as f64, count_y as f64) / domain.span();
        Ok(Self {
            domain,
            count_x,
            count_y,
            wrap_x: WrapMode::Clamp,
            wrap_y: WrapMode::Clamp,
            scale,
        })
    }

    /// Set per-axis wrap modes.
    pub fn with_wrap(mut self, wrap_x: WrapMode, wrap_y: WrapMode) -> Self {
        self.wrap_x = wrap_x;
        self.wrap_y = wrap_y;
        self
    }

    /// Set the same wrap mode on both axes.
    pub fn with_wrap_all(self, wrap: WrapMode) -> Self {
        self.with_wrap(wrap, wrap)
    }

    /// World-space extent.
    pub fn domain(&self) -> &crate::Domain2d {
        &self.domain
    }

    /// Total node count.
    pub fn count(&self) -> usize {
        self.count_x * self.count_y
    }

    /// Nodes along x.
    pub fn count_x(&self) -> usize {
        self.count_x
    }

    /// Nodes along y.
    pub fn count_y(&self) -> usize {
        self.count_y
    }

    /// Wrap mode along x.
    pub fn wrap_x(&self) -> WrapMode {
        self.wrap_x
    }

    /// Wrap mode along y.
    pub fn wrap_y(&self) -> WrapMode {
        self.wrap_y
    }

    /// Cached `count / span` per axis.
    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    /// World-space distance between neighbouring nodes per axis.
    pub fn cell_spacing(&self) -> DVec2 {
        DVec2::ONE / self.scale
    }

    /// Returns `true` if `other` has the same counts, domain and wrap modes.
    pub fn same_shape(&self, other: &Self) -> bool {
        self == other
    }

    /// Flat index of node `(x, y)`. Coordinates must be in range.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.count_x && y < self.count_y);
        x + y * self.count_x
    }

    /// Flat index of node `(x, y)` after wrapping each coordinate.
    #[inline]
    pub fn index_of_wrapped(&self, x: i64, y: i64) -> usize {
        self.wrap_x.apply(x, self.count_x) + self.wrap_y.apply(y, self.count_y) * self.count_x
    }

    /// Node coordinates of a flat index.
    #[inline]
    pub fn indices_of(&self, index: usize) -> (usize, usize) {
        (index % self.count_x, index / self.count_x)
    }

    /// Map a world-space point to grid space.
    #[inline]
    pub fn to_grid_space(&self, point: DVec2) -> DVec2 {
        (point - self.domain.min()) * self.scale
    }

    /// Map a grid-space point to world space.
    #[inline]
    pub fn from_grid_space(&self, point: DVec2) -> DVec2 {
        point / self.scale + self.domain.min()
    }

    /// World-space position of the node at `index`.
    pub fn coordinate_at(&self, index: usize) -> DVec2 {
        let (x, y) = self.indices_of(index);
        self.from_grid_space(DVec2::new(x as f64, y as f64))
    }

    /// Flat index of the node nearest to `point`, wrapped.
    pub fn index_nearest(&self, point: DVec2) -> usize {
        let g = self.to_grid_space(point).round();
        self.index_of_wrapped(g.x as i64, g.y as i64)
    }

    /// Returns `true` if the query cell of `point` lies strictly inside the
    /// lattice, i.e. `0 <= floor(g) && floor(g) + 1 < count` on both axes.
    ///
    /// Exactly the queries for which [`grid_point_interior`](Self::grid_point_interior)
    /// is valid.
    pub fn is_interior(&self, point: DVec2) -> bool {
        let g = self.to_grid_space(point).floor();
        axis_interior(g.x, self.count_x) && axis_interior(g.y, self.count_y)
    }

    /// Corner indices (in witness order) and fractional offsets of `point`,
    /// with every corner resolved through its axis's wrap mode.
    pub fn locate(&self, point: DVec2) -> ([usize; 4], DVec2) {
        let (cell, frac) = split(self.to_grid_space(point));
        let x0 = self.wrap_x.apply(cell.0, self.count_x);
        let x1 = self.wrap_x.apply(cell.0.saturating_add(1), self.count_x);
        let y0 = self.wrap_y.apply(cell.1, self.count_y) * self.count_x;
        let y1 = self.wrap_y.apply(cell.1.saturating_add(1), self.count_y) * self.count_x;
        ([x0 + y0, x1 + y0, x0 + y1, x1 + y1], frac)
    }

    /// [`locate`](Self::locate) without wrap calls.
    ///
    /// Only valid when [`is_interior`](Self::is_interior) holds for `point`;
    /// checked in debug builds. For interior queries the result equals
    /// [`locate`](Self::locate).
    pub fn locate_interior(&self, point: DVec2) -> ([usize; 4], DVec2) {
        debug_assert!(
            self.is_interior(point),
            "interior query {point:?} touches the grid boundary"
        );
        let (cell, frac) = split(self.to_grid_space(point));
        let base = cell.0 as usize + cell.1 as usize * self.count_x;
        let nx = self.count_x;
        ([base, base + 1, base + nx, base + nx + 1], frac)
    }

    /// Bounds-safe interpolation witness for `point`.
    pub fn grid_point(&self, point: DVec2) -> GridPoint2d {
        let (corners, frac) = self.locate(point);
        witness(corners, frac)
    }

    /// Interpolation witness for an interior `point`; see
    /// [`locate_interior`](Self::locate_interior).
    pub fn grid_point_interior(&self, point: DVec2) -> GridPoint2d {
        let (corners, frac) = self.locate_interior(point);
        witness(corners, frac)
    }
}

#[inline]
fn witness(corners: [usize; 4], frac: DVec2) -> GridPoint2d {
    let mut p = GridPoint2d::new(corners, [0.0; 4]);
    p.set_weights(frac.x, frac.y);
    p
}

/// Split a grid-space point into its integer cell and fractional offset.
#[inline]
pub(crate) fn split(g: DVec2) -> ((i64, i64), DVec2) {
    let f = g.floor();
    ((f.x as i64, f.y as i64), g - f)
}

#[inline]
pub(crate) fn axis_interior(cell: f64, count: usize) -> bool {
    cell >= 0.0 && cell + 1.0 < count as f64
}
