//! The 3D lattice: counts, domain mapping and wrap-aware index math.

use glam::DVec3;
use weft_core::{FieldError, GridPoint3d, WrapMode};

use crate::grid2d::axis_interior;
use crate::Domain3d;

/// A regular 3D lattice of `count_x * count_y * count_z` nodes over a
/// [`Domain3d`].
///
/// Same conventions as [`Grid2d`](crate::Grid2d): grid space is
/// `(p - min) * scale` with `scale = count / span`, and the flat index of
/// node `(x, y, z)` is `x + y * count_x + z * count_x * count_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid3d {
    domain: Domain3d,
    count_x: usize,
    count_y: usize,
    count_z: usize,
    wrap_x: WrapMode,
    wrap_y: WrapMode,
    wrap_z: WrapMode,
    scale: DVec3,
}

impl Grid3d {
    /// Create a lattice with [`WrapMode::Clamp`] on every axis.
    pub fn new(
        domain: Domain3d,
        count_x: usize,
        count_y: usize,
        count_z: usize,
    ) -> Result<Self, FieldError> {
        if count_x == 0 || count_y == 0 || count_z == 0 {
            return Err(FieldError::EmptyGrid);
        }
        domain.validate()?;
        let scale = DVec3::new(count_x as f64, count_y as f64, count_z as f64) / domain.span();
        Ok(Self {
            domain,
            count_x,
            count_y,
            count_z,
            wrap_x: WrapMode::Clamp,
            wrap_y: WrapMode::Clamp,
            wrap_z: WrapMode::Clamp,
            scale,
        })
    }

    /// Set per-axis wrap modes.
    pub fn with_wrap(mut self, wrap_x: WrapMode, wrap_y: WrapMode, wrap_z: WrapMode) -> Self {
        self.wrap_x = wrap_x;
        self.wrap_y = wrap_y;
        self.wrap_z = wrap_z;
        self
    }

    /// Set the same wrap mode on every axis.
    pub fn with_wrap_all(self, wrap: WrapMode) -> Self {
        self.with_wrap(wrap, wrap, wrap)
    }

    /// World-space extent.
    pub fn domain(&self) -> &Domain3d {
        &self.domain
    }

    /// Total node count.
    pub fn count(&self) -> usize {
        self.count_x * self.count_y * self.count_z
    }

    /// Nodes along x.
    pub fn count_x(&self) -> usize {
        self.count_x
    }

    /// Nodes along y.
    pub fn count_y(&self) -> usize {
        self.count_y
    }

    /// Nodes along z.
    pub fn count_z(&self) -> usize {
        self.count_z
    }

    /// Nodes per z layer.
    pub fn count_xy(&self) -> usize {
        self.count_x * self.count_y
    }

    /// Wrap modes as `(x, y, z)`.
    pub fn wrap(&self) -> (WrapMode, WrapMode, WrapMode) {
        (self.wrap_x, self.wrap_y, self.wrap_z)
    }

    /// Cached `count / span` per axis.
    pub fn scale(&self) -> DVec3 {
        self.scale
    }

    /// World-space distance between neighbouring nodes per axis.
    pub fn cell_spacing(&self) -> DVec3 {
        DVec3::ONE / self.scale
    }

    /// Returns `true` if `other` has the same counts, domain and wrap modes.
    pub fn same_shape(&self, other: &Self) -> bool {
        self == other
    }

    /// Flat index of node `(x, y, z)`. Coordinates must be in range.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.count_x && y < self.count_y && z < self.count_z);
        x + y * self.count_x + z * self.count_xy()
    }

    /// Flat index of node `(x, y, z)` after wrapping each coordinate.
    #[inline]
    pub fn index_of_wrapped(&self, x: i64, y: i64, z: i64) -> usize {
        self.wrap_x.apply(x, self.count_x)
            + self.wrap_y.apply(y, self.count_y) * self.count_x
            + self.wrap_z.apply(z, self.count_z) * self.count_xy()
    }

    /// Node coordinates of a flat index.
    #[inline]
    pub fn indices_of(&self, index: usize) -> (usize, usize, usize) {
        let nxy = self.count_xy();
        let z = index / nxy;
        let rem = index - z * nxy;
        (rem % self.count_x, rem / self.count_x, z)
    }

    /// Map a world-space point to grid space.
    #[inline]
    pub fn to_grid_space(&self, point: DVec3) -> DVec3 {
        (point - self.domain.min()) * self.scale
    }

    /// Map a grid-space point to world space.
    #[inline]
    pub fn from_grid_space(&self, point: DVec3) -> DVec3 {
        point / self.scale + self.domain.min()
    }

    /// World-space position of the node at `index`.
    pub fn coordinate_at(&self, index: usize) -> DVec3 {
        let (x, y, z) = self.indices_of(index);
        self.from_grid_space(DVec3::new(x as f64, y as f64, z as f64))
    }

    /// Flat index of the node nearest to `point`, wrapped.
    pub fn index_nearest(&self, point: DVec3) -> usize {
        let g = self.to_grid_space(point).round();
        self.index_of_wrapped(g.x as i64, g.y as i64, g.z as i64)
    }

    /// Returns `true` if `0 <= floor(g) && floor(g) + 1 < count` on every axis.
    pub fn is_interior(&self, point: DVec3) -> bool {
        let g = self.to_grid_space(point).floor();
        axis_interior(g.x, self.count_x)
            && axis_interior(g.y, self.count_y)
            && axis_interior(g.z, self.count_z)
    }

    /// Corner indices (in witness order) and fractional offsets of `point`,
    /// with every corner resolved through its axis's wrap mode.
    pub fn locate(&self, point: DVec3) -> ([usize; 8], DVec3) {
        let (cell, frac) = split(self.to_grid_space(point));
        let nx = self.count_x;
        let nxy = self.count_xy();
        let x0 = self.wrap_x.apply(cell.0, self.count_x);
        let x1 = self.wrap_x.apply(cell.0.saturating_add(1), self.count_x);
        let y0 = self.wrap_y.apply(cell.1, self.count_y) * nx;
        let y1 = self.wrap_y.apply(cell.1.saturating_add(1), self.count_y) * nx;
        let z0 = self.wrap_z.apply(cell.2, self.count_z) * nxy;
        let z1 = self.wrap_z.apply(cell.2.saturating_add(1), self.count_z) * nxy;
        (
            [
                x0 + y0 + z0,
                x1 + y0 + z0,
                x0 + y1 + z0,
                x1 + y1 + z0,
                x0 + y0 + z1,
                x1 + y0 + z1,
                x0 + y1 + z1,
                x1 + y1 + z1,
            ],
            frac,
        )
    }

    /// [`locate`](Self::locate) without wrap calls.
    ///
    /// Only valid when [`is_interior`](Self::is_interior) holds for `point`;
    /// checked in debug builds.
    pub fn locate_interior(&self, point: DVec3) -> ([usize; 8], DVec3) {
        debug_assert!(
            self.is_interior(point),
            "interior query {point:?} touches the grid boundary"
        );
        let (cell, frac) = split(self.to_grid_space(point));
        let nx = self.count_x;
        let nxy = self.count_xy();
        let i = cell.0 as usize + cell.1 as usize * nx + cell.2 as usize * nxy;
        (
            [
                i,
                i + 1,
                i + nx,
                i + nx + 1,
                i + nxy,
                i + nxy + 1,
                i + nxy + nx,
                i + nxy + nx + 1,
            ],
            frac,
        )
    }

    /// Bounds-safe interpolation witness for `point`.
    pub fn grid_point(&self, point: DVec3) -> GridPoint3d {
        let (corners, frac) = self.locate(point);
        witness(corners, frac)
    }

    /// Interpolation witness for an interior `point`.
    pub fn grid_point_interior(&self, point: DVec3) -> GridPoint3d {
        let (corners, frac) = self.locate_interior(point);
        witness(corners, frac)
    }
}

#[inline]
fn witness(corners: [usize; 8], frac: DVec3) -> GridPoint3d {
    let mut p = GridPoint3d::new(corners, [0.0; 8]);
    p.set_weights(frac.x, frac.y, frac.z);
    p
}

#[inline]
fn split(g: DVec3) -> ((i64, i64, i64), DVec3) {
    let f = g.floor();
    ((f.x as i64, f.y as i64, f.z as i64), g - f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interval;
    use proptest::prelude::*;

    fn grid(n: usize, wrap: WrapMode) -> Grid3d {
        let i = Interval::new(0.0, n as f64);
        Grid3d::new(Domain3d::new(i, i, i), n, n, n)
            .unwrap()
            .with_wrap_all(wrap)
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(
            Grid3d::new(Domain3d::UNIT, 2, 2, 0),
            Err(FieldError::EmptyGrid)
        );
    }

    #[test]
    fn index_round_trip() {
        let i = Interval::UNIT;
        let g = Grid3d::new(Domain3d::new(i, i, i), 3, 4, 5).unwrap();
        assert_eq!(g.count(), 60);
        for idx in 0..g.count() {
            let (x, y, z) = g.indices_of(idx);
            assert_eq!(g.index_of(x, y, z), idx);
        }
    }

    #[test]
    fn repeat_corner_wraps_every_axis() {
        let g = grid(3, WrapMode::Repeat);
        let p = g.grid_point(DVec3::splat(2.5));
        assert_eq!(p.corners[0], g.index_of(2, 2, 2));
        assert_eq!(p.corners[7], g.index_of(0, 0, 0));
        assert_eq!(p.corners[4], g.index_of(2, 2, 0));
    }

    #[test]
    fn mirror_corner_reflects() {
        let g = grid(3, WrapMode::Mirror);
        let p = g.grid_point(DVec3::new(-0.5, 1.0, 1.0));
        assert_eq!(p.corners[0], g.index_of(0, 1, 1));
        assert_eq!(p.corners[1], g.index_of(0, 1, 1));
    }

    proptest! {
        #[test]
        fn interior_witness_matches_safe(
            x in 0.0f64..3.0, y in 0.0f64..3.0, z in 0.0f64..3.0
        ) {
            let g = grid(4, WrapMode::Repeat);
            let p = DVec3::new(x, y, z);
            prop_assume!(g.is_interior(p));
            prop_assert_eq!(g.grid_point(p), g.grid_point_interior(p));
        }

        #[test]
        fn witness_weights_partition_unity(
            x in -20.0f64..20.0, y in -20.0f64..20.0, z in -20.0f64..20.0
        ) {
            for wrap in [WrapMode::Clamp, WrapMode::Repeat, WrapMode::Mirror] {
                let g = grid(3, wrap);
                let p = g.grid_point(DVec3::new(x, y, z));
                prop_assert!(p.corners.iter().all(|&c| c < g.count()));
                prop_assert!((p.weight_sum() - 1.0).abs() < 1e-9);
            }
        }
    }
}
