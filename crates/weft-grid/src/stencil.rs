//! Finite-difference operators on the flat value array.
//!
//! Every operator walks node indices directly. For each axis a node has a
//! previous and a next neighbour at `index ∓ stride`; on the first and last
//! node of an axis the neighbour is instead `index + offset`, where the
//! offset comes from [`WrapMode::boundary_offsets`] and is computed once per
//! call. Clamp and Mirror reuse the boundary node (zero gradient); Repeat
//! jumps to the opposite edge.
//!
//! Second derivatives divide by `h²` and first derivatives by `2h`, where
//! `h` is the node spacing of the axis.

use glam::{DVec2, DVec3};
use weft_core::error::check_len;
use weft_core::partition::fill_indexed;
use weft_core::{ExecConfig, FieldError, FieldValue, WrapMode};

use crate::{Grid2d, Grid3d, GridField2d, GridField3d};

/// One axis of a stencil: stride in the flat array plus boundary offsets.
#[derive(Clone, Copy, Debug)]
struct Axis {
    stride: usize,
    count: usize,
    lo: isize,
    hi: isize,
}

impl Axis {
    fn new(stride: usize, count: usize, wrap: WrapMode) -> Self {
        let (lo, hi) = wrap.boundary_offsets(count);
        Self {
            stride,
            count,
            lo: lo * stride as isize,
            hi: hi * stride as isize,
        }
    }

    /// `(prev, next)` of the node at flat `index` whose coordinate on this
    /// axis is `coord`.
    #[inline]
    fn pair(&self, index: usize, coord: usize) -> (usize, usize) {
        let prev = if coord == 0 {
            offset(index, self.lo)
        } else {
            index - self.stride
        };
        let next = if coord + 1 == self.count {
            offset(index, self.hi)
        } else {
            index + self.stride
        };
        (prev, next)
    }
}

#[inline]
fn offset(index: usize, by: isize) -> usize {
    (index as isize + by) as usize
}

#[inline]
fn second<T: FieldValue>(values: &[T], (prev, next): (usize, usize), v: T, inv_h2: f64) -> T {
    values[prev].add(values[next]).sub(v.scale(2.0)).scale(inv_h2)
}

#[inline]
fn first<T: FieldValue>(values: &[T], (prev, next): (usize, usize), inv_h: f64) -> T {
    values[next].sub(values[prev]).scale(0.5 * inv_h)
}

/// Neighbour lookup for a [`Grid2d`].
///
/// ```
/// use glam::DVec2;
/// use weft_core::WrapMode;
/// use weft_grid::stencil::Stencil2d;
/// use weft_grid::{Domain2d, Grid2d};
///
/// let grid = Grid2d::new(Domain2d::from_corners(DVec2::ZERO, DVec2::splat(4.0)), 4, 4)
///     .unwrap()
///     .with_wrap_all(WrapMode::Repeat);
/// let [(west, east), (south, north)] = Stencil2d::new(&grid).neighbours(0);
/// assert_eq!((west, east, south, north), (3, 1, 12, 4));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Stencil2d {
    x: Axis,
    y: Axis,
    scale: DVec2,
}

impl Stencil2d {
    /// Resolve strides and boundary offsets for `grid`.
    pub fn new(grid: &Grid2d) -> Self {
        let nx = grid.count_x();
        Self {
            x: Axis::new(1, nx, grid.wrap_x()),
            y: Axis::new(nx, grid.count_y(), grid.wrap_y()),
            scale: grid.scale(),
        }
    }

    /// `(prev, next)` flat indices along x and y for node `index`.
    #[inline]
    pub fn neighbours(&self, index: usize) -> [(usize, usize); 2] {
        let nx = self.x.count;
        [
            self.x.pair(index, index % nx),
            self.y.pair(index, index / nx),
        ]
    }

    /// Discrete Laplacian of `values` at node `index`.
    #[inline]
    pub fn laplacian_at<T: FieldValue>(&self, values: &[T], index: usize) -> T {
        let v = values[index];
        let s = self.scale;
        let [ax, ay] = self.neighbours(index);
        second(values, ax, v, s.x * s.x).add(second(values, ay, v, s.y * s.y))
    }

    /// Central-difference partial derivatives `(∂/∂x, ∂/∂y)` at `index`.
    #[inline]
    pub fn derivatives_at<T: FieldValue>(&self, values: &[T], index: usize) -> (T, T) {
        let [ax, ay] = self.neighbours(index);
        (
            first(values, ax, self.scale.x),
            first(values, ay, self.scale.y),
        )
    }
}

/// Neighbour lookup for a [`Grid3d`].
#[derive(Clone, Copy, Debug)]
pub struct Stencil3d {
    x: Axis,
    y: Axis,
    z: Axis,
    scale: DVec3,
}

impl Stencil3d {
    /// Resolve strides and boundary offsets for `grid`.
    pub fn new(grid: &Grid3d) -> Self {
        let (wx, wy, wz) = grid.wrap();
        let nx = grid.count_x();
        Self {
            x: Axis::new(1, nx, wx),
            y: Axis::new(nx, grid.count_y(), wy),
            z: Axis::new(grid.count_xy(), grid.count_z(), wz),
            scale: grid.scale(),
        }
    }

    /// `(prev, next)` flat indices along x, y and z for node `index`.
    #[inline]
    pub fn neighbours(&self, index: usize) -> [(usize, usize); 3] {
        let nx = self.x.count;
        let nxy = self.z.stride;
        let layer = index % nxy;
        [
            self.x.pair(index, layer % nx),
            self.y.pair(index, layer / nx),
            self.z.pair(index, index / nxy),
        ]
    }

    /// Discrete Laplacian of `values` at node `index`.
    #[inline]
    pub fn laplacian_at<T: FieldValue>(&self, values: &[T], index: usize) -> T {
        let v = values[index];
        let s = self.scale;
        let [ax, ay, az] = self.neighbours(index);
        second(values, ax, v, s.x * s.x)
            .add(second(values, ay, v, s.y * s.y))
            .add(second(values, az, v, s.z * s.z))
    }

    /// Central-difference partial derivatives `(∂/∂x, ∂/∂y, ∂/∂z)` at `index`.
    #[inline]
    pub fn derivatives_at<T: FieldValue>(&self, values: &[T], index: usize) -> (T, T, T) {
        let [ax, ay, az] = self.neighbours(index);
        (
            first(values, ax, self.scale.x),
            first(values, ay, self.scale.y),
            first(values, az, self.scale.z),
        )
    }
}

impl<T: FieldValue> GridField2d<T> {
    /// Write the discrete Laplacian of every node into `out`.
    ///
    /// `out` must hold one element per node.
    pub fn laplacian(&self, out: &mut [T], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil2d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| stencil.laplacian_at(values, i))
    }

    /// [`laplacian`](Self::laplacian) into a new field on the same grid.
    pub fn laplacian_field(&self, exec: ExecConfig) -> Result<Self, FieldError> {
        let mut out = self.duplicate(false);
        self.laplacian(out.values_mut(), exec)?;
        Ok(out)
    }
}

impl GridField2d<f64> {
    /// Write the central-difference gradient of every node into `out`.
    pub fn gradient(&self, out: &mut [DVec2], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil2d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy) = stencil.derivatives_at(values, i);
            DVec2::new(dx, dy)
        })
    }

    /// [`gradient`](Self::gradient) into a new vector field.
    pub fn gradient_field(&self, exec: ExecConfig) -> Result<GridField2d<DVec2>, FieldError> {
        let mut out = GridField2d::new(*self.grid());
        self.gradient(out.values_mut(), exec)?;
        Ok(out)
    }
}

impl GridField2d<DVec2> {
    /// Write `∂vx/∂x + ∂vy/∂y` of every node into `out`.
    pub fn divergence(&self, out: &mut [f64], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil2d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy) = stencil.derivatives_at(values, i);
            dx.x + dy.y
        })
    }

    /// Write the scalar curl `∂vy/∂x − ∂vx/∂y` of every node into `out`.
    pub fn curl(&self, out: &mut [f64], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil2d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy) = stencil.derivatives_at(values, i);
            dx.y - dy.x
        })
    }

    /// [`divergence`](Self::divergence) into a new scalar field.
    pub fn divergence_field(&self, exec: ExecConfig) -> Result<GridField2d<f64>, FieldError> {
        let mut out = GridField2d::new(*self.grid());
        self.divergence(out.values_mut(), exec)?;
        Ok(out)
    }

    /// [`curl`](Self::curl) into a new scalar field.
    pub fn curl_field(&self, exec: ExecConfig) -> Result<GridField2d<f64>, FieldError> {
        let mut out = GridField2d::new(*self.grid());
        self.curl(out.values_mut(), exec)?;
        Ok(out)
    }
}

impl<T: FieldValue> GridField3d<T> {
    /// Write the discrete Laplacian of every node into `out`.
    pub fn laplacian(&self, out: &mut [T], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil3d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| stencil.laplacian_at(values, i))
    }

    /// [`laplacian`](Self::laplacian) into a new field on the same grid.
    pub fn laplacian_field(&self, exec: ExecConfig) -> Result<Self, FieldError> {
        let mut out = self.duplicate(false);
        self.laplacian(out.values_mut(), exec)?;
        Ok(out)
    }
}

impl GridField3d<f64> {
    /// Write the central-difference gradient of every node into `out`.
    pub fn gradient(&self, out: &mut [DVec3], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil3d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy, dz) = stencil.derivatives_at(values, i);
            DVec3::new(dx, dy, dz)
        })
    }

    /// [`gradient`](Self::gradient) into a new vector field.
    pub fn gradient_field(&self, exec: ExecConfig) -> Result<GridField3d<DVec3>, FieldError> {
        let mut out = GridField3d::new(*self.grid());
        self.gradient(out.values_mut(), exec)?;
        Ok(out)
    }
}

impl GridField3d<DVec3> {
    /// Write the divergence of every node into `out`.
    pub fn divergence(&self, out: &mut [f64], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil3d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy, dz) = stencil.derivatives_at(values, i);
            dx.x + dy.y + dz.z
        })
    }

    /// Write the curl of every node into `out`.
    pub fn curl(&self, out: &mut [DVec3], exec: ExecConfig) -> Result<(), FieldError> {
        check_len(self.len(), out.len())?;
        let stencil = Stencil3d::new(self.grid());
        let values = self.values();
        fill_indexed(out, exec, |i| {
            let (dx, dy, dz) = stencil.derivatives_at(values, i);
            DVec3::new(dy.z - dz.y, dz.x - dx.z, dx.y - dy.x)
        })
    }

    /// [`divergence`](Self::divergence) into a new scalar field.
    pub fn divergence_field(&self, exec: ExecConfig) -> Result<GridField3d<f64>, FieldError> {
        let mut out = GridField3d::new(*self.grid());
        self.divergence(out.values_mut(), exec)?;
        Ok(out)
    }

    /// [`curl`](Self::curl) into a new vector field.
    pub fn curl_field(&self, exec: ExecConfig) -> Result<Self, FieldError> {
        let mut out = self.duplicate(false);
        self.curl(out.values_mut(), exec)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain2d, Domain3d, Interval};

    const WRAPS: [WrapMode; 3] = [WrapMode::Clamp, WrapMode::Repeat, WrapMode::Mirror];

    fn grid2(nx: usize, ny: usize, size: f64, wrap: WrapMode) -> Grid2d {
        Grid2d::new(
            Domain2d::new(Interval::new(0.0, size), Interval::new(0.0, size)),
            nx,
            ny,
        )
        .unwrap()
        .with_wrap_all(wrap)
    }

    fn grid3(n: usize, wrap: WrapMode) -> Grid3d {
        let i = Interval::new(0.0, n as f64);
        Grid3d::new(Domain3d::new(i, i, i), n, n, n)
            .unwrap()
            .with_wrap_all(wrap)
    }

    fn interior2(g: &Grid2d) -> impl Iterator<Item = usize> + '_ {
        (0..g.count()).filter(|&i| {
            let (x, y) = g.indices_of(i);
            x > 0 && y > 0 && x + 1 < g.count_x() && y + 1 < g.count_y()
        })
    }

    #[test]
    fn neighbours_agree_with_wrap_2d() {
        for wrap in WRAPS {
            let g = grid2(5, 3, 5.0, wrap);
            let s = Stencil2d::new(&g);
            for i in 0..g.count() {
                let (x, y) = g.indices_of(i);
                let (x, y) = (x as i64, y as i64);
                let [(w, e), (so, n)] = s.neighbours(i);
                assert_eq!(w, g.index_of_wrapped(x - 1, y), "{wrap:?} {i}");
                assert_eq!(e, g.index_of_wrapped(x + 1, y), "{wrap:?} {i}");
                assert_eq!(so, g.index_of_wrapped(x, y - 1), "{wrap:?} {i}");
                assert_eq!(n, g.index_of_wrapped(x, y + 1), "{wrap:?} {i}");
            }
        }
    }

    #[test]
    fn neighbours_agree_with_wrap_3d() {
        for wrap in WRAPS {
            let g = grid3(3, wrap);
            let s = Stencil3d::new(&g);
            for i in 0..g.count() {
                let (x, y, z) = g.indices_of(i);
                let (x, y, z) = (x as i64, y as i64, z as i64);
                let [ax, ay, az] = s.neighbours(i);
                assert_eq!(ax.0, g.index_of_wrapped(x - 1, y, z));
                assert_eq!(ax.1, g.index_of_wrapped(x + 1, y, z));
                assert_eq!(ay.0, g.index_of_wrapped(x, y - 1, z));
                assert_eq!(ay.1, g.index_of_wrapped(x, y + 1, z));
                assert_eq!(az.0, g.index_of_wrapped(x, y, z - 1));
                assert_eq!(az.1, g.index_of_wrapped(x, y, z + 1));
            }
        }
    }

    #[test]
    fn laplacian_of_constant_is_zero() {
        for wrap in WRAPS {
            let mut f2 = GridField2d::<f64>::new(grid2(6, 4, 1.5, wrap));
            f2.fill(3.7);
            let l2 = f2.laplacian_field(ExecConfig::serial()).unwrap();
            assert!(l2.values().iter().all(|&v| v == 0.0), "{wrap:?}");

            let mut f3 = GridField3d::<DVec3>::new(grid3(3, wrap));
            f3.fill(DVec3::new(1.1, -2.0, 0.3));
            let l3 = f3.laplacian_field(ExecConfig::serial()).unwrap();
            assert!(l3.values().iter().all(|&v| v == DVec3::ZERO), "{wrap:?}");
        }
    }

    #[test]
    fn point_source_on_torus() {
        let mut f = GridField2d::<f64>::new(grid2(4, 4, 4.0, WrapMode::Repeat));
        f.values_mut()[0] = 4.0;
        let l = f.laplacian_field(ExecConfig::serial()).unwrap();
        assert_eq!(l.values()[0], -16.0);
        for n in [1, 3, 4, 12] {
            assert_eq!(l.values()[n], 4.0);
        }
        assert_eq!(l.values().iter().filter(|&&v| v != 0.0).count(), 5);
        assert_eq!(l.values().iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn laplacian_of_quadratic() {
        // Node spacing 0.5: scale 2, so 1/h² = 4.
        let f = GridField2d::from_fn(grid2(8, 8, 4.0, WrapMode::Clamp), |p| p.x * p.x + p.y * p.y);
        let l = f.laplacian_field(ExecConfig::serial()).unwrap();
        for i in interior2(f.grid()) {
            assert!((l.values()[i] - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn gradient_of_plane() {
        let f = GridField2d::from_fn(grid2(8, 8, 2.0, WrapMode::Clamp), |p| 2.0 * p.x - 3.0 * p.y);
        let g = f.gradient_field(ExecConfig::serial()).unwrap();
        for i in interior2(f.grid()) {
            assert!((g.values()[i] - DVec2::new(2.0, -3.0)).length() < 1e-9);
        }
        // Clamp halves the one-sided difference at the edge.
        assert!((g.values()[0] - DVec2::new(1.0, -1.5)).length() < 1e-9);
    }

    #[test]
    fn divergence_and_curl_2d() {
        let g = grid2(7, 7, 7.0, WrapMode::Clamp);
        let expand = GridField2d::from_fn(g, |p| DVec2::new(2.0 * p.x, 3.0 * p.y));
        let rotate = GridField2d::from_fn(g, |p| DVec2::new(-p.y, p.x));
        let div = expand.divergence_field(ExecConfig::serial()).unwrap();
        let curl = rotate.curl_field(ExecConfig::serial()).unwrap();
        let curl_free = expand.curl_field(ExecConfig::serial()).unwrap();
        for i in interior2(&g) {
            assert!((div.values()[i] - 5.0).abs() < 1e-9);
            assert!((curl.values()[i] - 2.0).abs() < 1e-9);
            assert!(curl_free.values()[i].abs() < 1e-9);
        }
    }

    #[test]
    fn divergence_and_curl_3d() {
        let g = grid3(5, WrapMode::Clamp);
        let rotate = GridField3d::from_fn(g, |p| DVec3::new(-p.y, p.x, 0.0));
        let curl = rotate.curl_field(ExecConfig::serial()).unwrap();
        let div = rotate.divergence_field(ExecConfig::serial()).unwrap();
        let centre = g.index_of(2, 2, 2);
        assert!((curl.values()[centre] - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-9);
        assert!(div.values()[centre].abs() < 1e-9);

        let ramp = GridField3d::from_fn(g, |p| p.x + 2.0 * p.y - p.z);
        let grad = ramp.gradient_field(ExecConfig::serial()).unwrap();
        assert!((grad.values()[centre] - DVec3::new(1.0, 2.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn serial_and_parallel_agree() {
        let f = GridField2d::from_fn(grid2(40, 30, 1.0, WrapMode::Mirror), |p| {
            (p.x * 7.0).sin() * (p.y * 3.0).cos()
        });
        let serial = f.laplacian_field(ExecConfig::serial()).unwrap();
        let parallel = f
            .laplacian_field(ExecConfig::parallel().with_chunk_len(64))
            .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn output_length_checked() {
        let f = GridField2d::<DVec2>::new(grid2(3, 3, 1.0, WrapMode::Clamp));
        let mut out = vec![0.0; 8];
        assert_eq!(
            f.divergence(&mut out, ExecConfig::serial()),
            Err(FieldError::SizeMismatch {
                expected: 9,
                actual: 8
            })
        );
    }
}
