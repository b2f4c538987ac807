//! Values stored on the nodes of a [`Grid3d`].

use glam::DVec3;
use tracing::debug;
use weft_core::error::check_len;
use weft_core::partition::fill_indexed;
use weft_core::{ExecConfig, FieldError, FieldSource, FieldValue, GridPoint3d};

use crate::Grid3d;

/// A value of type `T` at every node of a [`Grid3d`].
///
/// See [`GridField2d`](crate::GridField2d) for the shared conventions; this
/// type differs only in dimensionality.
#[derive(Clone, Debug, PartialEq)]
pub struct GridField3d<T> {
    grid: Grid3d,
    values: Vec<T>,
}

impl<T: FieldValue> GridField3d<T> {
    /// Create a field with every value set to `T::zero()`.
    pub fn new(grid: Grid3d) -> Self {
        debug!(
            count_x = grid.count_x(),
            count_y = grid.count_y(),
            count_z = grid.count_z(),
            "grid field 3d created"
        );
        Self {
            values: vec![T::zero(); grid.count()],
            grid,
        }
    }

    /// Create a field from an existing buffer.
    pub fn from_values(grid: Grid3d, values: Vec<T>) -> Result<Self, FieldError> {
        check_len(grid.count(), values.len())?;
        Ok(Self { grid, values })
    }

    /// Create a field by evaluating `f` at every node position.
    pub fn from_fn(grid: Grid3d, f: impl Fn(DVec3) -> T) -> Self {
        let values = (0..grid.count()).map(|i| f(grid.coordinate_at(i))).collect();
        Self { grid, values }
    }

    /// The lattice this field lives on.
    pub fn grid(&self) -> &Grid3d {
        &self.grid
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: grids have at least one node.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value buffer in flat index order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable access to the value buffer.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consume the field and return its buffer.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Value at node `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.values[self.grid.index_of(x, y, z)]
    }

    /// Overwrite the value at node `(x, y, z)`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        let i = self.grid.index_of(x, y, z);
        self.values[i] = value;
    }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: T) {
        self.values.fill(value);
    }

    /// Copy `values` into the buffer.
    pub fn set_values(&mut self, values: &[T]) -> Result<(), FieldError> {
        check_len(self.values.len(), values.len())?;
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Bounds-safe trilinear sample at a world-space point.
    pub fn value_at(&self, point: DVec3) -> T {
        let (corners, frac) = self.grid.locate(point);
        self.interpolate(&corners, frac)
    }

    /// Trilinear sample for a point known to satisfy [`Grid3d::is_interior`].
    pub fn value_at_interior(&self, point: DVec3) -> T {
        let (corners, frac) = self.grid.locate_interior(point);
        self.interpolate(&corners, frac)
    }

    /// `Σ values[corner] * weight` over a precomputed witness.
    pub fn value_at_point(&self, point: &GridPoint3d) -> T {
        point
            .iter()
            .fold(T::zero(), |acc, (c, w)| acc.add(self.values[c].scale(w)))
    }

    /// Scatter `amount * weight` into each corner of `point`.
    pub fn increment_at(&mut self, point: &GridPoint3d, amount: T) {
        for (c, w) in point.iter() {
            self.values[c] = self.values[c].add(amount.scale(w));
        }
    }

    /// Sample many points into `out`, partitioned over `exec`.
    pub fn sample_many(
        &self,
        points: &[DVec3],
        out: &mut [T],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_len(points.len(), out.len())?;
        fill_indexed(out, exec, |i| self.value_at(points[i]))
    }

    /// A same-shape field with its own buffer, zeroed unless `copy_values`.
    pub fn duplicate(&self, copy_values: bool) -> Self {
        if copy_values {
            self.clone()
        } else {
            Self {
                grid: self.grid,
                values: vec![T::zero(); self.values.len()],
            }
        }
    }

    #[inline]
    fn interpolate(&self, c: &[usize; 8], t: DVec3) -> T {
        let v = &self.values;
        let y0z0 = v[c[0]].lerp(v[c[1]], t.x);
        let y1z0 = v[c[2]].lerp(v[c[3]], t.x);
        let y0z1 = v[c[4]].lerp(v[c[5]], t.x);
        let y1z1 = v[c[6]].lerp(v[c[7]], t.x);
        let z0 = y0z0.lerp(y1z0, t.y);
        let z1 = y0z1.lerp(y1z1, t.y);
        z0.lerp(z1, t.z)
    }
}

impl<T: FieldValue> FieldSource<T> for GridField3d<T> {
    fn value_at(&self, point: DVec3) -> T {
        GridField3d::value_at(self, point)
    }
}
