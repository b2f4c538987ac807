//! Values stored on the nodes of a [`Grid2d`].

use glam::{DVec2, DVec3};
use tracing::debug;
use weft_core::error::check_len;
use weft_core::partition::fill_indexed;
use weft_core::{ExecConfig, FieldError, FieldSource, FieldValue, GridPoint2d};

use crate::Grid2d;

/// A value of type `T` at every node of a [`Grid2d`].
///
/// The value buffer always holds exactly `grid.count()` elements; changing
/// the lattice means building a new field.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use weft_grid::{Domain2d, Grid2d, GridField2d};
///
/// let grid = Grid2d::new(Domain2d::from_corners(DVec2::ZERO, DVec2::splat(2.0)), 2, 2).unwrap();
/// let field = GridField2d::from_values(grid, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(field.value_at(DVec2::new(0.5, 0.5)), 1.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridField2d<T> {
    grid: Grid2d,
    values: Vec<T>,
}

impl<T: FieldValue> GridField2d<T> {
    /// Create a field with every value set to `T::zero()`.
    pub fn new(grid: Grid2d) -> Self {
        debug!(
            count_x = grid.count_x(),
            count_y = grid.count_y(),
            "grid field 2d created"
        );
        Self {
            values: vec![T::zero(); grid.count()],
            grid,
        }
    }

    /// Create a field from an existing buffer.
    ///
    /// Returns `Err(FieldError::SizeMismatch)` unless `values.len() == grid.count()`.
    pub fn from_values(grid: Grid2d, values: Vec<T>) -> Result<Self, FieldError> {
        check_len(grid.count(), values.len())?;
        Ok(Self { grid, values })
    }

    /// Create a field by evaluating `f` at every node position.
    pub fn from_fn(grid: Grid2d, f: impl Fn(DVec2) -> T) -> Self {
        let values = (0..grid.count()).map(|i| f(grid.coordinate_at(i))).collect();
        Self { grid, values }
    }

    /// The lattice this field lives on.
    pub fn grid(&self) -> &Grid2d {
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

    /// Value at node `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> T {
        self.values[self.grid.index_of(x, y)]
    }

    /// Overwrite the value at node `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let i = self.grid.index_of(x, y);
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

    /// Bounds-safe multilinear sample at a world-space point.
    ///
    /// Each axis resolves its corner indices through its wrap mode, so any
    /// finite point yields a value.
    pub fn value_at(&self, point: DVec2) -> T {
        let (corners, frac) = self.grid.locate(point);
        self.interpolate(&corners, frac)
    }

    /// Multilinear sample for a point known to satisfy [`Grid2d::is_interior`].
    ///
    /// Skips the wrap calls. Agrees exactly with [`value_at`](Self::value_at)
    /// on interior queries.
    pub fn value_at_interior(&self, point: DVec2) -> T {
        let (corners, frac) = self.grid.locate_interior(point);
        self.interpolate(&corners, frac)
    }

    /// `Σ values[corner] * weight` over a precomputed witness.
    pub fn value_at_point(&self, point: &GridPoint2d) -> T {
        point
            .iter()
            .fold(T::zero(), |acc, (c, w)| acc.add(self.values[c].scale(w)))
    }

    /// Scatter `amount * weight` into each corner of `point`.
    ///
    /// The inverse of [`value_at_point`](Self::value_at_point): deposits a
    /// point source into the surrounding nodes.
    pub fn increment_at(&mut self, point: &GridPoint2d, amount: T) {
        for (c, w) in point.iter() {
            self.values[c] = self.values[c].add(amount.scale(w));
        }
    }

    /// Sample many points into `out`, partitioned over `exec`.
    pub fn sample_many(
        &self,
        points: &[DVec2],
        out: &mut [T],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_len(points.len(), out.len())?;
        fill_indexed(out, exec, |i| self.value_at(points[i]))
    }

    /// A same-shape field with its own buffer.
    ///
    /// With `copy_values == false` the new buffer is zeroed instead of copied.
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

    /// Lerp along x, then along y.
    #[inline]
    fn interpolate(&self, c: &[usize; 4], t: DVec2) -> T {
        let v = &self.values;
        let y0 = v[c[0]].lerp(v[c[1]], t.x);
        let y1 = v[c[2]].lerp(v[c[3]], t.x);
        y0.lerp(y1, t.y)
    }
}

impl<T: FieldValue> FieldSource<T> for GridField2d<T> {
    fn value_at(&self, point: DVec3) -> T {
        GridField2d::value_at(self, point.truncate())
    }
}
