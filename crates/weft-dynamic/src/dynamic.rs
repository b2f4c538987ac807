//! Fields that accumulate update rules and commit them in one pass.

use glam::{DVec2, DVec3};
use tracing::debug;
use weft_core::error::check_len;
use weft_core::{CornerPoint, ExecConfig, FieldError};
use weft_grid::{GridField2d, GridField3d, Stencil2d, Stencil3d};
use weft_mesh::laplacian::{umbrella_at, weighted_at};
use weft_mesh::{MeshField, MeshTopology};

use crate::delta::DeltaBuffer;

/// Scalar value storage that a [`DynamicField`] can drive.
pub trait ScalarBuffer: Send + Sync {
    /// The committed values.
    fn scalars(&self) -> &[f64];

    /// Mutable access to the committed values.
    fn scalars_mut(&mut self) -> &mut [f64];
}

impl ScalarBuffer for GridField2d<f64> {
    fn scalars(&self) -> &[f64] {
        self.values()
    }

    fn scalars_mut(&mut self) -> &mut [f64] {
        self.values_mut()
    }
}

impl ScalarBuffer for GridField3d<f64> {
    fn scalars(&self) -> &[f64] {
        self.values()
    }

    fn scalars_mut(&mut self) -> &mut [f64] {
        self.values_mut()
    }
}

impl ScalarBuffer for MeshField<f64> {
    fn scalars(&self) -> &[f64] {
        self.values()
    }

    fn scalars_mut(&mut self) -> &mut [f64] {
        self.values_mut()
    }
}

/// A dynamic scalar field on a 2D grid.
pub type DynamicGrid2d = DynamicField<GridField2d<f64>>;
/// A dynamic scalar field on a 3D grid.
pub type DynamicGrid3d = DynamicField<GridField3d<f64>>;
/// A dynamic scalar field on mesh vertices.
pub type DynamicMesh = DynamicField<MeshField<f64>>;

/// A scalar field plus a [`DeltaBuffer`] of pending updates.
///
/// Each simulation tick has two phases:
///
/// 1. **Accumulate**: any number of rules read the committed values and add
///    into the deltas. Rules never see each other's pending contributions,
///    so their order does not matter (up to floating-point rounding).
/// 2. **Commit**: [`update`](Self::update) applies `values += deltas * dt`
///    and zeroes the deltas.
///
/// Range rules take `&mut self` and run as partitioned passes. Scatter
/// deposits from many threads go through a [`DepositSink`], which borrows
/// the field shared, so the borrow checker keeps commits and range rules
/// from overlapping with it.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use weft_core::ExecConfig;
/// use weft_dynamic::DynamicGrid2d;
/// use weft_grid::{Domain2d, Grid2d, GridField2d};
///
/// let grid = Grid2d::new(Domain2d::from_corners(DVec2::ZERO, DVec2::splat(4.0)), 4, 4).unwrap();
/// let mut field = DynamicGrid2d::new(GridField2d::new(grid));
/// let exec = ExecConfig::serial();
///
/// field.deposit(2.0, exec).unwrap();
/// field.decay(0.5, exec).unwrap(); // reads the committed zeros
/// field.update(1.0, exec).unwrap();
/// assert!(field.values().iter().all(|&v| v == 2.0));
/// ```
#[derive(Debug)]
pub struct DynamicField<F> {
    field: F,
    deltas: DeltaBuffer,
}

impl<F: ScalarBuffer> DynamicField<F> {
    /// Wrap `field` with a zeroed delta buffer.
    pub fn new(field: F) -> Self {
        let len = field.scalars().len();
        debug!(len, "dynamic field created");
        Self {
            deltas: DeltaBuffer::new(len),
            field,
        }
    }

    /// The wrapped field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Unwrap, discarding pending deltas.
    pub fn into_inner(self) -> F {
        self.field
    }

    /// Committed values.
    pub fn values(&self) -> &[f64] {
        self.field.scalars()
    }

    /// Direct write access to the committed values.
    pub fn values_mut(&mut self) -> &mut [f64] {
        self.field.scalars_mut()
    }

    /// The pending deltas.
    pub fn deltas(&self) -> &DeltaBuffer {
        &self.deltas
    }

    /// Pending delta at `index`.
    pub fn pending(&self, index: usize) -> f64 {
        self.deltas.get(index)
    }

    /// `d += amount` everywhere.
    pub fn deposit(&mut self, amount: f64, exec: ExecConfig) -> Result<(), FieldError> {
        check_finite("amount", amount)?;
        self.accumulate(exec, move |_, _| amount)
    }

    /// `d += (target - v) * rate` everywhere.
    pub fn deposit_toward(
        &mut self,
        target: f64,
        rate: f64,
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_finite("target", target)?;
        check_finite("rate", rate)?;
        self.accumulate(exec, move |_, v| (target - v) * rate)
    }

    /// `d -= v * rate` everywhere.
    pub fn decay(&mut self, rate: f64, exec: ExecConfig) -> Result<(), FieldError> {
        check_finite("rate", rate)?;
        self.accumulate(exec, move |_, v| -v * rate)
    }

    /// Push values away from `threshold`: `d += rate` above it, `d -= rate`
    /// below it, unchanged at exactly `threshold`.
    pub fn bifurcate(
        &mut self,
        threshold: f64,
        rate: f64,
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_finite("threshold", threshold)?;
        check_finite("rate", rate)?;
        self.accumulate(exec, move |_, v| {
            if v > threshold {
                rate
            } else if v < threshold {
                -rate
            } else {
                0.0
            }
        })
    }

    /// `d[index] += amount`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn deposit_at(&mut self, index: usize, amount: f64) {
        self.deltas.add_mut(index, amount);
    }

    /// `d[index] -= v[index] * rate`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn decay_at(&mut self, index: usize, rate: f64) {
        let len = self.field.scalars().len();
        assert!(index < len, "index {index} out of range for length {len}");
        let v = self.field.scalars()[index];
        self.deltas.add_mut(index, -v * rate);
    }

    /// Scatter `amount * weight` into the corners of `point`.
    pub fn deposit_at_point<const N: usize>(&mut self, point: &CornerPoint<N>, amount: f64) {
        for (c, w) in point.iter() {
            self.deltas.add_mut(c, amount * w);
        }
    }

    /// `d[c] -= v[c] * rate * weight` at every corner of `point`.
    pub fn decay_at_point<const N: usize>(&mut self, point: &CornerPoint<N>, rate: f64) {
        for (c, w) in point.iter() {
            self.decay_at(c, rate * w);
        }
    }

    /// Deposit `amounts[k]` through `points[k]` for every `k`, in parallel.
    pub fn deposit_points<const N: usize>(
        &mut self,
        points: &[CornerPoint<N>],
        amounts: &[f64],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        self.deltas.scatter_many(points, amounts, exec)
    }

    /// A shared handle for concurrent scatter deposits.
    pub fn sink(&self) -> DepositSink<'_> {
        DepositSink {
            deltas: &self.deltas,
        }
    }

    /// Commit: `values += deltas * dt`, then zero the deltas.
    ///
    /// `dt` must be finite and non-negative.
    pub fn update(&mut self, dt: f64, exec: ExecConfig) -> Result<(), FieldError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(FieldError::InvalidParameter {
                name: "dt",
                value: dt,
                reason: "must be finite and non-negative",
            });
        }
        self.deltas
            .commit_into(self.field.scalars_mut(), dt, exec)
    }

    /// Drop pending deltas without committing.
    pub fn discard(&mut self) {
        self.deltas.clear();
    }

    fn accumulate<R>(&mut self, exec: ExecConfig, rule: R) -> Result<(), FieldError>
    where
        R: Fn(usize, f64) -> f64 + Send + Sync,
    {
        self.deltas.accumulate(self.field.scalars(), exec, rule)
    }
}

impl DynamicField<GridField2d<f64>> {
    /// `d += rate * laplacian(v)` with the grid stencil.
    pub fn diffuse(&mut self, rate: f64, exec: ExecConfig) -> Result<(), FieldError> {
        check_finite("rate", rate)?;
        let stencil = Stencil2d::new(self.field.grid());
        let values = self.field.values();
        self.deltas
            .accumulate(values, exec, |i, _| rate * stencil.laplacian_at(values, i))
    }

    /// Bilinear scatter of `amount` at a world-space position.
    pub fn deposit_at_position(&mut self, position: DVec2, amount: f64) {
        let point = self.field.grid().grid_point(position);
        self.deposit_at_point(&point, amount);
    }
}

impl DynamicField<GridField3d<f64>> {
    /// `d += rate * laplacian(v)` with the grid stencil.
    pub fn diffuse(&mut self, rate: f64, exec: ExecConfig) -> Result<(), FieldError> {
        check_finite("rate", rate)?;
        let stencil = Stencil3d::new(self.field.grid());
        let values = self.field.values();
        self.deltas
            .accumulate(values, exec, |i, _| rate * stencil.laplacian_at(values, i))
    }

    /// Trilinear scatter of `amount` at a world-space position.
    pub fn deposit_at_position(&mut self, position: DVec3, amount: f64) {
        let point = self.field.grid().grid_point(position);
        self.deposit_at_point(&point, amount);
    }
}

impl DynamicField<MeshField<f64>> {
    /// `d += rate * umbrella(v)`.
    pub fn diffuse<M: MeshTopology + ?Sized>(
        &mut self,
        topology: &M,
        rate: f64,
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_finite("rate", rate)?;
        self.field.ensure_current(topology)?;
        let values = self.field.values();
        self.deltas
            .accumulate(values, exec, |i, _| rate * umbrella_at(topology, values, i))
    }

    /// `d += rate * weighted_laplacian(v)` with per-half-edge `weights`.
    pub fn diffuse_weighted<M: MeshTopology + ?Sized>(
        &mut self,
        topology: &M,
        weights: &[f64],
        rate: f64,
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        check_finite("rate", rate)?;
        self.field.ensure_current(topology)?;
        check_len(topology.halfedge_count(), weights.len())?;
        let values = self.field.values();
        self.deltas.accumulate(values, exec, |i, _| {
            rate * weighted_at(topology, values, weights, i)
        })
    }

    /// Deposit `amount` at the surface point closest to `position`.
    ///
    /// Returns `Ok(false)` when the topology has no closest point.
    pub fn deposit_at_position<M: MeshTopology + ?Sized>(
        &mut self,
        topology: &M,
        position: DVec3,
        amount: f64,
    ) -> Result<bool, FieldError> {
        self.field.ensure_current(topology)?;
        match topology.closest_point(position) {
            Some(point) => {
                self.deposit_at_point(&point, amount);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns `true` if the topology's vertex count has changed.
    pub fn is_expired<M: MeshTopology + ?Sized>(&self, topology: &M) -> bool {
        self.field.is_expired(topology)
    }

    /// Resize values and deltas to the topology's vertex count.
    ///
    /// Pending deltas of surviving vertices are kept.
    pub fn sync<M: MeshTopology + ?Sized>(&mut self, topology: &M) -> bool {
        let changed = self.field.sync(topology);
        if changed {
            self.deltas.resize(self.field.len());
        }
        changed
    }
}

/// A `Sync` handle for depositing into a [`DynamicField`] from many
/// threads at once.
///
/// Every write is an atomic add, so overlapping corners from different
/// threads are summed rather than lost.
#[derive(Clone, Copy, Debug)]
pub struct DepositSink<'a> {
    deltas: &'a DeltaBuffer,
}

// Compile-time assertion: sinks are shared across worker threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<DepositSink<'static>>();
};

impl DepositSink<'_> {
    /// Atomically add `amount` at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn deposit_at(&self, index: usize, amount: f64) {
        self.deltas.add(index, amount);
    }

    /// Atomically scatter `amount * weight` into the corners of `point`.
    pub fn deposit_at_point<const N: usize>(&self, point: &CornerPoint<N>, amount: f64) {
        self.deltas.scatter(point, amount);
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}
