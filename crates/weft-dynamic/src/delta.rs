//! The pending-update buffer of a dynamic field.

use rayon::prelude::*;
use tracing::trace;
use weft_core::error::check_len;
use weft_core::partition::{for_each_chunk, for_each_chunk_zip};
use weft_core::{CornerPoint, ExecConfig, FieldError};

use crate::atomic::AtomicF64;

/// One pending delta per value, summed across update rules until the next
/// commit.
///
/// Two write paths exist:
///
/// - **Exclusive** (`&mut self`): range rules such as decay or diffusion
///   walk disjoint chunks through [`accumulate`](Self::accumulate) with
///   plain arithmetic.
/// - **Shared** (`&self`): scatter writes from interpolation witnesses may
///   hit the same index from many threads, so [`add`](Self::add) and
///   [`scatter`](Self::scatter) use atomic adds.
///
/// [`commit_into`](Self::commit_into) consumes every delta exactly once.
#[derive(Debug, Default)]
pub struct DeltaBuffer {
    cells: Vec<AtomicF64>,
}

impl DeltaBuffer {
    /// A zeroed buffer of `len` deltas.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| AtomicF64::default()).collect(),
        }
    }

    /// Number of deltas.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the buffer holds no deltas.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pending delta at `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.cell(index).load()
    }

    /// Snapshot of every pending delta.
    pub fn to_vec(&self) -> Vec<f64> {
        self.cells.iter().map(AtomicF64::load).collect()
    }

    /// Atomically add `amount` at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn add(&self, index: usize, amount: f64) {
        self.cell(index).fetch_add(amount);
    }

    /// Atomically add `amount * weight` at every corner of `point`.
    ///
    /// # Panics
    ///
    /// If any corner is out of range.
    pub fn scatter<const N: usize>(&self, point: &CornerPoint<N>, amount: f64) {
        for (c, w) in point.iter() {
            self.cell(c).fetch_add(amount * w);
        }
    }

    /// Add `amount` at `index` through an exclusive borrow.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn add_mut(&mut self, index: usize, amount: f64) {
        let len = self.cells.len();
        match self.cells.get_mut(index) {
            Some(cell) => cell.add_mut(amount),
            None => out_of_range(index, len),
        }
    }

    /// Add `f(i, values[i])` at every index, partitioned over `exec`.
    ///
    /// `values` must have one element per delta.
    pub fn accumulate<F>(&mut self, values: &[f64], exec: ExecConfig, f: F) -> Result<(), FieldError>
    where
        F: Fn(usize, f64) -> f64 + Send + Sync,
    {
        check_len(self.cells.len(), values.len())?;
        for_each_chunk(&mut self.cells, exec, |start, chunk| {
            for (k, cell) in chunk.iter_mut().enumerate() {
                let i = start + k;
                cell.add_mut(f(i, values[i]));
            }
        })
    }

    /// Scatter many weighted points in parallel.
    ///
    /// `amounts[k]` is deposited through `points[k]`. Runs on the rayon
    /// pool when `exec` fans out for `points.len()`.
    pub fn scatter_many<const N: usize>(
        &self,
        points: &[CornerPoint<N>],
        amounts: &[f64],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        exec.validate()?;
        check_len(points.len(), amounts.len())?;
        if exec.fans_out(points.len()) {
            trace!(points = points.len(), "parallel scatter");
            points
                .par_iter()
                .zip(amounts.par_iter())
                .with_min_len(exec.chunk_len)
                .for_each(|(p, &a)| self.scatter(p, a));
        } else {
            for (p, &a) in points.iter().zip(amounts) {
                self.scatter(p, a);
            }
        }
        Ok(())
    }

    /// Explicit-Euler commit: `values[i] += deltas[i] * dt`, then
    /// `deltas[i] = 0`.
    pub fn commit_into(
        &mut self,
        values: &mut [f64],
        dt: f64,
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        trace!(len = values.len(), dt, "commit pass");
        for_each_chunk_zip(values, &mut self.cells, exec, |_, vs, ds| {
            for (v, d) in vs.iter_mut().zip(ds.iter_mut()) {
                *v += d.take() * dt;
            }
        })
    }

    /// Reset every delta to zero.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.take();
        }
    }

    /// Grow with zeros or drop trailing deltas.
    pub fn resize(&mut self, len: usize) {
        self.cells.resize_with(len, AtomicF64::default);
    }

    fn cell(&self, index: usize) -> &AtomicF64 {
        match self.cells.get(index) {
            Some(cell) => cell,
            None => out_of_range(index, self.cells.len()),
        }
    }
}

#[cold]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("delta index {index} out of range for length {len}")
}
