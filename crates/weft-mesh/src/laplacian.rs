//! Graph Laplacians over the mesh's 1-ring neighbourhoods.
//!
//! Two schemes are provided:
//!
//! - **Umbrella**: the unweighted mean of the neighbours' values minus the
//!   vertex's own value. Isolated vertices yield zero.
//! - **Weighted**: `Σ_e weight[e.index] * (value(e.end) - value(self))`
//!   over outgoing half-edges, with caller-supplied per-half-edge weights
//!   (cotangent weights, conductances, ...).
//!
//! Each output element depends only on the value buffer, so both run as
//! partitioned passes.

use weft_core::error::check_len;
use weft_core::partition::fill_indexed;
use weft_core::{ExecConfig, FieldError, FieldValue};

use crate::{MeshField, MeshTopology};

/// Umbrella Laplacian of `values` at `vertex`.
pub fn umbrella_at<T, M>(topology: &M, values: &[T], vertex: usize) -> T
where
    T: FieldValue,
    M: MeshTopology + ?Sized,
{
    let ring = topology.outgoing(vertex);
    if ring.is_empty() {
        return T::zero();
    }
    let sum = ring
        .iter()
        .fold(T::zero(), |acc, e| acc.add(values[e.end]));
    sum.scale(1.0 / ring.len() as f64).sub(values[vertex])
}

/// Weighted Laplacian of `values` at `vertex`.
pub fn weighted_at<T, M>(topology: &M, values: &[T], weights: &[f64], vertex: usize) -> T
where
    T: FieldValue,
    M: MeshTopology + ?Sized,
{
    let own = values[vertex];
    topology
        .outgoing(vertex)
        .iter()
        .fold(T::zero(), |acc, e| {
            acc.add(values[e.end].sub(own).scale(weights[e.index]))
        })
}

impl<T: FieldValue> MeshField<T> {
    /// Write the umbrella Laplacian of every vertex into `out`.
    ///
    /// Fails with `Expired` if the field is stale and `SizeMismatch` if
    /// `out` does not hold one element per vertex.
    pub fn laplacian_umbrella<M: MeshTopology + ?Sized>(
        &self,
        topology: &M,
        out: &mut [T],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        self.ensure_current(topology)?;
        check_len(self.len(), out.len())?;
        let values = self.values();
        fill_indexed(out, exec, |v| umbrella_at(topology, values, v))
    }

    /// Write the weighted Laplacian of every vertex into `out`.
    ///
    /// `weights` holds one entry per half-edge, indexed by
    /// [`HalfEdge::index`](crate::HalfEdge::index).
    pub fn laplacian_weighted<M: MeshTopology + ?Sized>(
        &self,
        topology: &M,
        weights: &[f64],
        out: &mut [T],
        exec: ExecConfig,
    ) -> Result<(), FieldError> {
        self.ensure_current(topology)?;
        check_len(topology.halfedge_count(), weights.len())?;
        check_len(self.len(), out.len())?;
        let values = self.values();
        fill_indexed(out, exec, |v| weighted_at(topology, values, weights, v))
    }

    /// [`laplacian_umbrella`](Self::laplacian_umbrella) into a new field.
    pub fn umbrella_field<M: MeshTopology + ?Sized>(
        &self,
        topology: &M,
        exec: ExecConfig,
    ) -> Result<Self, FieldError> {
        let mut out = self.duplicate(false);
        self.laplacian_umbrella(topology, out.values_mut(), exec)?;
        Ok(out)
    }

    /// [`laplacian_weighted`](Self::laplacian_weighted) into a new field.
    pub fn weighted_field<M: MeshTopology + ?Sized>(
        &self,
        topology: &M,
        weights: &[f64],
        exec: ExecConfig,
    ) -> Result<Self, FieldError> {
        let mut out = self.duplicate(false);
        self.laplacian_weighted(topology, weights, out.values_mut(), exec)?;
        Ok(out)
    }
}
