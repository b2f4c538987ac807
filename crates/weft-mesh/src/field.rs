//! Per-vertex value storage with explicit resync.

use glam::DVec3;
use tracing::{debug, warn};
use weft_core::error::check_len;
use weft_core::{FieldError, FieldValue, MeshPoint};

use crate::MeshTopology;

/// A value of type `T` for every vertex of an external mesh.
///
/// The buffer length is the vertex count the field was built or last synced
/// for. See the [crate docs](crate) for the expiry rules.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use smallvec::{smallvec, SmallVec};
/// use weft_mesh::{HalfEdge, MeshField, MeshTopology};
///
/// struct Pair;
///
/// impl MeshTopology for Pair {
///     fn vertex_count(&self) -> usize { 2 }
///     fn position(&self, v: usize) -> DVec3 { DVec3::new(v as f64, 0.0, 0.0) }
///     fn outgoing(&self, v: usize) -> SmallVec<[HalfEdge; 8]> {
///         smallvec![HalfEdge::new(v, 1 - v)]
///     }
/// }
///
/// let mut field = MeshField::<f64>::new(&Pair);
/// field.set(1, 2.0);
/// assert_eq!(field.values(), &[0.0, 2.0]);
/// assert!(!field.is_expired(&Pair));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MeshField<T> {
    values: Vec<T>,
}

impl<T: FieldValue> MeshField<T> {
    /// Create a zeroed field sized to `topology`.
    pub fn new<M: MeshTopology + ?Sized>(topology: &M) -> Self {
        let n = topology.vertex_count();
        debug!(vertices = n, "mesh field created");
        Self {
            values: vec![T::zero(); n],
        }
    }

    /// Create a field from an existing buffer.
    ///
    /// Returns `Err(FieldError::SizeMismatch)` unless the buffer has one
    /// value per vertex.
    pub fn from_values<M: MeshTopology + ?Sized>(
        topology: &M,
        values: Vec<T>,
    ) -> Result<Self, FieldError> {
        check_len(topology.vertex_count(), values.len())?;
        Ok(Self { values })
    }

    /// Create a field by evaluating `f` at every vertex position.
    pub fn from_fn<M: MeshTopology + ?Sized>(topology: &M, f: impl Fn(DVec3) -> T) -> Self {
        let values = (0..topology.vertex_count())
            .map(|v| f(topology.position(v)))
            .collect();
        Self { values }
    }

    /// Cached vertex count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a field over an empty mesh.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in vertex order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable access to the value buffer.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Value at `vertex`.
    pub fn get(&self, vertex: usize) -> T {
        self.values[vertex]
    }

    /// Overwrite the value at `vertex`.
    pub fn set(&mut self, vertex: usize, value: T) {
        self.values[vertex] = value;
    }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: T) {
        self.values.fill(value);
    }

    /// Returns `true` if `topology` no longer has [`len`](Self::len) vertices.
    pub fn is_expired<M: MeshTopology + ?Sized>(&self, topology: &M) -> bool {
        topology.vertex_count() != self.values.len()
    }

    /// `Err(FieldError::Expired)` if the field is stale for `topology`.
    pub fn ensure_current<M: MeshTopology + ?Sized>(&self, topology: &M) -> Result<(), FieldError> {
        let current = topology.vertex_count();
        if current == self.values.len() {
            Ok(())
        } else {
            Err(FieldError::Expired {
                cached: self.values.len(),
                current,
            })
        }
    }

    /// Resize the buffer to the topology's current vertex count.
    ///
    /// New vertices get `T::zero()`; when the mesh shrank, trailing values
    /// are dropped. Returns `true` if the buffer changed size.
    pub fn sync<M: MeshTopology + ?Sized>(&mut self, topology: &M) -> bool {
        let cached = self.values.len();
        let current = topology.vertex_count();
        if cached == current {
            return false;
        }
        if current > cached {
            self.values.reserve_exact(current - cached);
            self.values.resize(current, T::zero());
        } else {
            warn!(cached, current, "mesh field sync dropped trailing values");
            self.values.truncate(current);
            self.values.shrink_to_fit();
        }
        debug!(cached, current, "mesh field resynced");
        true
    }

    /// `Σ values[corner] * weight` over a mesh witness.
    pub fn value_at_point(&self, point: &MeshPoint) -> T {
        point
            .iter()
            .fold(T::zero(), |acc, (c, w)| acc.add(self.values[c].scale(w)))
    }

    /// Scatter `amount * weight` into each corner of `point`.
    pub fn increment_at(&mut self, point: &MeshPoint, amount: T) {
        for (c, w) in point.iter() {
            self.values[c] = self.values[c].add(amount.scale(w));
        }
    }

    /// Sample the field at the surface point closest to `point`.
    ///
    /// `Ok(None)` when the topology reports no closest point.
    pub fn value_at<M: MeshTopology + ?Sized>(
        &self,
        topology: &M,
        point: DVec3,
    ) -> Result<Option<T>, FieldError> {
        self.ensure_current(topology)?;
        Ok(topology
            .closest_point(point)
            .map(|p| self.value_at_point(&p)))
    }

    /// A same-length field with its own buffer, zeroed unless `copy_values`.
    pub fn duplicate(&self, copy_values: bool) -> Self {
        if copy_values {
            self.clone()
        } else {
            Self {
                values: vec![T::zero(); self.values.len()],
            }
        }
    }
}
