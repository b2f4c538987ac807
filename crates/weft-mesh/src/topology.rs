//! The mesh collaborator interface.

use glam::DVec3;
use smallvec::SmallVec;
use weft_core::MeshPoint;

/// A directed edge leaving a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdge {
    /// Dense half-edge id in `0..halfedge_count()`. Indexes per-edge
    /// weight buffers.
    pub index: usize,
    /// The vertex this edge points to.
    pub end: usize,
}

impl HalfEdge {
    /// Create a half-edge.
    pub const fn new(index: usize, end: usize) -> Self {
        Self { index, end }
    }
}

/// Connectivity and geometry queries supplied by the host mesh.
///
/// Weft never edits the mesh. Implementations must be deterministic: two
/// calls with the same arguments return the same result in the same order.
///
/// `Sync` is required because Laplacian passes query the topology from
/// every worker of a partitioned pass.
pub trait MeshTopology: Send + Sync {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// World-space position of `vertex`.
    fn position(&self, vertex: usize) -> DVec3;

    /// Half-edges leaving `vertex`.
    ///
    /// The inline capacity of 8 covers typical triangle-mesh valences
    /// without heap allocation.
    fn outgoing(&self, vertex: usize) -> SmallVec<[HalfEdge; 8]>;

    /// Vertices adjacent to `vertex` (the ends of its outgoing edges).
    fn neighbours(&self, vertex: usize) -> SmallVec<[usize; 8]> {
        self.outgoing(vertex).iter().map(|e| e.end).collect()
    }

    /// Total number of half-edges.
    ///
    /// The default counts outgoing edges of every vertex, which is only
    /// correct when half-edge ids are dense.
    fn halfedge_count(&self) -> usize {
        (0..self.vertex_count()).map(|v| self.outgoing(v).len()).sum()
    }

    /// Interpolation witness for the surface point closest to `point`.
    ///
    /// Returns `None` for topologies without a surface (pure graphs) or
    /// when no point can be found.
    fn closest_point(&self, point: DVec3) -> Option<MeshPoint> {
        let _ = point;
        None
    }
}
