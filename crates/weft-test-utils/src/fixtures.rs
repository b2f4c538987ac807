//! Mesh topology fixtures.
//!
//! - [`TorusMesh`]: a periodic `nx × ny` lattice with 4 neighbours per
//!   vertex and a triangulated surface, the mesh counterpart of a
//!   Repeat-wrapped grid.
//! - [`AdjacencyMesh`]: an arbitrary graph built from an edge list, with
//!   nearest-vertex closest-point queries.

use glam::DVec3;
use indexmap::IndexSet;
use smallvec::SmallVec;
use weft_core::MeshPoint;
use weft_mesh::{HalfEdge, MeshTopology};

/// A flat torus: vertex `x + y * nx` sits at `(x, y, 0) * spacing` and links
/// to its four lattice neighbours with periodic wrap.
///
/// Half-edges of vertex `v` have ids `4v..4v + 4` in the order
/// `+x, -x, +y, -y`.
#[derive(Clone, Debug)]
pub struct TorusMesh {
    nx: usize,
    ny: usize,
    spacing: f64,
}

impl TorusMesh {
    /// Unit-spaced torus.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self::with_spacing(nx, ny, 1.0)
    }

    /// Torus with `spacing` between neighbouring vertices.
    pub fn with_spacing(nx: usize, ny: usize, spacing: f64) -> Self {
        assert!(nx >= 3 && ny >= 3, "torus needs at least 3x3 vertices");
        Self { nx, ny, spacing }
    }

    /// Vertex index of lattice node `(x, y)`, wrapped.
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        (x % self.nx) + (y % self.ny) * self.nx
    }
}

impl MeshTopology for TorusMesh {
    fn vertex_count(&self) -> usize {
        self.nx * self.ny
    }

    fn position(&self, vertex: usize) -> DVec3 {
        let (x, y) = (vertex % self.nx, vertex / self.nx);
        DVec3::new(x as f64, y as f64, 0.0) * self.spacing
    }

    fn outgoing(&self, vertex: usize) -> SmallVec<[HalfEdge; 8]> {
        let (x, y) = (vertex % self.nx, vertex / self.nx);
        let ends = [
            self.index_of(x + 1, y),
            self.index_of(x + self.nx - 1, y),
            self.index_of(x, y + 1),
            self.index_of(x, y + self.ny - 1),
        ];
        ends.iter()
            .enumerate()
            .map(|(k, &end)| HalfEdge::new(4 * vertex + k, end))
            .collect()
    }

    fn halfedge_count(&self) -> usize {
        4 * self.vertex_count()
    }

    /// Each lattice cell is split along its `(1,0)-(0,1)` diagonal.
    fn closest_point(&self, point: DVec3) -> Option<MeshPoint> {
        let g = point / self.spacing;
        let (fx, fy) = (g.x.floor(), g.y.floor());
        let (u, v) = (g.x - fx, g.y - fy);
        let x = (fx as i64).rem_euclid(self.nx as i64) as usize;
        let y = (fy as i64).rem_euclid(self.ny as i64) as usize;
        let v00 = self.index_of(x, y);
        let v10 = self.index_of(x + 1, y);
        let v01 = self.index_of(x, y + 1);
        let v11 = self.index_of(x + 1, y + 1);
        let mut p = if u + v <= 1.0 {
            let mut p = MeshPoint::new([v00, v10, v01], [0.0; 3]);
            p.set_weights(u, v);
            p
        } else {
            let mut p = MeshPoint::new([v11, v01, v10], [0.0; 3]);
            p.set_weights(1.0 - u, 1.0 - v);
            p
        };
        // Drop rounding noise so weights stay in [0, 1].
        for w in &mut p.weights {
            *w = w.clamp(0.0, 1.0);
        }
        Some(p)
    }
}

/// A graph built from vertex positions and an undirected edge list.
///
/// Each undirected edge becomes two half-edges. Duplicate edges and
/// self-loops are ignored. Half-edge ids are dense, assigned vertex by
/// vertex in neighbour insertion order.
#[derive(Clone, Debug)]
pub struct AdjacencyMesh {
    positions: Vec<DVec3>,
    rings: Vec<IndexSet<usize>>,
    first_edge: Vec<usize>,
}

impl AdjacencyMesh {
    /// Build from vertex positions and an undirected edge list.
    pub fn new(positions: Vec<DVec3>, edges: &[(usize, usize)]) -> Self {
        let mut rings = vec![IndexSet::new(); positions.len()];
        for &(a, b) in edges {
            if a == b {
                continue;
            }
            rings[a].insert(b);
            rings[b].insert(a);
        }
        let mut mesh = Self {
            positions,
            rings,
            first_edge: Vec::new(),
        };
        mesh.renumber();
        mesh
    }

    /// `n` vertices on a line, each joined to the next.
    pub fn path(n: usize) -> Self {
        let positions = (0..n).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Self::new(positions, &edges)
    }

    /// Append a vertex with the given neighbours; returns its index.
    ///
    /// Fields built before the call become expired.
    pub fn push_vertex(&mut self, position: DVec3, neighbours: &[usize]) -> usize {
        let v = self.positions.len();
        self.positions.push(position);
        self.rings.push(IndexSet::new());
        for &n in neighbours {
            self.rings[v].insert(n);
            self.rings[n].insert(v);
        }
        self.renumber();
        v
    }

    /// Drop the last vertex and every edge touching it.
    pub fn pop_vertex(&mut self) {
        let Some(v) = self.positions.len().checked_sub(1) else {
            return;
        };
        self.positions.pop();
        self.rings.pop();
        for ring in &mut self.rings {
            ring.shift_remove(&v);
        }
        self.renumber();
    }

    fn renumber(&mut self) {
        self.first_edge.clear();
        let mut next = 0;
        for ring in &self.rings {
            self.first_edge.push(next);
            next += ring.len();
        }
        self.first_edge.push(next);
    }
}

impl MeshTopology for AdjacencyMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, vertex: usize) -> DVec3 {
        self.positions[vertex]
    }

    fn outgoing(&self, vertex: usize) -> SmallVec<[HalfEdge; 8]> {
        let base = self.first_edge[vertex];
        self.rings[vertex]
            .iter()
            .enumerate()
            .map(|(k, &end)| HalfEdge::new(base + k, end))
            .collect()
    }

    fn halfedge_count(&self) -> usize {
        self.first_edge.last().copied().unwrap_or(0)
    }

    /// Snaps to the nearest vertex.
    fn closest_point(&self, point: DVec3) -> Option<MeshPoint> {
        let nearest = self
            .positions
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(point)
                    .total_cmp(&b.distance_squared(point))
            })
            .map(|(i, _)| i)?;
        Some(MeshPoint::new([nearest; 3], [1.0, 0.0, 0.0]))
    }
}
