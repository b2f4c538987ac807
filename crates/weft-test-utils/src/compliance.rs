//! [`MeshTopology`] contract checks.
//!
//! Fixtures and host adapters should pass [`run_full_compliance`] before
//! they are used to drive mesh fields.

use glam::DVec3;
use indexmap::IndexSet;
use weft_mesh::MeshTopology;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(topology: &dyn MeshTopology) {
    for v in 0..topology.vertex_count() {
        for nb in topology.neighbours(v) {
            assert!(
                topology.neighbours(nb).contains(&v),
                "neighbour symmetry violated: {nb} in N({v}) but {v} not in N({nb})"
            );
        }
    }
}

/// Assert that every edge end is a valid vertex.
pub fn assert_edge_ends_in_range(topology: &dyn MeshTopology) {
    let n = topology.vertex_count();
    for v in 0..n {
        for e in topology.outgoing(v) {
            assert!(e.end < n, "edge {} of vertex {v} ends at {} >= {n}", e.index, e.end);
        }
    }
}

/// Assert that half-edge ids are unique and cover `0..halfedge_count()`.
pub fn assert_halfedge_ids_dense(topology: &dyn MeshTopology) {
    let count = topology.halfedge_count();
    let mut seen = IndexSet::with_capacity(count);
    for v in 0..topology.vertex_count() {
        for e in topology.outgoing(v) {
            assert!(e.index < count, "half-edge id {} >= {count}", e.index);
            assert!(seen.insert(e.index), "half-edge id {} used twice", e.index);
        }
    }
    assert_eq!(seen.len(), count, "half-edge ids are not dense");
}

/// Assert that two calls to `outgoing` return the same edges.
pub fn assert_outgoing_deterministic(topology: &dyn MeshTopology) {
    for v in 0..topology.vertex_count() {
        assert_eq!(topology.outgoing(v), topology.outgoing(v), "vertex {v}");
    }
}

/// Assert that closest-point witnesses near every vertex are well formed.
pub fn assert_closest_points_valid(topology: &dyn MeshTopology) {
    let n = topology.vertex_count();
    for v in 0..n {
        let q = topology.position(v) + DVec3::splat(1e-3);
        let Some(p) = topology.closest_point(q) else {
            continue;
        };
        assert!(!p.is_unset(), "unset witness near vertex {v}");
        assert!(
            p.corners.iter().all(|&c| c < n),
            "witness corner out of range: {:?}",
            p.corners
        );
        assert!(
            (p.weight_sum() - 1.0).abs() < 1e-9,
            "witness weights sum to {}",
            p.weight_sum()
        );
    }
}

/// Run every check above.
pub fn run_full_compliance(topology: &dyn MeshTopology) {
    assert_neighbours_symmetric(topology);
    assert_edge_ends_in_range(topology);
    assert_halfedge_ids_dense(topology);
    assert_outgoing_deterministic(topology);
    assert_closest_points_valid(topology);
}
