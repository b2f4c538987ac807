//! Benchmark profiles for the Weft field library.
//!
//! Provides deterministic fields and query sets shared by the criterion
//! benches:
//!
//! - [`reference_grid`]: 256x256 periodic scalar grid (65K nodes)
//! - [`reference_volume`]: 48x48x48 clamped scalar volume (~110K nodes)
//! - [`reference_mesh`]: 256x256 torus mesh with matching values
//! - [`query_points`]: seeded sample positions inside a domain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glam::{DVec2, DVec3};
use weft_core::WrapMode;
use weft_grid::{Domain2d, Domain3d, Grid2d, Grid3d, GridField2d, GridField3d};
use weft_mesh::MeshField;
use weft_test_utils::fixtures::TorusMesh;
use weft_test_utils::{random_points, random_values};

/// Side length of the reference grid and mesh.
pub const REFERENCE_SIDE: usize = 256;

/// A `REFERENCE_SIDE`² grid over `[0, 1]²` with Repeat wrap and seeded
/// values in `[-1, 1)`.
pub fn reference_grid(seed: u64) -> GridField2d<f64> {
    let grid = Grid2d::new(Domain2d::UNIT, REFERENCE_SIDE, REFERENCE_SIDE)
        .unwrap()
        .with_wrap_all(WrapMode::Repeat);
    GridField2d::from_values(grid, random_values(grid.count(), seed)).unwrap()
}

/// A 48³ volume over `[0, 1]³` with Clamp wrap and seeded values.
pub fn reference_volume(seed: u64) -> GridField3d<f64> {
    let grid = Grid3d::new(Domain3d::from_corners(DVec3::ZERO, DVec3::ONE), 48, 48, 48).unwrap();
    GridField3d::from_values(grid, random_values(grid.count(), seed)).unwrap()
}

/// A `REFERENCE_SIDE`² torus and a seeded per-vertex field on it.
pub fn reference_mesh(seed: u64) -> (TorusMesh, MeshField<f64>) {
    let mesh = TorusMesh::new(REFERENCE_SIDE, REFERENCE_SIDE);
    let field = MeshField::from_values(&mesh, random_values(REFERENCE_SIDE * REFERENCE_SIDE, seed))
        .unwrap();
    (mesh, field)
}

/// `n` seeded positions inside `domain`.
pub fn query_points(domain: &Domain2d, n: usize, seed: u64) -> Vec<DVec2> {
    random_points(n, domain.min().extend(0.0), domain.max().extend(0.0), seed)
        .into_iter()
        .map(|p| p.truncate())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(reference_grid(7).values(), reference_grid(7).values());
        assert_ne!(reference_grid(7).values(), reference_grid(8).values());
        let (mesh, field) = reference_mesh(3);
        assert!(!field.is_expired(&mesh));
        assert_eq!(reference_volume(1).len(), 48 * 48 * 48);
    }

    #[test]
    fn rule_stack_commits_on_reference_grid() {
        use weft_core::ExecConfig;
        use weft_dynamic::DynamicGrid2d;

        let mut field = DynamicGrid2d::new(reference_grid(7));
        let before = field.values().to_vec();
        let exec = ExecConfig::parallel();
        field.decay(0.1, exec).unwrap();
        field.bifurcate(0.0, 0.25, exec).unwrap();
        field.deposit(0.01, exec).unwrap();
        field.update(0.1, exec).unwrap();
        for (&v, &b) in field.values().iter().zip(&before) {
            let push = if b > 0.0 { 0.25 } else if b < 0.0 { -0.25 } else { 0.0 };
            let expected = b + (-b * 0.1 + push + 0.01) * 0.1;
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn queries_fall_inside_domain() {
        let d = Domain2d::UNIT;
        assert!(query_points(&d, 100, 5).iter().all(|&p| d.contains(p)));
    }
}
