//! Dynamic fields over grids and meshes, driven from many threads.

use glam::{DVec2, DVec3};
use rayon::prelude::*;
use weft_core::{ExecConfig, FieldError, WrapMode};
use weft_dynamic::{DynamicGrid2d, DynamicGrid3d, DynamicMesh};
use weft_grid::{Domain2d, Domain3d, Grid2d, Grid3d, GridField2d, GridField3d, Interval};
use weft_mesh::{MeshField, MeshTopology};
use weft_test_utils::{assert_close, random_points, AdjacencyMesh, TorusMesh};

fn grid2(n: usize) -> Grid2d {
    Grid2d::new(Domain2d::from_corners(DVec2::ZERO, DVec2::splat(n as f64)), n, n)
        .unwrap()
        .with_wrap_all(WrapMode::Repeat)
}

#[test]
fn parallel_scatter_equals_serial_sum() {
    let grid = grid2(16);
    let points: Vec<_> = random_points(5000, DVec3::ZERO, DVec3::splat(16.0), 21)
        .into_iter()
        .map(|p| grid.grid_point(p.truncate()))
        .collect();

    let mut serial = DynamicGrid2d::new(GridField2d::new(grid));
    for p in &points {
        serial.deposit_at_point(p, 0.1);
    }

    let parallel = DynamicGrid2d::new(GridField2d::new(grid));
    let sink = parallel.sink();
    points.par_iter().for_each(|p| sink.deposit_at_point(p, 0.1));

    for i in 0..grid.count() {
        // Summation order differs between threads.
        assert_close(serial.pending(i), parallel.pending(i), 1e-9);
    }
    let total: f64 = parallel.deltas().to_vec().iter().sum();
    assert_close(total, 500.0, 1e-9);
}

#[test]
fn deposit_points_matches_sink() {
    let grid = grid2(8);
    let points: Vec<_> = random_points(300, DVec3::ZERO, DVec3::splat(8.0), 3)
        .into_iter()
        .map(|p| grid.grid_point(p.truncate()))
        .collect();
    let amounts = vec![2.0; points.len()];

    let mut a = DynamicGrid2d::new(GridField2d::new(grid));
    a.deposit_points(&points, &amounts, ExecConfig::parallel().with_chunk_len(8))
        .unwrap();
    let b = DynamicGrid2d::new(GridField2d::new(grid));
    for p in &points {
        b.sink().deposit_at_point(p, 2.0);
    }
    for i in 0..grid.count() {
        assert_close(a.pending(i), b.pending(i), 1e-9);
    }
}

#[test]
fn grid_and_mesh_diffusion_agree_up_to_stencil_scale() {
    let mut grid = DynamicGrid2d::new(GridField2d::new(grid2(6)));
    let torus = TorusMesh::new(6, 6);
    let mut mesh = DynamicMesh::new(MeshField::new(&torus));
    for (i, v) in [(0, 3.0), (7, -1.0), (20, 2.5)] {
        grid.values_mut()[i] = v;
        mesh.values_mut()[i] = v;
    }
    grid.diffuse(1.0, ExecConfig::serial()).unwrap();
    mesh.diffuse(&torus, 1.0, ExecConfig::serial()).unwrap();
    // 2D stencil = 4 / h² × umbrella on a unit-spaced 4-neighbour torus.
    for i in 0..36 {
        assert_close(grid.pending(i), 4.0 * mesh.pending(i), 1e-12);
    }
}

#[test]
fn weighted_mesh_diffusion_with_unit_weights() {
    let torus = TorusMesh::new(5, 5);
    let mut a = DynamicMesh::new(MeshField::from_fn(&torus, |p| p.x * p.y));
    let mut b = DynamicMesh::new(MeshField::from_fn(&torus, |p| p.x * p.y));
    let weights = vec![1.0; torus.halfedge_count()];
    a.diffuse(&torus, 0.5, ExecConfig::serial()).unwrap();
    b.diffuse_weighted(&torus, &weights, 0.125, ExecConfig::serial())
        .unwrap();
    for i in 0..torus.vertex_count() {
        assert_close(a.pending(i), b.pending(i), 1e-12);
    }
}

#[test]
fn mesh_expiry_and_sync() {
    let mut mesh = AdjacencyMesh::path(3);
    let mut f = DynamicMesh::new(MeshField::from_values(&mesh, vec![1.0, 1.0, 1.0]).unwrap());
    f.deposit_at(2, 5.0);

    mesh.push_vertex(DVec3::new(3.0, 0.0, 0.0), &[2]);
    assert!(f.is_expired(&mesh));
    assert!(matches!(
        f.diffuse(&mesh, 1.0, ExecConfig::serial()),
        Err(FieldError::Expired { cached: 3, current: 4 })
    ));

    assert!(f.sync(&mesh));
    assert_eq!(f.deltas().len(), 4);
    assert_eq!(f.pending(2), 5.0);
    assert_eq!(
        f.deposit_at_position(&mesh, DVec3::new(2.9, 0.1, 0.0), 1.0),
        Ok(true)
    );
    f.update(1.0, ExecConfig::serial()).unwrap();
    assert_eq!(f.values(), &[1.0, 1.0, 6.0, 1.0]);
}

#[test]
fn volume_decay_to_target() {
    let i = Interval::new(0.0, 1.0);
    let grid = Grid3d::new(Domain3d::new(i, i, i), 4, 4, 4).unwrap();
    let mut f = DynamicGrid3d::new(GridField3d::new(grid));
    let exec = ExecConfig::parallel().with_chunk_len(10);
    for _ in 0..200 {
        f.deposit_toward(1.0, 0.5, exec).unwrap();
        f.update(0.1, exec).unwrap();
    }
    assert!(f.values().iter().all(|&v| (v - 1.0).abs() < 1e-3));

    f.deposit_at_position(DVec3::splat(0.5), 8.0);
    f.diffuse(0.01, exec).unwrap();
    f.update(1.0, exec).unwrap();
    let total: f64 = f.values().iter().sum();
    assert_close(total, 64.0 * 1.0 + 8.0, 0.1);
}
