//! Cross-crate checks through the facade: grids and meshes describing the
//! same periodic lattice must agree.

use weft::io::{export_2d, import_2d, sample_source_2d, sample_source_mesh};
use weft::prelude::*;
use weft_test_utils::{assert_all_close, random_values, TorusMesh};

/// A unit-spaced periodic grid whose node `x + y * nx` sits where vertex
/// `x + y * nx` of `TorusMesh::new(nx, ny)` does.
fn torus_grid(nx: usize, ny: usize) -> Grid2d {
    let max = DVec2::new(nx as f64, ny as f64);
    Grid2d::new(Domain2d::from_corners(DVec2::ZERO, max), nx, ny)
        .unwrap()
        .with_wrap_all(WrapMode::Repeat)
}

#[test]
fn stencil_is_scaled_umbrella_on_torus() {
    let (nx, ny) = (6, 5);
    let grid = torus_grid(nx, ny);
    let torus = TorusMesh::new(nx, ny);
    let values = random_values(nx * ny, 21);

    let on_grid = GridField2d::from_values(grid, values.clone()).unwrap();
    let on_mesh = MeshField::from_values(&torus, values).unwrap();

    let stencil = on_grid.laplacian_field(ExecConfig::serial()).unwrap();
    let umbrella = on_mesh
        .umbrella_field(&torus, ExecConfig::parallel().with_chunk_len(4))
        .unwrap();
    let scaled: Vec<f64> = umbrella.values().iter().map(|v| 4.0 * v).collect();
    assert_all_close(stencil.values(), &scaled, 1e-12);
}

#[test]
fn heat_equation_agrees_across_representations() {
    let (nx, ny) = (8, 8);
    let torus = TorusMesh::new(nx, ny);
    let mut initial = vec![0.0; nx * ny];
    initial[torus.index_of(3, 4)] = 10.0;

    let mut grid = DynamicGrid2d::new(
        GridField2d::from_values(torus_grid(nx, ny), initial.clone()).unwrap(),
    );
    let mut mesh = DynamicMesh::new(MeshField::from_values(&torus, initial).unwrap());
    let exec = ExecConfig::parallel().with_chunk_len(16);
    let rate = 0.05;

    for _ in 0..20 {
        grid.diffuse(rate, exec).unwrap();
        grid.update(1.0, exec).unwrap();
        mesh.diffuse(&torus, 4.0 * rate, exec).unwrap();
        mesh.update(1.0, exec).unwrap();
    }

    assert_all_close(grid.values(), mesh.values(), 1e-12);
    let total: f64 = grid.values().iter().sum();
    assert!((total - 10.0).abs() < 1e-10, "{total}");
    let peak = grid.values().iter().cloned().fold(f64::MIN, f64::max);
    assert!(peak < 10.0);
}

#[test]
fn procedural_source_reaches_grid_and_mesh_alike() {
    let (nx, ny) = (5, 4);
    let torus = TorusMesh::new(nx, ny);
    let source = FnSource::new(|p: DVec3| (p.x * 0.7).sin() + p.y * p.y);

    let mut on_grid = GridField2d::new(torus_grid(nx, ny));
    let mut on_mesh = MeshField::new(&torus);
    sample_source_2d(&mut on_grid, &source, ExecConfig::serial()).unwrap();
    sample_source_mesh(&mut on_mesh, &torus, &source, ExecConfig::serial()).unwrap();

    assert_eq!(on_grid.values(), on_mesh.values());
}

#[test]
fn raster_round_trip_after_simulation() {
    let grid = Grid2d::new(Domain2d::UNIT, 16, 12).unwrap();
    let mut heat = DynamicGrid2d::new(GridField2d::from_fn(grid, |p| p.x * p.y));
    heat.deposit_toward(0.5, 0.25, ExecConfig::serial()).unwrap();
    heat.update(1.0, ExecConfig::serial()).unwrap();

    let to_grey = |v: f64| {
        let c = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [c, c, c, 255]
    };
    let raster = export_2d(heat.field(), 3, to_grey).unwrap();
    assert_eq!((raster.width(), raster.height()), (16, 12));

    let mut back = GridField2d::new(grid);
    import_2d(&mut back, &raster, |px| f64::from(px[0]) / 255.0).unwrap();
    assert_all_close(back.values(), heat.values(), 0.5 / 255.0 + 1e-12);
}
