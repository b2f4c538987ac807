//! Mesh fields driven by the shared topology fixtures.

use glam::DVec3;
use weft_core::{ExecConfig, FieldError};
use weft_mesh::{MeshField, MeshTopology};
use weft_test_utils::{assert_all_close, random_values, AdjacencyMesh, TorusMesh};

#[test]
fn umbrella_point_source_on_torus() {
    let torus = TorusMesh::new(4, 4);
    let mut f = MeshField::<f64>::new(&torus);
    f.set(0, 4.0);
    let l = f.umbrella_field(&torus, ExecConfig::serial()).unwrap();
    assert_eq!(l.get(0), -4.0);
    for n in torus.neighbours(0) {
        assert_eq!(l.get(n), 1.0);
    }
    assert_eq!(l.values().iter().sum::<f64>(), 0.0);
}

#[test]
fn parallel_matches_serial() {
    let torus = TorusMesh::new(40, 30);
    let f = MeshField::from_values(&torus, random_values(torus.vertex_count(), 11)).unwrap();
    let weights = random_values(torus.halfedge_count(), 12);
    let par = ExecConfig::parallel().with_chunk_len(100);

    let serial = f.umbrella_field(&torus, ExecConfig::serial()).unwrap();
    let parallel = f.umbrella_field(&torus, par).unwrap();
    assert_eq!(serial, parallel);

    let serial = f.weighted_field(&torus, &weights, ExecConfig::serial()).unwrap();
    let parallel = f.weighted_field(&torus, &weights, par).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn umbrella_sums_to_zero_on_regular_mesh() {
    let torus = TorusMesh::new(9, 7);
    let f = MeshField::from_values(&torus, random_values(torus.vertex_count(), 5)).unwrap();
    let l = f.umbrella_field(&torus, ExecConfig::default()).unwrap();
    assert!(l.values().iter().sum::<f64>().abs() < 1e-12);
}

#[test]
fn topology_growth_requires_sync() {
    let mut mesh = AdjacencyMesh::path(3);
    let mut f = MeshField::from_values(&mesh, vec![1.0, 2.0, 3.0]).unwrap();

    mesh.push_vertex(DVec3::new(3.0, 0.0, 0.0), &[2]);
    let mut out = vec![0.0; 4];
    assert_eq!(
        f.laplacian_umbrella(&mesh, &mut out, ExecConfig::serial()),
        Err(FieldError::Expired {
            cached: 3,
            current: 4
        })
    );

    assert!(f.sync(&mesh));
    f.set(3, 5.0);
    f.laplacian_umbrella(&mesh, &mut out, ExecConfig::serial())
        .unwrap();
    assert_all_close(&out, &[1.0, 0.0, 0.5, -2.0], 1e-12);
}

#[test]
fn closest_point_sampling_on_torus() {
    let torus = TorusMesh::with_spacing(6, 6, 0.5);
    let f = MeshField::from_fn(&torus, |p| 2.0 * p.x + p.y);
    // Linear data is reproduced exactly by barycentric weights.
    let q = DVec3::new(1.1, 0.7, 0.0);
    let v = f.value_at(&torus, q).unwrap().unwrap();
    assert!((v - (2.0 * q.x + q.y)).abs() < 1e-12);
}
