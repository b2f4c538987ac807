//! Test utilities for Weft development.
//!
//! - [`fixtures`]: mesh topologies ([`TorusMesh`], [`AdjacencyMesh`]).
//! - [`compliance`]: contract checks for [`MeshTopology`](weft_mesh::MeshTopology)
//!   implementations.
//! - Seeded random data and float assertion helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod fixtures;

pub use fixtures::{AdjacencyMesh, TorusMesh};

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `len` values uniform in `[-1, 1)`, reproducible from `seed`.
pub fn random_values(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
}

/// `len` points uniform in the box `[min, max)`, reproducible from `seed`.
pub fn random_points(len: usize, min: DVec3, max: DVec3, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let t = DVec3::new(rng.random(), rng.random(), rng.random());
            min + (max - min) * t
        })
        .collect()
}

/// Assert `|a - b| <= tol`.
#[track_caller]
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} != {b} (tolerance {tol})");
}

/// Assert element-wise closeness of two equal-length slices.
#[track_caller]
pub fn assert_all_close(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len(), "length mismatch");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() <= tol, "index {i}: {x} != {y} (tolerance {tol})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_values_reproducible() {
        assert_eq!(random_values(32, 7), random_values(32, 7));
        assert_ne!(random_values(32, 7), random_values(32, 8));
        assert!(random_values(256, 1).iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn random_points_in_box() {
        let (lo, hi) = (DVec3::new(-1.0, 0.0, 2.0), DVec3::new(1.0, 4.0, 3.0));
        for p in random_points(100, lo, hi, 3) {
            assert!(p.cmpge(lo).all() && p.cmple(hi).all(), "{p}");
        }
    }
}
