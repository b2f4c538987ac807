//! Weft: sampled scalar and vector fields on regular grids and meshes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Weft sub-crates. For most users, adding `weft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // A 32x32 periodic grid over the unit square.
//! let grid = Grid2d::new(Domain2d::UNIT, 32, 32)
//!     .unwrap()
//!     .with_wrap_all(WrapMode::Repeat);
//! let field = GridField2d::from_fn(grid, |p| p.x + 2.0 * p.y);
//!
//! // Bilinear sampling between nodes.
//! let v = field.value_at(DVec2::new(0.25, 0.5));
//! assert!((v - 1.25).abs() < 1e-12);
//!
//! // Explicit diffusion through a dynamic field.
//! let mut heat = DynamicGrid2d::new(GridField2d::<f64>::new(grid));
//! heat.deposit_at_position(DVec2::new(0.5, 0.5), 1.0);
//! heat.update(1.0, ExecConfig::serial()).unwrap();
//! heat.diffuse(1e-4, ExecConfig::serial()).unwrap();
//! heat.update(1.0, ExecConfig::serial()).unwrap();
//! let total: f64 = heat.values().iter().sum();
//! assert!((total - 1.0).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | Value capability, wrap modes, witnesses, exec config, errors |
//! | [`grid`] | `weft-grid` | 2D/3D lattices, grid fields, stencils |
//! | [`mesh`] | `weft-mesh` | Mesh topology trait, per-vertex fields, mesh Laplacians |
//! | [`dynamic`] | `weft-dynamic` | Delta buffers and explicit-Euler dynamic fields |
//! | [`io`] | `weft-io` | Raster import/export and procedural sampling |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`weft-core`).
///
/// Contains the [`types::FieldValue`] capability, [`types::WrapMode`],
/// interpolation witnesses and the [`types::ExecConfig`] settings.
pub use weft_core as types;

/// Structured grid fields (`weft-grid`).
///
/// Provides [`grid::Grid2d`], [`grid::Grid3d`], their fields and the
/// central-difference stencils.
pub use weft_grid as grid;

/// Mesh fields (`weft-mesh`).
///
/// The [`mesh::MeshTopology`] trait is the extension point for user
/// surface representations.
pub use weft_mesh as mesh;

/// Dynamic fields (`weft-dynamic`).
///
/// [`dynamic::DynamicField`] accumulates update rules into a
/// [`dynamic::DeltaBuffer`] and commits them with one Euler step.
pub use weft_dynamic as dynamic;

/// Raster and procedural I/O (`weft-io`).
pub use weft_io as io;

/// Common imports for typical Weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use weft_core::{
        ExecConfig, FieldError, FieldSource, FieldValue, FnSource, GridPoint2d, GridPoint3d,
        MeshPoint, WrapMode,
    };
    pub use weft_core::{DVec2, DVec3};

    // Grids
    pub use weft_grid::{
        Domain2d, Domain3d, Grid2d, Grid3d, GridField2d, GridField3d, Interval,
    };

    // Meshes
    pub use weft_mesh::{HalfEdge, MeshField, MeshTopology};

    // Dynamics
    pub use weft_dynamic::{DynamicField, DynamicGrid2d, DynamicGrid3d, DynamicMesh};

    // I/O
    pub use weft_io::Raster;
}
