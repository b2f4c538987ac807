//! Structured grid fields for Weft.
//!
//! A grid field stores one value per node of a regular 2D or 3D lattice in
//! a flat array addressed by `x + y * count_x [+ z * count_x * count_y]`.
//! The lattice ([`Grid2d`], [`Grid3d`]) owns the world-space [`Domain2d`] /
//! [`Domain3d`], the per-axis sample counts and the per-axis
//! [`WrapMode`](weft_core::WrapMode).
//!
//! # Sampling
//!
//! - [`GridField2d::value_at`]: bounds-safe multilinear interpolation.
//! - [`GridField2d::value_at_interior`]: the same interpolation without
//!   wrap calls, for queries known to satisfy [`Grid2d::is_interior`].
//! - [`GridField2d::value_at_point`] / [`GridField2d::increment_at`]: gather
//!   and scatter through a precomputed [`GridPoint2d`](weft_core::GridPoint2d).
//!
//! # Stencils
//!
//! Laplacian, divergence, curl and gradient are central differences on the
//! flat array; see the [`stencil`] module.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod field2d;
pub mod field3d;
pub mod grid2d;
pub mod grid3d;
pub mod stencil;

pub use domain::{Domain2d, Domain3d, Interval};
pub use field2d::GridField2d;
pub use field3d::GridField3d;
pub use grid2d::Grid2d;
pub use grid3d::Grid3d;
pub use stencil::{Stencil2d, Stencil3d};
