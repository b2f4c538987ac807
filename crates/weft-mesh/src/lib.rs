//! Mesh topology fields for Weft.
//!
//! A [`MeshField`] stores one value per vertex of a mesh that Weft does not
//! own. Connectivity, positions and closest-point queries come from the
//! caller through the [`MeshTopology`] trait; this crate contributes the
//! per-vertex storage, the expiry/resync discipline and the graph
//! Laplacian reductions.
//!
//! The field caches the vertex count it was built (or last synced) for.
//! When the topology's count diverges the field is *expired*: every
//! operation that takes the topology returns
//! [`FieldError::Expired`](weft_core::FieldError::Expired) until
//! [`MeshField::sync`] is called. Nothing resizes implicitly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod laplacian;
pub mod topology;

pub use field::MeshField;
pub use topology::{HalfEdge, MeshTopology};
