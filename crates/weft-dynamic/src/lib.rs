//! Delta-accumulating dynamic fields for Weft.
//!
//! A [`DynamicField`] pairs a scalar field with a [`DeltaBuffer`] of
//! pending contributions. Update rules (deposit, decay, bifurcation,
//! diffusion) read only the committed values and add into the deltas; a
//! single [`DynamicField::update`] then applies `values += deltas * dt`
//! and zeroes the deltas.
//!
//! Range rules run as partitioned passes over disjoint chunks and need no
//! synchronisation. Scatter deposits that may overlap across threads go
//! through a [`DepositSink`] and land via [`AtomicF64`] adds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod atomic;
pub mod delta;
pub mod dynamic;

pub use atomic::AtomicF64;
pub use delta::DeltaBuffer;
pub use dynamic::{
    DepositSink, DynamicField, DynamicGrid2d, DynamicGrid3d, DynamicMesh, ScalarBuffer,
};
