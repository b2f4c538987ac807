//! Core types and traits for Weft fields.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! building blocks shared by grid and mesh fields: the [`FieldValue`]
//! arithmetic capability, [`WrapMode`] boundary policies, interpolation
//! witnesses ([`GridPoint2d`], [`GridPoint3d`], [`MeshPoint`]), the
//! [`ExecConfig`] execution settings, partitioned execution helpers and
//! error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod partition;
pub mod point;
pub mod source;
pub mod value;
pub mod wrap;

pub use config::ExecConfig;
pub use error::{ConfigError, FieldError};
pub use point::{CornerPoint, GridPoint2d, GridPoint3d, MeshPoint};
pub use source::{FieldSource, FnSource};
pub use value::FieldValue;
pub use wrap::WrapMode;

pub use glam::{DVec2, DVec3};
