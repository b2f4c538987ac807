//! Bulk data exchange for Weft fields.
//!
//! - [`raster`]: import and export grid fields as 8-bit RGB/RGBA pixel
//!   buffers through a caller-supplied pixel mapping. Decoding and encoding
//!   image files is left to the caller's codec.
//! - [`procedural`]: fill fields from any
//!   [`FieldSource`](weft_core::FieldSource).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod procedural;
pub mod raster;

pub use procedural::{sample_source_2d, sample_source_3d, sample_source_mesh};
pub use raster::{export_2d, export_3d, import_2d, import_3d, Raster};
