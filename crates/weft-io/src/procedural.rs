//! Sampling procedural sources into fields.
//!
//! Noise generators, analytic functions and other fields all implement
//! [`FieldSource`]; these helpers evaluate one at every node or vertex
//! position in a partitioned pass.

use weft_core::partition::fill_indexed;
use weft_core::{ExecConfig, FieldError, FieldSource, FieldValue};
use weft_grid::{GridField2d, GridField3d};
use weft_mesh::{MeshField, MeshTopology};

/// Overwrite every node of `field` with `source` evaluated at the node's
/// position (`z = 0`).
pub fn sample_source_2d<T, S>(
    field: &mut GridField2d<T>,
    source: &S,
    exec: ExecConfig,
) -> Result<(), FieldError>
where
    T: FieldValue,
    S: FieldSource<T> + ?Sized,
{
    let grid = *field.grid();
    fill_indexed(field.values_mut(), exec, |i| {
        source.value_at(grid.coordinate_at(i).extend(0.0))
    })
}

/// Overwrite every node of `field` with `source` evaluated at the node's
/// position.
pub fn sample_source_3d<T, S>(
    field: &mut GridField3d<T>,
    source: &S,
    exec: ExecConfig,
) -> Result<(), FieldError>
where
    T: FieldValue,
    S: FieldSource<T> + ?Sized,
{
    let grid = *field.grid();
    fill_indexed(field.values_mut(), exec, |i| source.value_at(grid.coordinate_at(i)))
}

/// Overwrite every vertex of `field` with `source` evaluated at the vertex
/// position.
pub fn sample_source_mesh<T, S, M>(
    field: &mut MeshField<T>,
    topology: &M,
    source: &S,
    exec: ExecConfig,
) -> Result<(), FieldError>
where
    T: FieldValue,
    S: FieldSource<T> + ?Sized,
    M: MeshTopology + ?Sized,
{
    field.ensure_current(topology)?;
    fill_indexed(field.values_mut(), exec, |v| {
        source.value_at(topology.position(v))
    })
}
