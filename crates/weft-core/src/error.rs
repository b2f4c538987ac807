//! Error types for Weft fields.
//!
//! Errors are split by concern: [`ConfigError`] for execution settings and
//! [`FieldError`] for everything a field operation can reject. Out-of-range
//! indices handed to point-indexed update rules are not represented here;
//! those are contract violations and panic at the call site.

use std::error::Error;
use std::fmt;

/// Errors detected by [`ExecConfig::validate`](crate::ExecConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `chunk_len` is zero, which would produce an empty partition.
    ZeroChunkLen,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroChunkLen => write!(f, "chunk_len must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from field construction, sampling, stencils and bulk I/O.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A supplied buffer does not match the field's element count.
    SizeMismatch {
        /// Element count the field requires.
        expected: usize,
        /// Element count that was supplied.
        actual: usize,
    },
    /// A grid was requested with zero samples along some axis.
    EmptyGrid,
    /// A domain axis is degenerate (`min == max`) or non-finite.
    InvalidDomain {
        /// Axis name (`"x"`, `"y"` or `"z"`).
        axis: &'static str,
        /// Lower bound supplied for the axis.
        min: f64,
        /// Upper bound supplied for the axis.
        max: f64,
    },
    /// A scalar parameter is outside its valid range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Description of the valid range.
        reason: &'static str,
    },
    /// A mesh field no longer matches its topology's vertex count.
    ///
    /// Call `sync` on the field before using it again.
    Expired {
        /// Vertex count cached by the field.
        cached: usize,
        /// Vertex count currently reported by the topology.
        current: usize,
    },
    /// A raster buffer uses a pixel layout that cannot be read or written.
    UnsupportedFormat {
        /// What was wrong with the format.
        reason: String,
    },
    /// The requested operation is deliberately not implemented.
    Unimplemented {
        /// Name of the missing feature.
        feature: &'static str,
    },
    /// Execution configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected} elements, got {actual}")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one sample per axis"),
            Self::InvalidDomain { axis, min, max } => {
                write!(f, "invalid domain on axis {axis}: [{min}, {max}]")
            }
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => {
                write!(f, "invalid parameter {name} = {value}: {reason}")
            }
            Self::Expired { cached, current } => {
                write!(
                    f,
                    "field expired: cached {cached} vertices, topology has {current}"
                )
            }
            Self::UnsupportedFormat { reason } => write!(f, "unsupported format: {reason}"),
            Self::Unimplemented { feature } => write!(f, "not implemented: {feature}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Return `SizeMismatch` unless `actual == expected`.
pub fn check_len(expected: usize, actual: usize) -> Result<(), FieldError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FieldError::SizeMismatch { expected, actual })
    }
}
