//! Procedural value sources.
//!
//! Anything that can be evaluated at a point (noise, analytic functions,
//! another field) can stand in as a [`FieldSource`] and be sampled into a
//! grid or composed with other fields.

use glam::DVec3;

use crate::error::FieldError;
use crate::value::FieldValue;

/// A pure `(point) -> value` function.
///
/// Two calls with the same point must return the same value.
pub trait FieldSource<T: FieldValue>: Send + Sync {
    /// Evaluate the source at `point`.
    fn value_at(&self, point: DVec3) -> T;

    /// Analytic gradient at `point`.
    ///
    /// Sources without a closed-form gradient keep the default, which
    /// fails with [`FieldError::Unimplemented`] rather than approximating.
    fn gradient_at(&self, point: DVec3) -> Result<DVec3, FieldError> {
        let _ = point;
        Err(FieldError::Unimplemented {
            feature: "analytic gradient",
        })
    }
}

/// Adapts a closure into a [`FieldSource`].
///
/// ```
/// use weft_core::{DVec3, FieldSource, FnSource};
///
/// let plane = FnSource::new(|p: DVec3| p.x + 2.0 * p.y);
/// assert_eq!(plane.value_at(DVec3::new(1.0, 1.0, 0.0)), 3.0);
/// assert!(FieldSource::<f64>::gradient_at(&plane, DVec3::ZERO).is_err());
/// ```
pub struct FnSource<F> {
    f: F,
}

impl<F> FnSource<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> FieldSource<T> for FnSource<F>
where
    T: FieldValue,
    F: Fn(DVec3) -> T + Send + Sync,
{
    fn value_at(&self, point: DVec3) -> T {
        (self.f)(point)
    }
}
