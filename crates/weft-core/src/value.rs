//! The [`FieldValue`] arithmetic capability.

use glam::{DVec2, DVec3};

/// Arithmetic a field needs from its element type.
///
/// Interpolation, scatter-add and stencils are written once against this
/// trait and monomorphised per element type, so the hot sampling loops carry
/// no dynamic dispatch. Implemented for `f64`, [`DVec2`] and [`DVec3`].
///
/// All interpolation goes through [`lerp`](FieldValue::lerp), which uses the
/// `a + (b - a) * t` form for every implementor.
pub trait FieldValue: Copy + Default + Send + Sync + PartialEq + std::fmt::Debug + 'static {
    /// The additive identity.
    fn zero() -> Self {
        Self::default()
    }

    /// `self + other`.
    fn add(self, other: Self) -> Self;

    /// `self - other`.
    fn sub(self, other: Self) -> Self;

    /// `self * factor`.
    fn scale(self, factor: f64) -> Self;

    /// `self + (other - self) * t`.
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        self.add(other.sub(self).scale(t))
    }

    /// Returns `true` if every component is finite.
    fn is_finite(self) -> bool;
}

impl FieldValue for f64 {
    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl FieldValue for DVec2 {
    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn is_finite(self) -> bool {
        DVec2::is_finite(self)
    }
}

impl FieldValue for DVec3 {
    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn is_finite(self) -> bool {
        DVec3::is_finite(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(<f64 as FieldValue>::zero(), 0.0);
        assert_eq!(DVec2::zero(), DVec2::ZERO);
        assert_eq!(DVec3::zero(), DVec3::ZERO);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(FieldValue::lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(FieldValue::lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(FieldValue::lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn lerp_vectors_componentwise() {
        let a = DVec3::new(0.0, 1.0, 2.0);
        let b = DVec3::new(4.0, 1.0, -2.0);
        assert_eq!(FieldValue::lerp(a, b, 0.5), DVec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn finiteness() {
        assert!(FieldValue::is_finite(1.0f64));
        assert!(!FieldValue::is_finite(f64::NAN));
        assert!(!FieldValue::is_finite(DVec2::new(0.0, f64::INFINITY)));
    }
}
