//! Axis-aligned world-space domains.

use glam::{DVec2, DVec3};
use weft_core::FieldError;

/// A closed interval `[min, max]` on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Interval {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Create an interval. No validation; see [`Interval::validate`].
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if `min <= t <= max`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.min && t <= self.max
    }

    /// Map a normalized parameter to the interval.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + self.span() * t
    }

    /// Map a value in the interval to `[0, 1]`.
    pub fn normalize(&self, t: f64) -> f64 {
        (t - self.min) / self.span()
    }

    /// Reject non-finite bounds and empty or inverted spans.
    pub fn validate(&self, axis: &'static str) -> Result<(), FieldError> {
        if !self.min.is_finite() || !self.max.is_finite() || !(self.max > self.min) {
            return Err(FieldError::InvalidDomain {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A 2D axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain2d {
    /// Extent along x.
    pub x: Interval,
    /// Extent along y.
    pub y: Interval,
}

impl Domain2d {
    /// The unit square.
    pub const UNIT: Self = Self {
        x: Interval::UNIT,
        y: Interval::UNIT,
    };

    /// Create a domain from per-axis intervals.
    pub const fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// Create a domain from its two corners.
    pub fn from_corners(min: DVec2, max: DVec2) -> Self {
        Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
        }
    }

    /// Lower corner.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x.min, self.y.min)
    }

    /// Upper corner.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x.max, self.y.max)
    }

    /// Per-axis spans.
    pub fn span(&self) -> DVec2 {
        DVec2::new(self.x.span(), self.y.span())
    }

    /// Returns `true` if `point` lies inside the closed box.
    pub fn contains(&self, point: DVec2) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Validate every axis.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.x.validate("x")?;
        self.y.validate("y")
    }
}

/// A 3D axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain3d {
    /// Extent along x.
    pub x: Interval,
    /// Extent along y.
    pub y: Interval,
    /// Extent along z.
    pub z: Interval,
}

impl Domain3d {
    /// The unit cube.
    pub const UNIT: Self = Self {
        x: Interval::UNIT,
        y: Interval::UNIT,
        z: Interval::UNIT,
    };

    /// Create a domain from per-axis intervals.
    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create a domain from its two corners.
    pub fn from_corners(min: DVec3, max: DVec3) -> Self {
        Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        }
    }

    /// Lower corner.
    pub fn min(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Upper corner.
    pub fn max(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Per-axis spans.
    pub fn span(&self) -> DVec3 {
        DVec3::new(self.x.span(), self.y.span(), self.z.span())
    }

    /// Returns `true` if `point` lies inside the closed box.
    pub fn contains(&self, point: DVec3) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)
    }

    /// Validate every axis.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.z.validate("z")
    }
}
