//! Interpolation witnesses: corner indices plus weights for one query.
//!
//! A [`CornerPoint`] is produced by a field (or a mesh collaborator) for a
//! query position and consumed by `value_at_point` / `increment_at`. Weight
//! computation is separated from corner computation: the owning field fills
//! `corners` with its own wrap logic, while [`set_weights`](GridPoint2d::set_weights)
//! is shared by every field of the same dimension.

/// Corner indices and interpolation weights for an `N`-corner query.
///
/// Corner ordering follows the bit convention of bilinear/trilinear
/// interpolation: corner 0 is low on every axis, bit 0 of the corner number
/// selects the high x sample, bit 1 the high y sample, bit 2 the high z
/// sample. For [`MeshPoint`] the corners are the vertices of the face that
/// contains the query, in face order.
///
/// The point is *unset* when `corners[0] == usize::MAX`. An unset point is
/// distinct from a valid point whose weights happen to be zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerPoint<const N: usize> {
    /// Flat value indices of the contributing samples.
    pub corners: [usize; N],
    /// Interpolation weight per corner; sums to 1 for a valid point.
    pub weights: [f64; N],
}

/// Witness for a bilinear query on a 2D grid.
pub type GridPoint2d = CornerPoint<4>;

/// Witness for a trilinear query on a 3D grid.
pub type GridPoint3d = CornerPoint<8>;

/// Witness for a barycentric query on a triangle of a mesh.
pub type MeshPoint = CornerPoint<3>;

impl<const N: usize> CornerPoint<N> {
    const UNSET: usize = usize::MAX;

    /// Create a point from explicit corners and weights.
    pub fn new(corners: [usize; N], weights: [f64; N]) -> Self {
        Self { corners, weights }
    }

    /// Create an unset point.
    pub fn unset() -> Self {
        let mut corners = [0; N];
        if N > 0 {
            corners[0] = Self::UNSET;
        }
        Self {
            corners,
            weights: [0.0; N],
        }
    }

    /// Mark this point as unset.
    pub fn clear(&mut self) {
        if N > 0 {
            self.corners[0] = Self::UNSET;
        }
    }

    /// Returns `true` if the point has been cleared or never filled.
    pub fn is_unset(&self) -> bool {
        N == 0 || self.corners[0] == Self::UNSET
    }

    /// Iterate `(corner, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.corners.iter().copied().zip(self.weights.iter().copied())
    }

    /// Sum of all weights.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Largest corner index, or `None` when unset.
    pub fn max_corner(&self) -> Option<usize> {
        if self.is_unset() {
            None
        } else {
            self.corners.iter().copied().max()
        }
    }
}

impl<const N: usize> Default for CornerPoint<N> {
    fn default() -> Self {
        Self::unset()
    }
}

impl CornerPoint<4> {
    /// Fill bilinear weights from fractional offsets `u`, `v` in `[0, 1)`.
    ///
    /// Corners are left untouched.
    #[inline]
    pub fn set_weights(&mut self, u: f64, v: f64) {
        let u0 = 1.0 - u;
        let v0 = 1.0 - v;
        self.weights = [u0 * v0, u * v0, u0 * v, u * v];
    }
}

impl CornerPoint<8> {
    /// Fill trilinear weights from fractional offsets `u`, `v`, `w` in `[0, 1)`.
    ///
    /// Corners are left untouched.
    #[inline]
    pub fn set_weights(&mut self, u: f64, v: f64, w: f64) {
        let u0 = 1.0 - u;
        let v0 = 1.0 - v;
        let w0 = 1.0 - w;
        self.weights = [
            u0 * v0 * w0,
            u * v0 * w0,
            u0 * v * w0,
            u * v * w0,
            u0 * v0 * w,
            u * v0 * w,
            u0 * v * w,
            u * v * w,
        ];
    }
}

impl CornerPoint<3> {
    /// Fill barycentric weights `(1 - u - v, u, v)`.
    ///
    /// Corners are left untouched.
    #[inline]
    pub fn set_weights(&mut self, u: f64, v: f64) {
        self.weights = [1.0 - u - v, u, v];
    }
}
