//! Boundary wrap policies for grid indices.

/// How a grid axis maps an out-of-range index back into `[0, extent)`.
///
/// Every policy is a total function of the index: any `i64`, including
/// large negatives, resolves to a valid index for `extent >= 1`.
///
/// # Examples
///
/// ```
/// use weft_core::WrapMode;
///
/// assert_eq!(WrapMode::Clamp.apply(-3, 4), 0);
/// assert_eq!(WrapMode::Repeat.apply(-1, 4), 3);
/// assert_eq!(WrapMode::Mirror.apply(4, 4), 3);
/// assert_eq!(WrapMode::Mirror.apply(-1, 4), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Out-of-range indices stick to the nearest edge cell.
    #[default]
    Clamp,
    /// Indices wrap to the opposite edge (periodic, period `extent`).
    Repeat,
    /// Indices reflect back across the edge (period `2 * extent`).
    Mirror,
}

impl WrapMode {
    /// Map `index` into `[0, extent)` under this policy.
    #[inline]
    pub fn apply(self, index: i64, extent: usize) -> usize {
        match self {
            Self::Clamp => clamp(index, extent),
            Self::Repeat => repeat(index, extent),
            Self::Mirror => mirror(index, extent),
        }
    }

    /// Offsets (in axis steps) from the first and last cell to the cell
    /// standing in for their missing outer neighbour.
    ///
    /// Returns `(low, high)`: the neighbour "before" cell `0` is
    /// `0 + low`, the neighbour "after" cell `extent - 1` is
    /// `extent - 1 + high`. Clamp and Mirror both reuse the edge cell
    /// (zero gradient); Repeat jumps to the opposite edge.
    pub fn boundary_offsets(self, extent: usize) -> (isize, isize) {
        match self {
            Self::Clamp | Self::Mirror => (0, 0),
            Self::Repeat => {
                let n = extent as isize - 1;
                (n, -n)
            }
        }
    }
}

/// Clamp `index` to `[0, extent - 1]`.
#[inline]
pub fn clamp(index: i64, extent: usize) -> usize {
    debug_assert!(extent > 0, "wrap extent must be at least 1");
    if index < 0 {
        0
    } else if index as u64 >= extent as u64 {
        extent - 1
    } else {
        index as usize
    }
}

/// True (floored) modulo of `index` by `extent`.
#[inline]
pub fn repeat(index: i64, extent: usize) -> usize {
    debug_assert!(extent > 0, "wrap extent must be at least 1");
    index.rem_euclid(extent as i64) as usize
}

/// Reflect `index` into `[0, extent)` with period `2 * extent`.
///
/// The edge cell is repeated at the reflection: `-1 -> 0`, `extent -> extent - 1`.
#[inline]
pub fn mirror(index: i64, extent: usize) -> usize {
    debug_assert!(extent > 0, "wrap extent must be at least 1");
    let n = extent as i64;
    let j = index.rem_euclid(2 * n);
    if j < n {
        j as usize
    } else {
        (2 * n - j - 1) as usize
    }
}
