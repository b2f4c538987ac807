//! Raster pixel buffers and grid field import/export.
//!
//! Rows are stored top to bottom in memory and map to grid `y` in the same
//! order: pixel `(x, y)` is node `(x, y)` of a 2D field, or of layer `z` of
//! a 3D field. No interpolation takes place; a raster must match the grid's
//! counts exactly.

use tracing::debug;
use weft_core::error::check_len;
use weft_core::{FieldError, FieldValue};
use weft_grid::{GridField2d, GridField3d};

/// An 8-bit-per-channel RGB or RGBA pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    data: Vec<u8>,
}

impl Raster {
    /// A zeroed raster.
    ///
    /// Returns `Err(FieldError::UnsupportedFormat)` unless
    /// `bytes_per_pixel` is 3 or 4.
    pub fn new(width: usize, height: usize, bytes_per_pixel: usize) -> Result<Self, FieldError> {
        check_depth(bytes_per_pixel)?;
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data: vec![0; width * height * bytes_per_pixel],
        })
    }

    /// Wrap decoded pixel bytes.
    ///
    /// `data.len()` must equal `width * height * bytes_per_pixel`.
    pub fn from_bytes(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self, FieldError> {
        check_depth(bytes_per_pixel)?;
        check_len(width * height * bytes_per_pixel, data.len())?;
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// 3 (RGB) or 4 (RGBA).
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Raw bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of pixel `(x, y)`; alpha is 255 for RGB rasters.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let at = self.offset(x, y);
        let px = &self.data[at..at + self.bytes_per_pixel];
        match *px {
            [r, g, b] => [r, g, b, 255],
            [r, g, b, a] => [r, g, b, a],
            _ => unreachable!("depth validated at construction"),
        }
    }

    /// Overwrite pixel `(x, y)`. RGB rasters drop the alpha channel.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let at = self.offset(x, y);
        let bpp = self.bytes_per_pixel;
        self.data[at..at + bpp].copy_from_slice(&rgba[..bpp]);
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        (x + y * self.width) * self.bytes_per_pixel
    }
}

fn check_depth(bytes_per_pixel: usize) -> Result<(), FieldError> {
    if (3..=4).contains(&bytes_per_pixel) {
        Ok(())
    } else {
        Err(FieldError::UnsupportedFormat {
            reason: format!("{bytes_per_pixel} bytes per pixel; expected 3 (RGB) or 4 (RGBA)"),
        })
    }
}

fn check_dims(raster: &Raster, width: usize, height: usize) -> Result<(), FieldError> {
    check_len(width, raster.width())?;
    check_len(height, raster.height())
}

/// Fill `field` from `raster`, mapping each pixel through `map`.
pub fn import_2d<T: FieldValue>(
    field: &mut GridField2d<T>,
    raster: &Raster,
    map: impl Fn([u8; 4]) -> T,
) -> Result<(), FieldError> {
    let grid = *field.grid();
    check_dims(raster, grid.count_x(), grid.count_y())?;
    for (i, v) in field.values_mut().iter_mut().enumerate() {
        let (x, y) = grid.indices_of(i);
        *v = map(raster.pixel(x, y));
    }
    debug!(
        width = raster.width(),
        height = raster.height(),
        "raster imported"
    );
    Ok(())
}

/// Render `field` into a new raster, mapping each value through `map`.
pub fn export_2d<T: FieldValue>(
    field: &GridField2d<T>,
    bytes_per_pixel: usize,
    map: impl Fn(T) -> [u8; 4],
) -> Result<Raster, FieldError> {
    let grid = field.grid();
    let mut raster = Raster::new(grid.count_x(), grid.count_y(), bytes_per_pixel)?;
    for (i, &v) in field.values().iter().enumerate() {
        let (x, y) = grid.indices_of(i);
        raster.set_pixel(x, y, map(v));
    }
    debug!(
        width = raster.width(),
        height = raster.height(),
        "raster exported"
    );
    Ok(raster)
}

/// Fill `field` from a stack of rasters, one per z layer.
pub fn import_3d<T: FieldValue>(
    field: &mut GridField3d<T>,
    layers: &[Raster],
    map: impl Fn([u8; 4]) -> T,
) -> Result<(), FieldError> {
    let grid = *field.grid();
    check_len(grid.count_z(), layers.len())?;
    for layer in layers {
        check_dims(layer, grid.count_x(), grid.count_y())?;
    }
    for (i, v) in field.values_mut().iter_mut().enumerate() {
        let (x, y, z) = grid.indices_of(i);
        *v = map(layers[z].pixel(x, y));
    }
    debug!(layers = layers.len(), "raster stack imported");
    Ok(())
}

/// Render `field` into one raster per z layer.
pub fn export_3d<T: FieldValue>(
    field: &GridField3d<T>,
    bytes_per_pixel: usize,
    map: impl Fn(T) -> [u8; 4],
) -> Result<Vec<Raster>, FieldError> {
    let grid = field.grid();
    let mut layers = (0..grid.count_z())
        .map(|_| Raster::new(grid.count_x(), grid.count_y(), bytes_per_pixel))
        .collect::<Result<Vec<_>, _>>()?;
    for (i, &v) in field.values().iter().enumerate() {
        let (x, y, z) = grid.indices_of(i);
        layers[z].set_pixel(x, y, map(v));
    }
    debug!(layers = layers.len(), "raster stack exported");
    Ok(layers)
}
