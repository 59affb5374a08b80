//! Auto-growing pixel buffer
//!
//! The buffer is the virtual drawing surface. It starts empty and grows
//! whenever a write lands outside the current extents:
//!
//! - growth is append-only (right and down), never toward negative
//!   coordinates
//! - newly exposed cells are zero
//! - existing values keep their coordinates
//! - the buffer never shrinks on its own, only through [`PixelBuffer::resize`]

use alloc::vec;
use alloc::vec::Vec;

use crate::error::BufferError;

/// Largest number of cells a buffer may hold
///
/// Writes or resizes past this fail with [`BufferError::TooLarge`] instead
/// of overflowing `width * height` on 32-bit targets.
pub const MAX_CELLS: usize = 1 << 20;

/// Row-major grid of brightness values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// `width * height` cells, row by row
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create an empty (0x0) buffer
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Create a zeroed buffer with the given extents
    pub fn with_size(width: usize, height: usize) -> Result<Self, BufferError> {
        let cells = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; cells],
        })
    }

    /// Current width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the buffer has no cells at all
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read a cell
    ///
    /// Anything outside the buffer, negative coordinates included, reads
    /// as 0 ("not drawn yet").
    pub fn get(&self, x: i32, y: i32) -> u8 {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.cell(x, y),
            _ => 0,
        }
    }

    /// Write a cell, growing the buffer to cover it
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> Result<(), BufferError> {
        let (ux, uy) = Self::checked(x, y)?;
        self.grow_to(ux + 1, uy + 1)?;
        let idx = uy * self.width + ux;
        self.pixels[idx] = value;
        Ok(())
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`
    ///
    /// An empty or inverted rectangle writes nothing and does not grow
    /// the buffer. All four corners must be non-negative.
    pub fn fill(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        value: u8,
    ) -> Result<(), BufferError> {
        let (x0, y0) = Self::checked(x0, y0)?;
        let (x1, y1) = Self::checked(x1, y1)?;
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        self.grow_to(x1, y1)?;
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(value);
        }
        Ok(())
    }

    /// Zero every cell, keeping the current extents
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Resize to exactly `width x height`
    ///
    /// Values inside both the old and new extents are kept; new cells are
    /// zero. This is the only operation that can shrink the buffer.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), BufferError> {
        let cells = Self::cell_count(width, height)?;
        if width == self.width {
            // Row layout is unchanged, rows are only appended or dropped
            self.pixels.resize(cells, 0);
        } else {
            let mut pixels = vec![0; cells];
            let keep_w = width.min(self.width);
            for y in 0..height.min(self.height) {
                let src = y * self.width;
                let dst = y * width;
                pixels[dst..dst + keep_w].copy_from_slice(&self.pixels[src..src + keep_w]);
            }
            self.pixels = pixels;
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Read a cell by unsigned coordinates (0 outside the buffer)
    pub(crate) fn cell(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    /// Grow (never shrink) so that the buffer is at least `width x height`
    fn grow_to(&mut self, width: usize, height: usize) -> Result<(), BufferError> {
        if width <= self.width && height <= self.height {
            return Ok(());
        }

        let width = width.max(self.width);
        let height = height.max(self.height);

        #[cfg(feature = "defmt")]
        defmt::trace!("pixel buffer grown to {}x{}", width, height);

        self.resize(width, height)
    }

    fn cell_count(width: usize, height: usize) -> Result<usize, BufferError> {
        width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(BufferError::TooLarge { width, height })
    }

    fn checked(x: i32, y: i32) -> Result<(usize, usize), BufferError> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(ux), Ok(uy)) => Ok((ux, uy)),
            _ => Err(BufferError::InvalidCoordinate { x, y }),
        }
    }
}
