//! Rendered output grid
//!
//! A [`Frame`] is what a [`Display`](crate::Display) hands to its
//! [`Device`](crate::Device): exactly one value per physical LED, row-major,
//! `frame.get(x, y)` being column `x` of row `y`.

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-size row-major grid of brightness values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create an all-zero frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Build a frame from equal-length rows
    pub fn from_rows<const W: usize>(rows: &[[u8; W]]) -> Self {
        Self {
            width: W,
            height: rows.len(),
            pixels: rows.iter().flatten().copied().collect(),
        }
    }

    /// Frame width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a value (0 outside the frame)
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    /// Write a value; writes outside the frame are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// One row of the frame (empty past the last row)
    pub fn row(&self, y: usize) -> &[u8] {
        if y < self.height {
            &self.pixels[y * self.width..(y + 1) * self.width]
        } else {
            &[]
        }
    }

    /// Iterate over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// All values, row-major
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Set every value to zero
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}
