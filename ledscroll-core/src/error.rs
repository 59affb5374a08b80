//! Drawing errors

use core::fmt;

/// Errors raised by writes into the pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// A write targeted a negative coordinate
    ///
    /// The buffer only grows toward positive coordinates, so there is no
    /// cell to store the value in.
    InvalidCoordinate { x: i32, y: i32 },
    /// Growing to cover a write would exceed
    /// [`MAX_CELLS`](crate::buffer::MAX_CELLS)
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { x, y } => {
                write!(f, "invalid coordinate ({}, {})", x, y)
            }
            Self::TooLarge { width, height } => {
                write!(f, "buffer of {}x{} cells is too large", width, height)
            }
        }
    }
}
