//! Board-agnostic display buffer for small LED matrices
//!
//! This crate contains the drawing and geometry logic that does not depend
//! on a specific panel or bus:
//!
//! - [`PixelBuffer`] - auto-growing grid of brightness values
//! - [`Display`] - drawing API plus scroll, tiling and flip mapping onto a
//!   fixed-size physical panel
//! - [`Device`] - the capability a concrete panel driver implements
//! - [`Frame`] - the finished grid handed to a [`Device`]
//! - [`DisplayConfig`] - construction-time options
//!
//! # Example
//!
//! ```ignore
//! let mut display = Display::new(device);
//! display.set_pixel(0, 0, 1)?;
//! display.scroll_to(7, 0);
//! display.show()?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod buffer;
pub mod config;
pub mod device;
pub mod display;
pub mod error;
pub mod frame;

pub use buffer::PixelBuffer;
pub use config::{ConfigError, DisplayConfig};
pub use device::Device;
pub use display::Display;
pub use error::BufferError;
pub use frame::Frame;
