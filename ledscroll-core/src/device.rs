//! Physical panel capability
//!
//! The [`Display`](crate::Display) never talks to a bus itself. It renders
//! a [`Frame`] and hands it to something implementing [`Device`], which
//! owns transport, initialization and brightness registers.

use crate::frame::Frame;

/// A fixed-size LED panel
///
/// Within a render cycle [`Device::set_buffer`] is always called before
/// [`Device::show`].
pub trait Device {
    /// Transport error (bus failure, NACK, ...)
    type Error;

    /// Physical width in LEDs
    fn width(&self) -> usize;

    /// Physical height in LEDs
    fn height(&self) -> usize;

    /// Stage a frame of `width() x height()` values for the next `show`
    fn set_buffer(&mut self, frame: Frame);

    /// Set the global brightness scalar
    fn set_brightness(&mut self, brightness: u8);

    /// Blank the panel immediately
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Push the staged frame to the panel
    fn show(&mut self) -> Result<(), Self::Error>;
}

impl<T: Device + ?Sized> Device for &mut T {
    type Error = T::Error;

    fn width(&self) -> usize {
        T::width(self)
    }

    fn height(&self) -> usize {
        T::height(self)
    }

    fn set_buffer(&mut self, frame: Frame) {
        T::set_buffer(self, frame)
    }

    fn set_brightness(&mut self, brightness: u8) {
        T::set_brightness(self, brightness)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        T::clear(self)
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        T::show(self)
    }
}
