//! Pimoroni Scroll pHAT HD
//!
//! A 17x7 single-colour LED panel driven by one IS31FL3731. The panel
//! implements [`Device`], so it can be handed straight to a
//! [`Display`](ledscroll_core::Display):
//!
//! ```ignore
//! // Clock the I2C peripheral at `is31fl3731::BUS_CONFIG.frequency`
//! let mut panel = ScrollPhatHd::new(i2c, ScrollPhatHdConfig::default());
//! panel.init()?;
//! let mut display = Display::new(panel);
//! ```

use ledscroll_core::{Device, Frame};
use ledscroll_hal::I2cBus;

use crate::is31fl3731::{DriverError, Is31fl3731, DEFAULT_ADDRESS, ENABLE_LEN, LED_COUNT};

/// Panel width in LEDs (unrotated)
pub const WIDTH: usize = 17;

/// Panel height in LEDs (unrotated)
pub const HEIGHT: usize = 7;

/// Clockwise rotation of the image on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// True for quarter turns, which make the panel 7 wide and 17 tall
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Map a coordinate of the rotated image onto the physical panel
    pub fn to_panel(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Self::Deg0 => (x, y),
            Self::Deg90 => (y, HEIGHT - 1 - x),
            Self::Deg180 => (WIDTH - 1 - x, HEIGHT - 1 - y),
            Self::Deg270 => (WIDTH - 1 - y, x),
        }
    }
}

/// Scroll pHAT HD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollPhatHdConfig {
    /// I2C address of the IS31FL3731
    pub address: u8,
    /// Image rotation
    pub rotation: Rotation,
    /// Global brightness (255 = values passed through unchanged)
    pub brightness: u8,
}

impl Default for ScrollPhatHdConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            rotation: Rotation::Deg0,
            brightness: 255,
        }
    }
}

/// IS31FL3731 LED index of physical panel pixel `(x, y)`
///
/// The board wires the left nine columns and the right eight columns to
/// the two charlieplex matrices in opposite directions, with row 0 at the
/// bottom of the matrix.
pub fn led_index(x: usize, y: usize) -> usize {
    let x = x as i32;
    let y = (HEIGHT - 1 - y) as i32;
    let (col, row) = if x > 8 { (x - 8, 6 - (y + 8)) } else { (8 - x, y) };
    (col * 16 + row) as usize
}

/// Logical `(width, height)` of the panel under a rotation
fn dimensions(rotation: Rotation) -> (usize, usize) {
    if rotation.swaps_axes() {
        (HEIGHT, WIDTH)
    } else {
        (WIDTH, HEIGHT)
    }
}

/// Enable mask covering exactly the LEDs fitted on the board
pub fn enable_mask() -> [u8; ENABLE_LEN] {
    let mut mask = [0u8; ENABLE_LEN];
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let idx = led_index(x, y);
            mask[idx / 8] |= 1 << (idx % 8);
        }
    }
    mask
}

/// Scroll pHAT HD panel
pub struct ScrollPhatHd<I2C> {
    chip: Is31fl3731<I2C>,
    rotation: Rotation,
    brightness: u8,
    staged: Frame,
    /// Frame bank written by the next `show`
    back: u8,
    initialized: bool,
}

impl<I2C: I2cBus> ScrollPhatHd<I2C> {
    /// Create a panel driver; call [`ScrollPhatHd::init`] before use
    pub fn new(i2c: I2C, config: ScrollPhatHdConfig) -> Self {
        let (width, height) = dimensions(config.rotation);
        Self {
            chip: Is31fl3731::new(i2c, config.address),
            rotation: config.rotation,
            brightness: config.brightness,
            staged: Frame::new(width, height),
            back: 1,
            initialized: false,
        }
    }

    /// Reset the controller and blank the panel
    pub fn init(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.chip.init(&enable_mask())?;
        self.back = 1;
        self.initialized = true;
        Ok(())
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the rotation; the staged frame is blanked
    pub fn set_rotation(&mut self, rotation: Rotation) {
        let (width, height) = dimensions(rotation);
        self.rotation = rotation;
        self.staged = Frame::new(width, height);
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// PWM image for the staged frame
    pub fn pwm_image(&self) -> [u8; LED_COUNT] {
        let mut image = [0u8; LED_COUNT];
        for y in 0..self.height() {
            for x in 0..self.width() {
                let (px, py) = self.rotation.to_panel(x, y);
                image[led_index(px, py)] = self.scale(self.staged.get(x, y));
            }
        }
        image
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.chip.release()
    }

    fn scale(&self, value: u8) -> u8 {
        (value as u16 * self.brightness as u16 / 255) as u8
    }
}

impl<I2C: I2cBus> Device for ScrollPhatHd<I2C> {
    type Error = DriverError<I2C::Error>;

    fn width(&self) -> usize {
        dimensions(self.rotation).0
    }

    fn height(&self) -> usize {
        dimensions(self.rotation).1
    }

    fn set_buffer(&mut self, frame: Frame) {
        self.staged = frame;
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.staged.clear();
        self.show()
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        if !self.initialized {
            return Err(DriverError::NotInitialized);
        }

        let image = self.pwm_image();
        self.chip.write_pwm(self.back, &image)?;
        self.chip.display_frame(self.back)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Scroll pHAT HD showing frame {}", self.back);

        self.back ^= 1;
        Ok(())
    }
}
