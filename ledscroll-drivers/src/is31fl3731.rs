//! IS31FL3731 LED matrix controller
//!
//! The IS31FL3731 drives up to 144 LEDs with 8-bit PWM each. Its register
//! space is split into banks selected through a command register:
//!
//! - banks 0-7: frames, each holding LED enable bits, blink bits and PWM
//! - bank 0x0B: function registers (mode, displayed frame, shutdown, ...)
//!
//! Two frames are used as a double buffer: one is displayed while the
//! other is written.

use ledscroll_hal::{I2cBus, I2cConfig};

/// Default I2C address (AD pin to GND)
pub const DEFAULT_ADDRESS: u8 = 0x74;

/// Fastest bus clock the controller accepts
///
/// Board code configures its I2C peripheral with this before handing the
/// bus to the driver.
pub const BUS_CONFIG: I2cConfig = I2cConfig::FAST;

/// Number of frame banks
pub const FRAME_COUNT: u8 = 8;

/// LEDs per frame
pub const LED_COUNT: usize = 144;

/// LED enable bytes per frame (one bit per LED)
pub const ENABLE_LEN: usize = LED_COUNT / 8;

/// Maximum data bytes per I2C transfer
const MAX_CHUNK: usize = 32;

/// Register addresses
pub mod reg {
    /// Command register selecting the active bank
    pub const BANK_SELECT: u8 = 0xFD;
    /// Function register bank
    pub const CONFIG_BANK: u8 = 0x0B;

    // Function registers
    /// Display mode
    pub const MODE: u8 = 0x00;
    /// Frame currently displayed in picture mode
    pub const FRAME: u8 = 0x01;
    /// Audio synchronization enable
    pub const AUDIOSYNC: u8 = 0x06;
    /// Software shutdown (0 = shutdown, 1 = normal operation)
    pub const SHUTDOWN: u8 = 0x0A;

    // Frame registers
    /// LED on/off control, 18 bytes
    pub const ENABLE_OFFSET: u8 = 0x00;
    /// Blink control, 18 bytes
    pub const BLINK_OFFSET: u8 = 0x12;
    /// PWM duty cycle, 144 bytes
    pub const COLOR_OFFSET: u8 = 0x24;
}

/// MODE register value for static picture display
pub const PICTURE_MODE: u8 = 0x00;

/// IS31FL3731 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// I2C transfer failed
    Bus(E),
    /// Frame index outside 0-7
    InvalidFrame(u8),
    /// Device used before `init`
    NotInitialized,
}

/// IS31FL3731 register-level driver
pub struct Is31fl3731<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> Is31fl3731<I2C> {
    /// Create a driver for the chip at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// I2C address of the chip
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Put the chip into or out of software shutdown
    pub fn set_shutdown(&mut self, shutdown: bool) -> Result<(), DriverError<I2C::Error>> {
        self.write_function(reg::SHUTDOWN, if shutdown { 0 } else { 1 })
    }

    /// Cycle through software shutdown
    pub fn reset(&mut self) -> Result<(), DriverError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("IS31FL3731 reset at {=u8:#x}", self.address);

        self.set_shutdown(true)?;
        self.set_shutdown(false)
    }

    /// Reset and configure for double-buffered picture mode
    ///
    /// `enable` selects which LEDs are driven. Frames 0 and 1 get the same
    /// enable mask and a blank PWM image; frame 0 is displayed.
    pub fn init(&mut self, enable: &[u8; ENABLE_LEN]) -> Result<(), DriverError<I2C::Error>> {
        self.reset()?;
        self.write_function(reg::MODE, PICTURE_MODE)?;
        self.write_function(reg::AUDIOSYNC, 0)?;

        for frame in 0..2 {
            self.write_enable(frame, enable)?;
            self.write_pwm(frame, &[0; LED_COUNT])?;
        }
        self.display_frame(0)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("IS31FL3731 at {=u8:#x} initialized", self.address);

        Ok(())
    }

    /// Write the LED enable mask of a frame
    pub fn write_enable(
        &mut self,
        frame: u8,
        enable: &[u8; ENABLE_LEN],
    ) -> Result<(), DriverError<I2C::Error>> {
        self.select_frame(frame)?;
        self.write_block(reg::ENABLE_OFFSET, enable)
    }

    /// Write the 144 PWM values of a frame
    pub fn write_pwm(
        &mut self,
        frame: u8,
        pwm: &[u8; LED_COUNT],
    ) -> Result<(), DriverError<I2C::Error>> {
        self.select_frame(frame)?;
        self.write_block(reg::COLOR_OFFSET, pwm)
    }

    /// Show a frame
    pub fn display_frame(&mut self, frame: u8) -> Result<(), DriverError<I2C::Error>> {
        if frame >= FRAME_COUNT {
            return Err(DriverError::InvalidFrame(frame));
        }
        self.write_function(reg::FRAME, frame)
    }

    /// Read back the frame being displayed
    pub fn displayed_frame(&mut self) -> Result<u8, DriverError<I2C::Error>> {
        self.select_bank(reg::CONFIG_BANK)?;
        self.i2c
            .read_register(self.address, reg::FRAME)
            .map_err(DriverError::Bus)
    }

    fn select_frame(&mut self, frame: u8) -> Result<(), DriverError<I2C::Error>> {
        if frame >= FRAME_COUNT {
            return Err(DriverError::InvalidFrame(frame));
        }
        self.select_bank(frame)
    }

    fn select_bank(&mut self, bank: u8) -> Result<(), DriverError<I2C::Error>> {
        self.i2c
            .write_register(self.address, reg::BANK_SELECT, bank)
            .map_err(DriverError::Bus)
    }

    fn write_function(&mut self, register: u8, value: u8) -> Result<(), DriverError<I2C::Error>> {
        self.select_bank(reg::CONFIG_BANK)?;
        self.i2c
            .write_register(self.address, register, value)
            .map_err(DriverError::Bus)
    }

    /// Write consecutive registers of the selected bank in bus-sized chunks
    fn write_block(&mut self, start: u8, data: &[u8]) -> Result<(), DriverError<I2C::Error>> {
        let mut buf = [0u8; MAX_CHUNK + 1];
        for (i, chunk) in data.chunks(MAX_CHUNK).enumerate() {
            buf[0] = start + (i * MAX_CHUNK) as u8;
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &buf[..=chunk.len()])
                .map_err(DriverError::Bus)?;
        }
        Ok(())
    }
}
