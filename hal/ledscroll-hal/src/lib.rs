//! Ledscroll Hardware Abstraction Layer
//!
//! This crate defines the bus traits that display drivers are written
//! against. A driver only needs an [`I2cBus`]; any chip HAL that exposes
//! an `embedded-hal` 1.0 I2C master can be plugged in through [`HalI2c`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledscroll-core (Display, PixelBuffer)  │
//! └─────────────────────────────────────────┘
//!                     │ Device
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledscroll-drivers (IS31FL3731, ...)    │
//! └─────────────────────────────────────────┘
//!                     │ I2cBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledscroll-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{HalI2c, I2cBus, I2cConfig};
