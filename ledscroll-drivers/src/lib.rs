//! LED matrix device drivers
//!
//! This crate provides concrete implementations of the
//! [`Device`](ledscroll_core::Device) trait defined in ledscroll-core:
//!
//! - IS31FL3731 charlieplexed matrix controller (register level)
//! - Pimoroni Scroll pHAT HD, a 17x7 panel built on the IS31FL3731

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod is31fl3731;
pub mod scrollphathd;

#[cfg(test)]
mod mock;

pub use is31fl3731::{DriverError, Is31fl3731};
pub use scrollphathd::{Rotation, ScrollPhatHd, ScrollPhatHdConfig};
