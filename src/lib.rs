//! Platform-agnostic driver for the Microchip MCP9808 digital temperature sensor,
//! built on the `embedded-hal` 1.0 I2C traits.
//!
//! The driver verifies the manufacturer and device ID on construction, so a
//! [`Mcp9808`] only exists for a bus that really has one. Every accessor is a
//! single 2-byte register transaction.
//!
//! Limits are written with 1/16 °C resolution. The device itself only keeps
//! 0.25 °C for TUPPER, TLOWER and TCRIT.

#![cfg_attr(not(test), no_std)]

pub mod mcp9808;
pub mod register;
pub mod temperature;

pub use crate::mcp9808::{Ambient, Error, Identity, Limit, Mcp9808};
pub use crate::register::{AlertFlags, Register, MAX_BUS_FREQUENCY_HZ, MCP9808_I2CADDR};
pub use crate::temperature::{decode, encode, Temperature};
