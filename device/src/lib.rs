#![macro_use]
#![cfg_attr(not(feature = "std"), no_std)]
//! Drogue BMP085 is a blocking, no-alloc driver for the Bosch BMP085/BMP180 digital
//! barometric pressure sensor, built on the [embedded-hal](https://docs.rs/embedded-hal) 1.0 traits.
//!
//! The driver turns the sensor's raw ADC counts into temperature (0.1 °C) and pressure (Pa)
//! using the factory calibration coefficients and the fixed-point compensation published in
//! the datasheet, and derives altitude from pressure with the international barometric formula.
//!
//! # Example
//!
//! ```ignore
//! use drogue_bmp085::drivers::sensors::bmp085::{Bmp085, Oversampling, SEA_LEVEL_PRESSURE};
//!
//! let mut sensor = Bmp085::new(i2c, delay);
//! sensor.begin()?;
//! sensor.set_sampling(Oversampling::High);
//!
//! let acquisition = sensor.read()?;
//! log::info!("{:?}", acquisition);
//!
//! let altitude = sensor.read_altitude(SEA_LEVEL_PRESSURE)?;
//! ```
//!
//! # Features
//!
//! * `std` (default): enables [`testutil`], a simulated sensor for host-side tests.
//! * `log` (default): log through the [log](https://docs.rs/log) facade.
//! * `defmt`: log through [defmt](https://docs.rs/defmt) and derive `defmt::Format` on public types.

pub(crate) mod fmt;

pub mod domain;

pub mod drivers;

pub mod traits;

#[cfg(feature = "std")]
pub mod testutil;

pub use drivers::sensors::bmp085::{Bmp085, Bmp085Error, Oversampling};
