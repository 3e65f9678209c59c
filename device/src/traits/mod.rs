//! Seams between sensor drivers and the code consuming their readings.

pub mod i2c;
pub mod sensors;
