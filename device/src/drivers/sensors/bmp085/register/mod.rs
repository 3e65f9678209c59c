//! Register map and raw bus transactions of the BMP085/BMP180.

pub mod calibration;
pub mod chip_id;
pub mod ctrl_meas;
pub mod out;

use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::{I2c, Operation};

/// Start of the 22-byte calibration block (AC1 MSB).
pub const CALIBRATION: u8 = 0xAA;
pub const CALIBRATION_LEN: usize = 22;

pub const CHIP_ID: u8 = 0xD0;
pub const CHIP_ID_VALUE: u8 = 0x55;

/// Measurement control register, takes a conversion command.
pub const CTRL_MEAS: u8 = 0xF4;

/// Conversion result, MSB first. 2 bytes for temperature, 3 for pressure.
pub const OUT: u8 = 0xF6;

pub const CMD_TEMPERATURE: u8 = 0x2E;
pub const CMD_PRESSURE: u8 = 0x34;

/// Writes `data` to consecutive registers starting at `register`, in a single transaction.
///
/// Returns the number of data bytes written.
pub fn write_register<I: I2c>(
    address: I2cAddress,
    i2c: &mut I,
    register: u8,
    data: &[u8],
) -> Result<usize, I::Error> {
    i2c.transaction(
        address.into(),
        &mut [Operation::Write(&[register]), Operation::Write(data)],
    )?;
    Ok(data.len())
}

/// Selects `register` and reads `buf.len()` consecutive bytes from it.
///
/// Returns the number of bytes read.
pub fn read_register<I: I2c>(
    address: I2cAddress,
    i2c: &mut I,
    register: u8,
    buf: &mut [u8],
) -> Result<usize, I::Error> {
    i2c.write_read(address.into(), &[register], buf)?;
    Ok(buf.len())
}
