//! Host-side test doubles: a simulated BMP085 on an I2C bus and a recording delay.

use crate::drivers::sensors::bmp085::register::{
    CALIBRATION, CALIBRATION_LEN, CHIP_ID, CHIP_ID_VALUE, CMD_PRESSURE, CMD_TEMPERATURE,
    CTRL_MEAS, OUT,
};
use crate::drivers::sensors::bmp085::ADDR;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::collections::VecDeque;
use std::vec::Vec;

/// Calibration block of the datasheet's worked example, as stored in EEPROM.
pub const DATASHEET_CALIBRATION: [u8; CALIBRATION_LEN] = [
    0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E, 0x00,
    0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
];

/// Raw temperature of the datasheet's worked example (15.0 °C).
pub const DATASHEET_UT: u16 = 27898;

/// Raw pressure of the datasheet's worked example at OSS 0 (69964 Pa).
pub const DATASHEET_UP: u32 = 23843;

/// A BMP085 register file behind an `embedded-hal` I2C bus.
///
/// Writing a conversion command to the control register loads the configured
/// raw reading into the data registers the way the sensor presents it.
pub struct TestI2c {
    address: u8,
    registers: [u8; 256],
    pointer: u8,
    ut: u16,
    queued_ut: VecDeque<u16>,
    up: u32,
    commands: Vec<u8>,
    transactions: usize,
}

impl TestI2c {
    pub fn new(calibration: [u8; CALIBRATION_LEN]) -> Self {
        let mut registers = [0; 256];
        let start = CALIBRATION as usize;
        registers[start..start + CALIBRATION_LEN].copy_from_slice(&calibration);
        registers[CHIP_ID as usize] = CHIP_ID_VALUE;
        Self {
            address: ADDR,
            registers,
            pointer: 0,
            ut: 0,
            queued_ut: VecDeque::new(),
            up: 0,
            commands: Vec::new(),
            transactions: 0,
        }
    }

    /// Sensor preloaded with the datasheet's calibration and raw readings.
    pub fn datasheet() -> Self {
        let mut i2c = Self::new(DATASHEET_CALIBRATION);
        i2c.set_temperature(DATASHEET_UT);
        i2c.set_pressure(DATASHEET_UP);
        i2c
    }

    /// A bus with nothing listening on the sensor's address.
    pub fn absent() -> Self {
        let mut i2c = Self::new([0; CALIBRATION_LEN]);
        i2c.address = 0;
        i2c
    }

    /// Raw count every temperature conversion produces.
    pub fn set_temperature(&mut self, ut: u16) {
        self.ut = ut;
    }

    /// Raw count for one upcoming temperature conversion. Queued counts are
    /// used in order before falling back to the one from `set_temperature`.
    pub fn queue_temperature(&mut self, ut: u16) {
        self.queued_ut.push_back(ut);
    }

    /// Raw count every pressure conversion produces, at OSS 0 resolution.
    /// Higher oversampling settings report it with correspondingly more bits.
    pub fn set_pressure(&mut self, up: u32) {
        self.up = up;
    }

    /// Every byte written to the control register, in order.
    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    pub fn transactions(&self) -> usize {
        self.transactions
    }

    fn store(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
        if register == CTRL_MEAS {
            self.commands.push(value);
            self.convert(value);
        }
    }

    fn convert(&mut self, command: u8) {
        let out = OUT as usize;
        if command == CMD_TEMPERATURE {
            let ut = self.queued_ut.pop_front().unwrap_or(self.ut);
            self.registers[out..out + 2].copy_from_slice(&ut.to_be_bytes());
        } else if command & 0x3F == CMD_PRESSURE {
            let oss = command >> 6;
            // OSS n adds n low bits; the result is left-aligned in MSB/LSB/XLSB.
            let raw = (self.up << oss) << (8 - oss);
            self.registers[out..out + 3].copy_from_slice(&raw.to_be_bytes()[1..]);
        }
    }
}

impl ErrorType for TestI2c {
    type Error = ErrorKind;
}

impl I2c for TestI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut addressed = false;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if addressed {
                            self.store(self.pointer, byte);
                            self.pointer = self.pointer.wrapping_add(1);
                        } else {
                            self.pointer = byte;
                            addressed = true;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay provider that returns immediately and remembers what was asked of it.
#[derive(Default)]
pub struct TestDelay {
    delays_ms: Vec<u32>,
    elapsed_ns: u64,
}

impl TestDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `delay_ms` request, in order.
    pub fn delays_ms(&self) -> &[u32] {
        &self.delays_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for TestDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.elapsed_ns += ms as u64 * 1_000_000;
    }
}
