use super::{read_register, CHIP_ID};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

pub struct ChipId;

impl ChipId {
    pub fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<u8, I::Error> {
        let mut buf = [0; 1];
        read_register(address, i2c, CHIP_ID, &mut buf)?;
        Ok(buf[0])
    }
}
