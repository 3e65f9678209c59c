use super::ctrl_meas::Oversampling;
use super::{read_register, OUT};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

/// Uncompensated temperature (UT), 16 bits.
pub struct Tout;

impl Tout {
    pub fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<u16, I::Error> {
        let mut buf = [0; 2];
        read_register(address, i2c, OUT, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

/// Uncompensated pressure (UP), 16 to 19 bits depending on oversampling.
pub struct Pout;

impl Pout {
    pub fn read<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
        oversampling: Oversampling,
    ) -> Result<i32, I::Error> {
        let mut buf = [0; 3];
        read_register(address, i2c, OUT, &mut buf)?;
        Ok(Self::decode(buf, oversampling))
    }

    /// MSB, LSB and XLSB combined, then shifted down to the resolution of `oversampling`.
    pub fn decode(buf: [u8; 3], oversampling: Oversampling) -> i32 {
        let raw = i32::from_be_bytes([0, buf[0], buf[1], buf[2]]);
        raw >> oversampling.shift()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_resolution_tracks_oversampling() {
        let buf = [0x5D, 0x23, 0x80];
        assert_eq!(0x5D23, Pout::decode(buf, Oversampling::Low));
        assert_eq!(0xBA47, Pout::decode(buf, Oversampling::Standard));
        assert_eq!(0x1748E, Pout::decode(buf, Oversampling::High));
        assert_eq!(0x2E91C, Pout::decode(buf, Oversampling::UltraHigh));
    }

    #[test]
    fn full_scale_pressure_is_19_bits() {
        assert_eq!(0x7FFFF, Pout::decode([0xFF, 0xFF, 0xFF], Oversampling::UltraHigh));
        assert_eq!(0xFFFF, Pout::decode([0xFF, 0xFF, 0xFF], Oversampling::Low));
    }
}
