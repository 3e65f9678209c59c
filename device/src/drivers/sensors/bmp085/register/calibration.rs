use super::ctrl_meas::Oversampling;
use super::{read_register, CALIBRATION, CALIBRATION_LEN};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

/// Factory calibration coefficients, stored in EEPROM at 0xAA..=0xBF as
/// big-endian 16-bit words.
///
/// `mb` is read but not used by the compensation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

/// Result of the temperature compensation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedTemperature {
    /// Temperature in 0.1 °C.
    pub deci_celsius: i32,
    /// Intermediate term (B5) the pressure compensation of the same cycle depends on.
    pub b5: i32,
}

impl Calibration {
    pub fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<Calibration, I::Error> {
        let mut buf = [0; CALIBRATION_LEN];
        read_register(address, i2c, CALIBRATION, &mut buf)?;
        Ok(buf.into())
    }

    /// Compensates an uncompensated temperature reading.
    ///
    /// Returns `None` when the coefficients make the correction divide by zero.
    pub fn calibrated_temperature(&self, ut: i32) -> Option<CompensatedTemperature> {
        let x1 = (ut - self.ac6 as i32).wrapping_mul(self.ac5 as i32) >> 15;
        let x2 = ((self.mc as i32) << 11).checked_div(x1 + self.md as i32)?;
        let b5 = x1 + x2;
        Some(CompensatedTemperature {
            deci_celsius: (b5 + 8) >> 4,
            b5,
        })
    }

    /// Compensates an uncompensated pressure reading taken with `oversampling`,
    /// using the `b5` of the temperature compensation from the same cycle.
    ///
    /// Returns pressure in Pa, or `None` when the coefficients make the
    /// correction divide by zero.
    pub fn calibrated_pressure(&self, up: i32, b5: i32, oversampling: Oversampling) -> Option<i32> {
        // 32-bit two's complement throughout, as in the datasheet algorithm.
        let oss = oversampling.oss();

        let b6 = b5.wrapping_sub(4000);
        let b6_sq = b6.wrapping_mul(b6) >> 12;

        let x1 = (self.b2 as i32).wrapping_mul(b6_sq) >> 11;
        let x2 = (self.ac2 as i32).wrapping_mul(b6) >> 11;
        let x3 = x1.wrapping_add(x2);
        let b3 = ((((self.ac1 as i32) * 4).wrapping_add(x3) << oss).wrapping_add(2)) >> 2;

        let x1 = (self.ac3 as i32).wrapping_mul(b6) >> 13;
        let x2 = (self.b1 as i32).wrapping_mul(b6_sq) >> 16;
        let x3 = (x1.wrapping_add(x2) + 2) >> 2;
        let b4 = (self.ac4 as u32).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;

        let b7 = (up.wrapping_sub(b3) as u32).wrapping_mul(50000 >> oss);
        // b7 << 1 would overflow 32 bits, divide first.
        let p: u32 = if b7 < 0x8000_0000 {
            (b7 << 1).checked_div(b4)?
        } else {
            b7.checked_div(b4)? << 1
        };
        let p = p as i32;

        let x1 = (p >> 8).wrapping_mul(p >> 8);
        let x1 = x1.wrapping_mul(3038) >> 16;
        let x2 = p.wrapping_mul(-7357) >> 16;
        Some(p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4))
    }
}

impl From<[u8; CALIBRATION_LEN]> for Calibration {
    fn from(buf: [u8; CALIBRATION_LEN]) -> Calibration {
        let signed = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        let unsigned = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);

        Calibration {
            ac1: signed(0),
            ac2: signed(2),
            ac3: signed(4),
            ac4: unsigned(6),
            ac5: unsigned(8),
            ac6: unsigned(10),
            b1: signed(12),
            b2: signed(14),
            mb: signed(16),
            mc: signed(18),
            md: signed(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the BMP085 datasheet.
    const DATASHEET: Calibration = Calibration {
        ac1: 408,
        ac2: -72,
        ac3: -14383,
        ac4: 32741,
        ac5: 32757,
        ac6: 23153,
        b1: 6190,
        b2: 4,
        mb: -32768,
        mc: -8711,
        md: 2868,
    };

    #[test]
    fn unpack_big_endian_block() {
        let block: [u8; CALIBRATION_LEN] = [
            0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E,
            0x00, 0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
        ];
        assert_eq!(DATASHEET, Calibration::from(block));
    }

    #[test]
    fn unsigned_coefficients_above_i16_range() {
        let mut block = [0u8; CALIBRATION_LEN];
        block[6] = 0x80;
        block[7] = 0x01;
        let calibration = Calibration::from(block);
        assert_eq!(32769, calibration.ac4);
        assert_eq!(0, calibration.ac1);
    }

    #[test]
    fn datasheet_temperature() {
        let t = DATASHEET.calibrated_temperature(27898).unwrap();
        assert_eq!(150, t.deci_celsius);
        assert_eq!(2400, t.b5);
    }

    #[test]
    fn datasheet_pressure() {
        let t = DATASHEET.calibrated_temperature(27898).unwrap();
        let p = DATASHEET
            .calibrated_pressure(23843, t.b5, Oversampling::Low)
            .unwrap();
        assert_eq!(69964, p);
    }

    #[test]
    fn pressure_at_ultra_high_resolution() {
        let t = DATASHEET.calibrated_temperature(27898).unwrap();
        // Same physical pressure, 3 extra bits of resolution.
        let p = DATASHEET
            .calibrated_pressure(23843 << 3, t.b5, Oversampling::UltraHigh)
            .unwrap();
        assert!((69950..=69980).contains(&p), "pressure {}", p);
    }

    #[test]
    fn pressure_depends_on_b5() {
        let warm = DATASHEET.calibrated_pressure(23843, 2400, Oversampling::Low);
        let cold = DATASHEET.calibrated_pressure(23843, 0, Oversampling::Low);
        assert_ne!(warm, cold);
    }

    #[test]
    fn b7_division_branch_boundary() {
        // b3 is 422 and b4 is 33457 for the datasheet coefficients at b5 = 2400,
        // so (up - b3) * 50000 crosses 0x80000000 between these two counts.
        let below = DATASHEET
            .calibrated_pressure(422 + 42949, 2400, Oversampling::Low)
            .unwrap();
        let above = DATASHEET
            .calibrated_pressure(422 + 42950, 2400, Oversampling::Low)
            .unwrap();
        assert!(below > 100_000, "below {}", below);
        assert!(above > below, "below {} above {}", below, above);
        assert!(above - below <= 4, "below {} above {}", below, above);
    }

    #[test]
    fn zero_calibration_is_rejected() {
        let zero = Calibration::default();
        assert_eq!(None, zero.calibrated_temperature(27898));
        assert_eq!(None, zero.calibrated_pressure(23843, 2400, Oversampling::Low));
    }
}
