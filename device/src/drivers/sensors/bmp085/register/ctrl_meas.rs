use super::{write_register, CMD_PRESSURE, CMD_TEMPERATURE, CTRL_MEAS};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

/// Temperature conversion time, rounded up from the datasheet's 4.5 ms.
pub const TEMPERATURE_CONVERSION_MS: u32 = 5;

/// Pressure oversampling setting (OSS).
///
/// Each step doubles the number of internal samples, adding one bit of
/// resolution at the cost of a longer conversion.
///
/// | Variant     | OSS | Samples | Conversion | Result bits |
/// |-------------|-----|---------|------------|-------------|
/// | `Low`       | 0   | 1       | 5 ms       | 16          |
/// | `Standard`  | 1   | 2       | 8 ms       | 17          |
/// | `High`      | 2   | 4       | 14 ms      | 18          |
/// | `UltraHigh` | 3   | 8       | 26 ms      | 19          |
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Oversampling {
    #[default]
    Low = 0,
    Standard = 1,
    High = 2,
    UltraHigh = 3,
}

struct Timing {
    conversion_ms: u32,
    shift: u8,
}

// Indexed by OSS: delay is 2 + (3 << oss), shift is 8 - oss.
const TIMINGS: [Timing; 4] = [
    Timing {
        conversion_ms: 5,
        shift: 8,
    },
    Timing {
        conversion_ms: 8,
        shift: 7,
    },
    Timing {
        conversion_ms: 14,
        shift: 6,
    },
    Timing {
        conversion_ms: 26,
        shift: 5,
    },
];

impl Oversampling {
    pub const ALL: [Oversampling; 4] = [
        Oversampling::Low,
        Oversampling::Standard,
        Oversampling::High,
        Oversampling::UltraHigh,
    ];

    /// The raw OSS value, 0..=3.
    pub fn oss(self) -> u8 {
        self as u8
    }

    /// Time to wait between starting a pressure conversion and reading it back.
    pub fn conversion_time_ms(self) -> u32 {
        TIMINGS[self as usize].conversion_ms
    }

    /// Right shift that normalizes the 24-bit data register to the effective resolution.
    pub fn shift(self) -> u8 {
        TIMINGS[self as usize].shift
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = u8;

    fn try_from(oss: u8) -> Result<Self, Self::Error> {
        match oss {
            0 => Ok(Oversampling::Low),
            1 => Ok(Oversampling::Standard),
            2 => Ok(Oversampling::High),
            3 => Ok(Oversampling::UltraHigh),
            other => Err(other),
        }
    }
}

/// Conversion commands accepted by the measurement control register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Temperature,
    Pressure(Oversampling),
}

impl Command {
    /// How long the conversion started by this command takes.
    pub fn conversion_time_ms(&self) -> u32 {
        match self {
            Command::Temperature => TEMPERATURE_CONVERSION_MS,
            Command::Pressure(oss) => oss.conversion_time_ms(),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        match command {
            Command::Temperature => CMD_TEMPERATURE,
            Command::Pressure(oss) => CMD_PRESSURE | (oss.oss() << 6),
        }
    }
}

pub struct CtrlMeas;

impl CtrlMeas {
    pub fn write<I: I2c>(address: I2cAddress, i2c: &mut I, command: Command) -> Result<(), I::Error> {
        write_register(address, i2c, CTRL_MEAS, &[command.into()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_time_grows_with_oversampling() {
        for pair in Oversampling::ALL.windows(2) {
            assert!(pair[0].conversion_time_ms() < pair[1].conversion_time_ms());
        }
        for oss in Oversampling::ALL {
            assert_eq!(2 + (3u32 << oss.oss()), oss.conversion_time_ms());
            assert_eq!(8 - oss.oss(), oss.shift());
        }
    }

    #[test]
    fn conversion_times_cover_datasheet_maximums() {
        // 4.5, 7.5, 13.5 and 25.5 ms
        let datasheet_tenths = [45, 75, 135, 255];
        for (oss, max) in Oversampling::ALL.iter().zip(datasheet_tenths) {
            assert!(oss.conversion_time_ms() * 10 >= max);
        }
        assert!(TEMPERATURE_CONVERSION_MS * 10 >= 45);
    }

    #[test]
    fn command_bytes() {
        assert_eq!(0x2E, u8::from(Command::Temperature));
        assert_eq!(0x34, u8::from(Command::Pressure(Oversampling::Low)));
        assert_eq!(0x74, u8::from(Command::Pressure(Oversampling::Standard)));
        assert_eq!(0xB4, u8::from(Command::Pressure(Oversampling::High)));
        assert_eq!(0xF4, u8::from(Command::Pressure(Oversampling::UltraHigh)));
    }

    #[test]
    fn oss_from_raw() {
        assert_eq!(Ok(Oversampling::High), Oversampling::try_from(2));
        assert_eq!(Err(4), Oversampling::try_from(4));
        assert_eq!(Oversampling::Low, Oversampling::default());
    }
}
