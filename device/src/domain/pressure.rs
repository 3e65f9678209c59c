//! Barometric pressure and the altitude relations derived from it.

use core::fmt::{Display, Formatter};
use serde::Serialize;

/// Standard atmospheric pressure at sea level, in Pa.
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0;

const ALTITUDE_SCALE: f64 = 44330.0;
const BAROMETRIC_EXPONENT: f64 = 5.255;

/// A pressure reading in Pa.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Pressure {
    pascals: i32,
}

impl Pressure {
    pub fn from_pascals(pascals: i32) -> Self {
        Self { pascals }
    }

    pub fn pascals(&self) -> i32 {
        self.pascals
    }

    pub fn hectopascals(&self) -> f32 {
        self.pascals as f32 / 100.0
    }

    /// Altitude in metres relative to the given sea-level pressure.
    pub fn altitude(&self, sea_level: f64) -> f64 {
        altitude(self.pascals as f64, sea_level)
    }

    /// Sea-level equivalent of this pressure when measured at `altitude` metres.
    pub fn sea_level(&self, altitude: f64) -> f64 {
        sea_level_pressure(self.pascals as f64, altitude)
    }
}

impl From<i32> for Pressure {
    fn from(pascals: i32) -> Self {
        Self::from_pascals(pascals)
    }
}

impl Display for Pressure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Pa", self.pascals)
    }
}

/// International barometric formula: `44330 * (1 - (p / p0)^(1 / 5.255))`.
pub fn altitude(pressure: f64, sea_level: f64) -> f64 {
    ALTITUDE_SCALE * (1.0 - libm::pow(pressure / sea_level, 1.0 / BAROMETRIC_EXPONENT))
}

/// Inverse of [`altitude`]: `p / (1 - h / 44330)^5.255`.
pub fn sea_level_pressure(pressure: f64, altitude: f64) -> f64 {
    pressure / libm::pow(1.0 - altitude / ALTITUDE_SCALE, BAROMETRIC_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_is_zero_altitude() {
        assert!(altitude(SEA_LEVEL_PRESSURE, SEA_LEVEL_PRESSURE).abs() < 1e-9);
        assert!((sea_level_pressure(SEA_LEVEL_PRESSURE, 0.0) - SEA_LEVEL_PRESSURE).abs() < 1e-9);
    }

    #[test]
    fn datasheet_pressure_altitude() {
        let h = Pressure::from_pascals(69964).altitude(SEA_LEVEL_PRESSURE);
        assert!(h > 3000.0 && h < 3030.0, "altitude {}", h);
    }

    #[test]
    fn lower_pressure_is_higher() {
        let low = altitude(90000.0, SEA_LEVEL_PRESSURE);
        let high = altitude(80000.0, SEA_LEVEL_PRESSURE);
        assert!(high > low);
        assert!(altitude(102000.0, SEA_LEVEL_PRESSURE) < 0.0);
    }

    #[test]
    fn altitude_round_trip() {
        for &(p, p0) in &[
            (69964.0, SEA_LEVEL_PRESSURE),
            (100000.0, SEA_LEVEL_PRESSURE),
            (95000.0, 102000.0),
            (30000.0, 99000.0),
        ] {
            let h = altitude(p, p0);
            let recovered = sea_level_pressure(p, h);
            assert!(
                ((recovered - p0) / p0).abs() < 1e-4,
                "p={} p0={} recovered={}",
                p,
                p0,
                recovered
            );
        }
    }

    #[test]
    fn units() {
        let p = Pressure::from(101325);
        assert_eq!(101325, p.pascals());
        assert!((p.hectopascals() - 1013.25).abs() < 1e-3);
    }
}
