//! Blocking driver for the Bosch BMP085 (and BMP180) barometric pressure sensor.
//!
//! Every measurement is a conversion command, a fixed wait and a read of the
//! data register. Pressure compensation depends on the B5 term of a temperature
//! compensation, so every pressure read performs a temperature conversion first.
//!
//! ```ignore
//! let mut bmp = Bmp085::new(i2c, delay);
//! bmp.begin()?;
//! bmp.set_sampling(Oversampling::UltraHigh);
//! let acquisition = bmp.read()?;
//! let altitude = bmp.read_altitude(SEA_LEVEL_PRESSURE)?;
//! ```

pub mod register;

use crate::domain::pressure::Pressure;
use crate::domain::temperature::{Celsius, Temperature};
use crate::domain::SensorAcquisition;
use crate::traits::i2c::I2cAddress;
use crate::traits::sensors::{pressure::PressureSensor, temperature::TemperatureSensor};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, I2c, NoAcknowledgeSource};
use register::calibration::Calibration;
use register::chip_id::ChipId;
use register::ctrl_meas::{Command, CtrlMeas};
use register::out::{Pout, Tout};

pub use crate::domain::pressure::SEA_LEVEL_PRESSURE;
pub use register::ctrl_meas::Oversampling;

pub const ADDR: u8 = 0x77;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp085Error<E> {
    /// Bus failure reported by the I2C implementation.
    I2c(E),
    /// Nothing acknowledged the sensor's address.
    NoDevice,
    /// A measurement was requested before `begin()` loaded the calibration.
    NotCalibrated,
    /// Pressure compensation was requested before any temperature compensation.
    NoTemperature,
    /// The calibration coefficients make the compensation divide by zero.
    InvalidCalibration,
}

impl<E: embedded_hal::i2c::Error> From<E> for Bmp085Error<E> {
    fn from(e: E) -> Bmp085Error<E> {
        match e.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Bmp085Error::NoDevice,
            _ => Bmp085Error::I2c(e),
        }
    }
}

pub struct Bmp085<I, D> {
    address: I2cAddress,
    i2c: I,
    delay: D,
    calibration: Option<Calibration>,
    oversampling: Oversampling,
    b5: Option<i32>,
}

impl<I, D> Bmp085<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            address: I2cAddress::new(ADDR),
            i2c,
            delay,
            calibration: None,
            oversampling: Oversampling::default(),
            b5: None,
        }
    }

    /// Loads the factory calibration. Must be called before any measurement.
    pub fn begin(&mut self) -> Result<(), Bmp085Error<I::Error>> {
        let calibration = Calibration::read(self.address, &mut self.i2c)?;
        debug!(
            "[bmp085] calibration ac1={} ac2={} ac3={} ac4={} ac5={} ac6={} b1={} b2={} mb={} mc={} md={}",
            calibration.ac1,
            calibration.ac2,
            calibration.ac3,
            calibration.ac4,
            calibration.ac5,
            calibration.ac6,
            calibration.b1,
            calibration.b2,
            calibration.mb,
            calibration.mc,
            calibration.md
        );
        self.calibration.replace(calibration);
        self.b5 = None;
        Ok(())
    }

    /// Counterpart of [`begin`](Self::begin). The sensor has no shutdown
    /// sequence; it idles between conversions on its own.
    pub fn end(&mut self) {
        trace!("[bmp085] end");
    }

    /// Gives back the bus and the delay provider.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    /// Reads the chip identification register, 0x55 for a BMP085/BMP180.
    pub fn chip_id(&mut self) -> Result<u8, Bmp085Error<I::Error>> {
        Ok(ChipId::read(self.address, &mut self.i2c)?)
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn set_sampling(&mut self, oversampling: Oversampling) {
        self.oversampling = oversampling;
    }

    pub fn sampling(&self) -> Oversampling {
        self.oversampling
    }

    fn convert(&mut self, command: Command) -> Result<(), Bmp085Error<I::Error>> {
        trace!("[bmp085] command {:#x}", u8::from(command));
        CtrlMeas::write(self.address, &mut self.i2c, command)?;
        self.delay.delay_ms(command.conversion_time_ms());
        Ok(())
    }

    /// Runs a temperature conversion and returns the raw 16-bit count (UT).
    pub fn read_uncalibrated_temperature(&mut self) -> Result<i32, Bmp085Error<I::Error>> {
        self.convert(Command::Temperature)?;
        let ut = Tout::read(self.address, &mut self.i2c)? as i32;
        trace!("[bmp085] ut={}", ut);
        Ok(ut)
    }

    /// Runs a pressure conversion at the current oversampling setting and
    /// returns the raw count (UP), already shifted to its effective resolution.
    pub fn read_uncalibrated_pressure(&mut self) -> Result<i32, Bmp085Error<I::Error>> {
        let oversampling = self.oversampling;
        self.convert(Command::Pressure(oversampling))?;
        let up = Pout::read(self.address, &mut self.i2c, oversampling)?;
        trace!("[bmp085] up={} oss={}", up, oversampling.oss());
        Ok(up)
    }

    /// Compensates a raw temperature, in 0.1 °C, and retains B5 for the
    /// following pressure compensation.
    pub fn calculate_temperature(&mut self, ut: i32) -> Result<i32, Bmp085Error<I::Error>> {
        let calibration = self.calibration.as_ref().ok_or(Bmp085Error::NotCalibrated)?;
        match calibration.calibrated_temperature(ut) {
            Some(t) => {
                self.b5.replace(t.b5);
                Ok(t.deci_celsius)
            }
            None => {
                warn!("[bmp085] calibration yields division by zero for ut={}", ut);
                Err(Bmp085Error::InvalidCalibration)
            }
        }
    }

    /// Compensates a raw pressure, in Pa, using the B5 of the last temperature
    /// compensation.
    pub fn calculate_pressure(&mut self, up: i32) -> Result<i32, Bmp085Error<I::Error>> {
        let calibration = self.calibration.as_ref().ok_or(Bmp085Error::NotCalibrated)?;
        let b5 = self.b5.ok_or(Bmp085Error::NoTemperature)?;
        match calibration.calibrated_pressure(up, b5, self.oversampling) {
            Some(p) => Ok(p),
            None => {
                warn!("[bmp085] calibration yields division by zero for up={}", up);
                Err(Bmp085Error::InvalidCalibration)
            }
        }
    }

    fn ensure_calibrated(&self) -> Result<(), Bmp085Error<I::Error>> {
        if self.calibration.is_some() {
            Ok(())
        } else {
            Err(Bmp085Error::NotCalibrated)
        }
    }

    /// Temperature in 0.1 °C.
    pub fn read_temperature(&mut self) -> Result<i32, Bmp085Error<I::Error>> {
        self.ensure_calibrated()?;
        let ut = self.read_uncalibrated_temperature()?;
        self.calculate_temperature(ut)
    }

    /// Pressure in Pa. A temperature conversion runs first to refresh B5.
    pub fn read_pressure(&mut self) -> Result<i32, Bmp085Error<I::Error>> {
        self.read_temperature()?;
        let up = self.read_uncalibrated_pressure()?;
        self.calculate_pressure(up)
    }

    /// Temperature and pressure from a single cycle.
    pub fn read(&mut self) -> Result<SensorAcquisition<Celsius>, Bmp085Error<I::Error>> {
        let temperature = self.read_temperature()?;
        let up = self.read_uncalibrated_pressure()?;
        let pressure = self.calculate_pressure(up)?;
        Ok(SensorAcquisition {
            temperature: Temperature::from_deci_celsius(temperature),
            pressure: Pressure::from_pascals(pressure),
        })
    }

    /// Runs one full cycle and stores temperature (0.1 °C) and pressure (Pa)
    /// into whichever outputs are given.
    pub fn read_into(
        &mut self,
        temperature: Option<&mut i32>,
        pressure: Option<&mut i32>,
    ) -> Result<(), Bmp085Error<I::Error>> {
        let t = self.read_temperature()?;
        let up = self.read_uncalibrated_pressure()?;
        let p = self.calculate_pressure(up)?;

        if let Some(temperature) = temperature {
            *temperature = t;
        }
        if let Some(pressure) = pressure {
            *pressure = p;
        }
        Ok(())
    }

    /// Altitude in metres above the level where pressure equals `sea_level_pressure` (Pa).
    pub fn read_altitude(&mut self, sea_level_pressure: f64) -> Result<f64, Bmp085Error<I::Error>> {
        let pressure = Pressure::from_pascals(self.read_pressure()?);
        Ok(pressure.altitude(sea_level_pressure))
    }

    /// Pressure in Pa reduced to sea level, for a sensor at `altitude` metres.
    pub fn read_pressure_sea_level(&mut self, altitude: f64) -> Result<f64, Bmp085Error<I::Error>> {
        let pressure = Pressure::from_pascals(self.read_pressure()?);
        Ok(pressure.sea_level(altitude))
    }
}

impl<I, D> TemperatureSensor<Celsius> for Bmp085<I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = Bmp085Error<I::Error>;

    fn temperature(&mut self) -> Result<Temperature<Celsius>, Self::Error> {
        Ok(Temperature::from_deci_celsius(self.read_temperature()?))
    }
}

impl<I, D> PressureSensor for Bmp085<I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = Bmp085Error<I::Error>;

    fn pressure(&mut self) -> Result<Pressure, Self::Error> {
        Ok(Pressure::from_pascals(self.read_pressure()?))
    }
}
