use crate::domain::temperature::{Temperature, TemperatureScale};

/// A sensor able to take a blocking temperature reading.
pub trait TemperatureSensor<T: TemperatureScale> {
    type Error;

    fn temperature(&mut self) -> Result<Temperature<T>, Self::Error>;
}
