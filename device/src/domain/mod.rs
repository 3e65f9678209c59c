pub mod pressure;
pub mod temperature;

use core::fmt::{Debug, Formatter};
use pressure::Pressure;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use temperature::*;

/// Temperature and pressure taken in the same conversion cycle.
#[derive(Copy, Clone, PartialEq)]
pub struct SensorAcquisition<S: TemperatureScale> {
    pub temperature: Temperature<S>,
    pub pressure: Pressure,
}

impl<S: TemperatureScale> Debug for SensorAcquisition<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SensorAcquisition")
            .field("temperature", &self.temperature)
            .field("pressure", &self.pressure)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<S: TemperatureScale> defmt::Format for SensorAcquisition<S> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "SensorAcquisition(temperature: {}, pressure: {})",
            &self.temperature,
            &self.pressure
        );
    }
}

impl<S: TemperatureScale> Serialize for SensorAcquisition<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let mut state = serializer.serialize_struct("SensorAcquisition", 2)?;
        state.serialize_field("temperature", &self.temperature)?;
        state.serialize_field("pressure", &self.pressure)?;
        state.end()
    }
}
