use crate::domain::pressure::Pressure;

/// A sensor able to take a blocking barometric pressure reading.
pub trait PressureSensor {
    type Error;

    fn pressure(&mut self) -> Result<Pressure, Self::Error>;
}
