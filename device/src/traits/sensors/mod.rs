pub mod pressure;
pub mod temperature;
