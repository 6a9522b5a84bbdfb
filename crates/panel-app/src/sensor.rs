//! Local sensor collaborator.

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Source of local sensor readings, sampled once per frame.
pub trait SensorSource: Send {
    /// Latest reading, `None` when the sensor did not answer.
    fn read(&mut self) -> Option<SensorReading>;
}

/// Used when no sensor is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSensor;

impl SensorSource for NullSensor {
    fn read(&mut self) -> Option<SensorReading> {
        None
    }
}
