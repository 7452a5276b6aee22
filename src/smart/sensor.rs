//! Sensors and the hardware node that owns them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Temperature,
    /// Data volume (GB)
    Data,
    /// Percentage level (remaining life, wear)
    Level,
    /// Dimensionless ratio
    Factor,
}

impl SensorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Data => "data",
            SensorKind::Level => "level",
            SensorKind::Factor => "factor",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a sensor within its [`HardwareNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorId(usize);

/// Live numeric value slot exposed to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Hierarchical identifier, e.g. `/hdd/0/temperature/0`
    pub identifier: String,
    pub name: String,
    pub channel: u32,
    pub kind: SensorKind,
    pub hidden: bool,
    pub value: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl Sensor {
    /// Record a new reading, last write wins
    pub fn set_value(&mut self, value: f32) {
        self.value = Some(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Forget min/max history
    pub fn reset_extremes(&mut self) {
        self.min = self.value;
        self.max = self.value;
    }
}

/// Visitor for sensor tree traversal
pub trait SensorVisitor {
    fn visit_sensor(&mut self, sensor: &Sensor);
}

impl<F: FnMut(&Sensor)> SensorVisitor for F {
    fn visit_sensor(&mut self, sensor: &Sensor) {
        self(sensor)
    }
}

/// Hardware node owning the sensors of one device
///
/// Sensors are registered once and live as long as the node. Only
/// activated sensors are visited.
#[derive(Debug, Clone)]
pub struct HardwareNode {
    name: String,
    identifier: String,
    sensors: Vec<Sensor>,
    active: Vec<SensorId>,
}

impl HardwareNode {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            sensors: Vec::new(),
            active: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Create a sensor owned by this node
    pub fn register_sensor(
        &mut self,
        name: &str,
        channel: u32,
        kind: SensorKind,
        hidden: bool,
    ) -> SensorId {
        let id = SensorId(self.sensors.len());
        self.sensors.push(Sensor {
            identifier: format!("{}/{}/{}", self.identifier, kind, channel),
            name: name.to_string(),
            channel,
            kind,
            hidden,
            value: None,
            min: None,
            max: None,
        });
        id
    }

    /// Make a sensor visible to visitation. Idempotent.
    pub fn activate_sensor(&mut self, id: SensorId) {
        if id.0 < self.sensors.len() && !self.active.contains(&id) {
            self.active.push(id);
        }
    }

    pub fn is_active(&self, id: SensorId) -> bool {
        self.active.contains(&id)
    }

    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.sensors.get(id.0)
    }

    pub fn sensor_mut(&mut self, id: SensorId) -> Option<&mut Sensor> {
        self.sensors.get_mut(id.0)
    }

    /// All registered sensors, active or not
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Active sensors in activation order
    pub fn active_sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.active.iter().filter_map(|id| self.sensors.get(id.0))
    }

    /// Find an active sensor by kind and channel
    pub fn find(&self, kind: SensorKind, channel: u32) -> Option<&Sensor> {
        self.active_sensors()
            .find(|s| s.kind == kind && s.channel == channel)
    }

    pub fn for_each_sensor<V: SensorVisitor + ?Sized>(&self, visitor: &mut V) {
        for sensor in self.active_sensors() {
            visitor.visit_sensor(sensor);
        }
    }
}
