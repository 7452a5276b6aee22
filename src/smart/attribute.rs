//! S.M.A.R.T. attribute records and catalog entries

use super::sensor::SensorKind;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Length of the vendor-specific raw payload of one attribute record
pub const RAW_VALUE_LEN: usize = 6;

/// One attribute record as read from the drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttributeRecord {
    /// Attribute ID (0x00 marks the end of the valid entries)
    pub id: u8,
    /// Status flags
    #[serde(default)]
    pub flags: u16,
    /// Current normalized value
    pub value: u8,
    /// Worst normalized value seen
    pub worst: u8,
    /// Raw payload, vendor-specific encoding
    pub raw: [u8; RAW_VALUE_LEN],
}

impl RawAttributeRecord {
    pub fn new(id: u8, value: u8, worst: u8, raw: [u8; RAW_VALUE_LEN]) -> Self {
        Self {
            id,
            flags: 0,
            value,
            worst,
            raw,
        }
    }

    /// Raw payload as contiguous uppercase hex
    pub fn raw_hex(&self) -> String {
        self.raw.iter().fold(String::with_capacity(RAW_VALUE_LEN * 2), |mut s, b| {
            let _ = write!(s, "{:02X}", b);
            s
        })
    }
}

/// Threshold for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRecord {
    /// Attribute ID
    pub id: u8,
    /// Threshold value
    pub threshold: u8,
}

/// Raw-to-physical conversion of one record
pub type Conversion = fn(&RawAttributeRecord) -> f32;

/// Sensor fed by an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorBinding {
    pub kind: SensorKind,
    pub channel: u32,
    /// Hidden unless the host asks for hidden sensors
    pub hidden: bool,
}

/// Static description of one attribute a drive model understands
#[derive(Debug, Clone, Copy)]
pub struct AttributeDefinition {
    pub id: u8,
    pub name: &'static str,
    pub conversion: Option<Conversion>,
    pub sensor: Option<SensorBinding>,
}

impl AttributeDefinition {
    /// Informational attribute with no conversion and no sensor
    pub const fn new(id: u8, name: &'static str) -> Self {
        Self {
            id,
            name,
            conversion: None,
            sensor: None,
        }
    }

    pub const fn with_conversion(self, conversion: Conversion) -> Self {
        Self {
            conversion: Some(conversion),
            ..self
        }
    }

    pub const fn with_sensor(self, kind: SensorKind, channel: u32) -> Self {
        Self {
            sensor: Some(SensorBinding {
                kind,
                channel,
                hidden: false,
            }),
            ..self
        }
    }

    /// Sensor bound to this attribute starts hidden
    pub const fn hidden(self) -> Self {
        match self.sensor {
            Some(binding) => Self {
                sensor: Some(SensorBinding {
                    hidden: true,
                    ..binding
                }),
                ..self
            },
            None => self,
        }
    }

    /// Whether a physical value is reported for this attribute
    pub fn has_physical_value(&self) -> bool {
        self.conversion.is_some() || self.sensor.is_some()
    }

    /// Physical value of a record; the normalized value when no conversion is declared
    pub fn convert(&self, record: &RawAttributeRecord) -> f32 {
        match self.conversion {
            Some(conversion) => conversion(record),
            None => record.value as f32,
        }
    }
}

/// Little-endian reassembly of the first four raw bytes
pub fn raw_to_int(record: &RawAttributeRecord) -> f32 {
    let r = &record.raw;
    u32::from_le_bytes([r[0], r[1], r[2], r[3]]) as f32
}

/// First raw byte, used by most temperature attributes
pub fn raw_first_byte(record: &RawAttributeRecord) -> f32 {
    record.raw[0] as f32
}

/// Normalized current value
pub fn normalized_value(record: &RawAttributeRecord) -> f32 {
    record.value as f32
}
