//! S.M.A.R.T. Drive Module
//!
//! Classifies drives by name and reported attributes, maps vendor attributes
//! onto live sensors and renders diagnostic attribute tables:
//! - Plextor, Intel, SandForce, Indilinx and Samsung SSDs
//! - Generic hard disks (catch-all)
//!
//! Drive access goes through a [`SmartTransport`]; [`SnapshotTransport`]
//! serves recorded drive data.

pub mod attribute;
pub mod catalog;
pub mod device;
pub mod group;
pub mod model;
pub mod report;
pub mod sensor;
pub mod snapshot;
pub mod transport;

// Re-export commonly used types
pub use attribute::{AttributeDefinition, RawAttributeRecord, SensorBinding, ThresholdRecord};
pub use device::{bind_sensors, SmartDrive};
pub use group::DriveGroup;
pub use model::{classify, present_identifiers, DriveModel};
pub use sensor::{HardwareNode, Sensor, SensorId, SensorKind, SensorVisitor};
pub use snapshot::{DriveSnapshot, SnapshotTransport};
pub use transport::{DriveName, SmartTransport};
