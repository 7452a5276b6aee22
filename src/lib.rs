//! # Drive Sense
//!
//! S.M.A.R.T. health monitoring for storage drives: model classification,
//! attribute-to-sensor mapping with throttled refresh, and diagnostic
//! attribute reports.
//!
//! ## Features
//!
//! - **Model Classification**: Plextor, Intel, SandForce, Indilinx and Samsung
//!   SSDs by name prefix and reported attributes, with a generic hard disk
//!   catch-all
//! - **Live Sensors**: temperature, data volume, remaining life and write
//!   amplification, deduplicated per sensor kind and channel
//! - **Throttled Refresh**: one drive query per 30 host ticks by default
//! - **Diagnostic Reports**: fixed-width attribute tables with raw, worst,
//!   normalized, threshold and physical values
//!
//! ## Quick Start
//!
//! ```no_run
//! use drivesense::{Config, DriveGroup, SnapshotTransport};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let transport = Arc::new(SnapshotTransport::load(Path::new("drives.toml"))?);
//! let mut group = DriveGroup::discover(transport, &config);
//!
//! group.update_all();
//! for drive in group.drives() {
//!     println!("{} ({})", drive.name(), drive.model());
//!     for sensor in drive.node().active_sensors() {
//!         println!("  {}: {:?}", sensor.name, sensor.value);
//!     }
//! }
//! print!("{}", group.report());
//! group.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - `drivesense` command-line tool

pub mod config; // Configuration management with TOML persistence
pub mod error;
pub mod smart; // Drive classification, sensors and reports

pub use config::Config;
pub use error::{Result, SmartError};
pub use smart::{
    classify, DriveGroup, DriveModel, DriveName, DriveSnapshot, HardwareNode,
    RawAttributeRecord, Sensor, SensorKind, SmartDrive, SmartTransport, SnapshotTransport,
    ThresholdRecord,
};
