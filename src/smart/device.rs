//! S.M.A.R.T. drive bound to a classified model
//!
//! # Concurrency
//!
//! A [`SmartDrive`] has a single owner. [`SmartDrive::update`] takes
//! `&mut self` and [`SmartDrive::report`] takes `&self`, so the borrow rules
//! keep a report from running while an update is in flight on the same
//! drive. Hosts that share a drive between threads must wrap it in a
//! `Mutex` themselves; the transport handle is never accessed concurrently
//! from inside this type.

use super::attribute::{raw_to_int, AttributeDefinition, RawAttributeRecord};
use super::catalog::{self, WRITE_AMPLIFICATION_CHANNEL, WRITE_AMPLIFICATION_NAME};
use super::model::{classify, present_identifiers, DriveModel};
use super::report;
use super::sensor::{HardwareNode, SensorId, SensorKind, SensorVisitor};
use super::transport::{DriveName, SmartTransport};
use crate::config::Config;
use crate::error::{Result, SmartError};
use log::{debug, info};
use std::collections::HashSet;

/// Sensors specific to one model that the catalog cannot express
#[derive(Debug, Clone, Copy)]
enum ModelSensors {
    None,
    Sandforce { write_amplification: SensorId },
}

impl ModelSensors {
    fn register(model: DriveModel, node: &mut HardwareNode) -> Self {
        match model {
            DriveModel::SandforceSsd => ModelSensors::Sandforce {
                write_amplification: node.register_sensor(
                    WRITE_AMPLIFICATION_NAME,
                    WRITE_AMPLIFICATION_CHANNEL,
                    SensorKind::Factor,
                    false,
                ),
            },
            _ => ModelSensors::None,
        }
    }

    fn update(self, node: &mut HardwareNode, records: &[RawAttributeRecord]) {
        match self {
            ModelSensors::None => {}
            ModelSensors::Sandforce {
                write_amplification,
            } => {
                let counter = |id: u8| records.iter().find(|r| r.id == id).map(raw_to_int);
                if let (Some(controller), Some(host)) = (counter(0xE9), counter(0xEA)) {
                    if let Some(sensor) = node.sensor_mut(write_amplification) {
                        sensor.set_value(catalog::write_amplification(controller, host));
                    }
                    node.activate_sensor(write_amplification);
                }
            }
        }
    }
}

/// Bind catalog attributes present in `records` to sensors on `node`
///
/// At most one sensor is created per (kind, channel); the first attribute
/// declared for a pair wins.
pub fn bind_sensors(
    catalog: &'static [AttributeDefinition],
    records: &[RawAttributeRecord],
    node: &mut HardwareNode,
    show_hidden: bool,
) -> Vec<(&'static AttributeDefinition, SensorId)> {
    let present = present_identifiers(records);
    let mut bound: HashSet<(SensorKind, u32)> = HashSet::new();
    let mut bindings = Vec::new();

    for attr in catalog {
        let Some(binding) = attr.sensor else {
            continue;
        };
        if !present.contains(&attr.id) || !bound.insert((binding.kind, binding.channel)) {
            continue;
        }
        let id = node.register_sensor(
            attr.name,
            binding.channel,
            binding.kind,
            binding.hidden && !show_hidden,
        );
        node.activate_sensor(id);
        bindings.push((attr, id));
    }

    bindings
}

/// A classified drive with live sensors
#[derive(Debug)]
pub struct SmartDrive<T: SmartTransport> {
    transport: T,
    index: usize,
    name: String,
    firmware: String,
    model: DriveModel,
    handle: Option<T::Handle>,
    node: HardwareNode,
    bindings: Vec<(&'static AttributeDefinition, SensorId)>,
    model_sensors: ModelSensors,
    counter: u32,
    divider: u32,
    include_thresholds: bool,
}

impl<T: SmartTransport> SmartDrive<T> {
    /// Probe the drive at `index` and build it if it is supported
    ///
    /// Returns `Ok(None)` when the drive reports no usable name or no model
    /// matches. The probe handle is closed before the drive opens its own.
    pub fn probe(transport: T, index: usize, config: &Config) -> Result<Option<Self>> {
        let handle = transport.open(index)?;
        let name = transport.read_name(handle, index);
        let records = if transport.enable_smart(handle, index) {
            transport.read_attributes(handle, index)
        } else {
            Ok(Vec::new())
        };
        transport.close(handle);
        let records = records?;

        let Some(name) = name.filter(|n| !n.name.is_empty()) else {
            debug!("drive {} reported no valid name, skipping", index);
            return Ok(None);
        };

        match classify(&name.name, &present_identifiers(&records)) {
            Some(model) => Self::new(transport, index, name, model, config).map(Some),
            None => {
                debug!("drive {} ({}) is not supported", index, name.name);
                Ok(None)
            }
        }
    }

    /// Open the drive and create sensors for the given model
    pub fn new(
        transport: T,
        index: usize,
        name: DriveName,
        model: DriveModel,
        config: &Config,
    ) -> Result<Self> {
        let handle = transport.open(index)?;
        transport.enable_smart(handle, index);
        let records = match transport.read_attributes(handle, index) {
            Ok(records) => records,
            Err(e) => {
                transport.close(handle);
                return Err(e);
            }
        };

        let mut node = HardwareNode::new(name.name.clone(), format!("/hdd/{}", index));
        let bindings = bind_sensors(
            model.catalog(),
            &records,
            &mut node,
            config.storage.show_hidden,
        );
        let model_sensors = ModelSensors::register(model, &mut node);

        info!(
            "drive {}: {} ({}) as {} with {} sensors",
            index,
            name.name,
            name.firmware,
            model,
            bindings.len()
        );

        Ok(Self {
            transport,
            index,
            name: name.name,
            firmware: name.firmware,
            model,
            handle: Some(handle),
            node,
            bindings,
            model_sensors,
            counter: 0,
            divider: config.update.divider(),
            include_thresholds: config.report.include_thresholds,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn firmware(&self) -> &str {
        &self.firmware
    }

    pub fn model(&self) -> DriveModel {
        self.model
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn node(&self) -> &HardwareNode {
        &self.node
    }

    /// Attributes bound to sensors, in catalog order
    pub fn bindings(&self) -> &[(&'static AttributeDefinition, SensorId)] {
        &self.bindings
    }

    pub fn for_each_sensor<V: SensorVisitor + ?Sized>(&self, visitor: &mut V) {
        self.node.for_each_sensor(visitor)
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    fn handle(&self) -> Result<T::Handle> {
        self.handle.ok_or(SmartError::Closed)
    }

    /// Called once per host tick; reads the drive every `refresh_divider` calls
    ///
    /// The tick counter advances even when the read fails, so a failing
    /// drive is queried no more often than a healthy one.
    pub fn update(&mut self) -> Result<()> {
        let handle = self.handle()?;
        let result = if self.counter == 0 {
            self.refresh(handle)
        } else {
            Ok(())
        };
        self.counter = (self.counter + 1) % self.divider;
        result
    }

    fn refresh(&mut self, handle: T::Handle) -> Result<()> {
        let records = self.transport.read_attributes(handle, self.index)?;
        debug!("drive {}: read {} attributes", self.index, records.len());

        for (attr, id) in &self.bindings {
            let Some(record) = records.iter().find(|r| r.id == attr.id) else {
                continue;
            };
            if let Some(sensor) = self.node.sensor_mut(*id) {
                sensor.set_value(attr.convert(record));
            }
        }
        self.model_sensors.update(&mut self.node, &records);
        Ok(())
    }

    /// Diagnostic attribute table, read fresh from the drive
    pub fn report(&self) -> Result<String> {
        let handle = self.handle()?;
        let records = self.transport.read_attributes(handle, self.index)?;
        if records.is_empty() {
            return Ok(String::new());
        }
        let thresholds = if self.include_thresholds {
            Some(self.transport.read_thresholds(handle, self.index)?)
        } else {
            None
        };
        Ok(report::render(
            self.model,
            &self.name,
            &self.firmware,
            &records,
            thresholds.as_deref(),
        ))
    }

    /// Release the transport handle
    pub fn close(&mut self) -> Result<()> {
        let handle = self.handle.take().ok_or(SmartError::AlreadyClosed)?;
        self.transport.close(handle);
        info!("drive {}: closed", self.index);
        Ok(())
    }
}

impl<T: SmartTransport> Drop for SmartDrive<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.transport.close(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smart::snapshot::{DriveSnapshot, SnapshotTransport};
    use std::sync::Arc;

    fn rec(id: u8, value: u8, raw: [u8; 6]) -> RawAttributeRecord {
        RawAttributeRecord::new(id, value, value, raw)
    }

    fn hard_disk() -> DriveSnapshot {
        DriveSnapshot::new("WDC WD10EZEX-08WN4A0", "01.01A01")
            .with_attribute(rec(0x01, 200, [0; 6]))
            .with_attribute(rec(0x09, 90, [0x10, 0x27, 0, 0, 0, 0]))
            .with_attribute(rec(0xC2, 112, [31, 0, 0, 0, 0, 0]))
            .with_threshold(0x01, 51)
    }

    fn sandforce() -> DriveSnapshot {
        DriveSnapshot::new("OCZ-AGILITY3", "2.22")
            .with_attribute(rec(0xAB, 100, [0; 6]))
            .with_attribute(rec(0xB1, 100, [0; 6]))
            .with_attribute(rec(0xC2, 30, [28, 0, 0, 0, 0, 0]))
            .with_attribute(rec(0xE7, 97, [0; 6]))
            .with_attribute(rec(0xE9, 100, [0x2C, 0x01, 0, 0, 0, 0]))
            .with_attribute(rec(0xEA, 100, [0x64, 0, 0, 0, 0, 0]))
            .with_attribute(rec(0xF1, 100, [0x64, 0, 0, 0, 0, 0]))
    }

    fn probe(drives: Vec<DriveSnapshot>, config: &Config) -> SmartDrive<Arc<SnapshotTransport>> {
        let transport = Arc::new(SnapshotTransport::new(drives));
        SmartDrive::probe(transport, 0, config).unwrap().unwrap()
    }

    #[test]
    fn test_probe_classifies_and_binds() {
        let drive = probe(vec![hard_disk()], &Config::default());
        assert_eq!(drive.model(), DriveModel::GenericHardDisk);
        assert_eq!(drive.name(), "WDC WD10EZEX-08WN4A0");
        assert_eq!(drive.firmware(), "01.01A01");
        // probe handle closed, drive handle open
        assert_eq!(drive.transport().opens(), 2);
        assert_eq!(drive.transport().open_handles(), 1);

        let sensors: Vec<_> = drive.node().active_sensors().collect();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].kind, SensorKind::Temperature);
        assert_eq!(sensors[0].identifier, "/hdd/0/temperature/0");
    }

    #[test]
    fn test_probe_skips_invalid_name() {
        let transport = Arc::new(SnapshotTransport::new(vec![DriveSnapshot::new("", "")]));
        let drive = SmartDrive::probe(transport.clone(), 0, &Config::default()).unwrap();
        assert!(drive.is_none());
        assert_eq!(transport.open_handles(), 0);
    }

    #[test]
    fn test_probe_missing_drive() {
        let transport = Arc::new(SnapshotTransport::new(Vec::new()));
        assert!(matches!(
            SmartDrive::probe(transport, 0, &Config::default()),
            Err(SmartError::InvalidHandle(0))
        ));
    }

    #[test]
    fn test_dedup_by_kind_and_channel() {
        // 0xE1 and 0xF1 both feed Data channel 0 on Intel drives
        let intel = DriveSnapshot::new("INTEL SSDSA2CW120G3", "4PC10362")
            .with_attribute(rec(0xE1, 100, [0x40, 0, 0, 0, 0, 0]))
            .with_attribute(rec(0xE8, 98, [0; 6]))
            .with_attribute(rec(0xE9, 98, [0; 6]))
            .with_attribute(rec(0xF1, 100, [0x80, 0, 0, 0, 0, 0]))
            .with_attribute(rec(0xF2, 100, [0x20, 0, 0, 0, 0, 0]));
        let mut drive = probe(vec![intel], &Config::default());
        assert_eq!(drive.model(), DriveModel::IntelSsd);

        let mut pairs = HashSet::new();
        drive.for_each_sensor(&mut |s: &crate::smart::sensor::Sensor| {
            assert!(pairs.insert((s.kind, s.channel)));
        });
        assert_eq!(pairs.len(), 3);

        let ids: Vec<u8> = drive.bindings().iter().map(|(a, _)| a.id).collect();
        assert_eq!(ids, [0xE1, 0xE8, 0xF2]);

        drive.update().unwrap();
        let writes = drive.node().find(SensorKind::Data, 0).unwrap();
        assert_eq!(writes.value, Some(2.0));
        let life = drive.node().find(SensorKind::Level, 0).unwrap();
        assert_eq!(life.value, Some(98.0));
    }

    #[test]
    fn test_no_sensor_for_absent_attribute() {
        let config = Config::default();
        let mut drive = probe(vec![hard_disk()], &config);
        drive.transport().update_drive(0, |d| {
            d.attributes.push(rec(0xE7, 100, [45, 0, 0, 0, 0, 0]));
            d.attributes.push(rec(0xBE, 100, [40, 0, 0, 0, 0, 0]));
        });
        drive.update().unwrap();
        assert_eq!(drive.node().active_sensors().count(), 1);
        assert_eq!(drive.bindings()[0].0.id, 0xC2);
    }

    #[test]
    fn test_update_reads_once_per_thirty_ticks() {
        let mut drive = probe(vec![hard_disk()], &Config::default());
        let base = drive.transport().attribute_reads();
        for _ in 0..90 {
            drive.update().unwrap();
        }
        assert_eq!(drive.transport().attribute_reads() - base, 3);
    }

    #[test]
    fn test_update_pushes_values_and_tolerates_missing() {
        let mut config = Config::default();
        config.update.refresh_divider = 1;
        let mut drive = probe(vec![hard_disk()], &config);

        drive.update().unwrap();
        let temp = drive.node().find(SensorKind::Temperature, 0).unwrap();
        assert_eq!(temp.value, Some(31.0));

        drive.transport().update_drive(0, |d| d.attributes.retain(|r| r.id != 0xC2));
        drive.update().unwrap();
        let temp = drive.node().find(SensorKind::Temperature, 0).unwrap();
        assert_eq!(temp.value, Some(31.0));

        drive.transport().update_drive(0, |d| {
            d.attributes.push(rec(0xC2, 110, [35, 0, 0, 0, 0, 0]))
        });
        drive.update().unwrap();
        let temp = drive.node().find(SensorKind::Temperature, 0).unwrap();
        assert_eq!(temp.value, Some(35.0));
        assert_eq!(temp.max, Some(35.0));
        assert_eq!(temp.min, Some(31.0));
    }

    #[test]
    fn test_sandforce_write_amplification() {
        let mut drive = probe(vec![sandforce()], &Config::default());
        assert_eq!(drive.model(), DriveModel::SandforceSsd);
        assert!(drive.node().find(SensorKind::Factor, 1).is_none());

        // 0xEA and 0xF1 share Data channel 1
        assert!(drive.bindings().iter().all(|(a, _)| a.id != 0xF1));

        drive.update().unwrap();
        let wa = drive.node().find(SensorKind::Factor, 1).unwrap();
        assert_eq!(wa.name, "Write Amplification");
        assert_eq!(wa.value, Some(3.0));
    }

    #[test]
    fn test_hidden_sensor_visibility() {
        let drive = probe(vec![sandforce()], &Config::default());
        assert!(drive.node().find(SensorKind::Temperature, 0).unwrap().hidden);

        let mut config = Config::default();
        config.storage.show_hidden = true;
        let drive = probe(vec![sandforce()], &config);
        assert!(!drive.node().find(SensorKind::Temperature, 0).unwrap().hidden);
    }

    #[test]
    fn test_report_does_not_touch_scheduler() {
        let mut drive = probe(vec![hard_disk()], &Config::default());
        drive.update().unwrap();
        let reads = drive.transport().attribute_reads();

        let report = drive.report().unwrap();
        assert!(report.starts_with("GenericHardDisk"));
        assert_eq!(drive.transport().attribute_reads(), reads + 1);
        assert_eq!(drive.transport().threshold_reads(), 1);

        // ticks 2..30 still skip the read
        for _ in 1..30 {
            drive.update().unwrap();
        }
        assert_eq!(drive.transport().attribute_reads(), reads + 1);
    }

    #[test]
    fn test_report_empty_without_records() {
        let mut snapshot = hard_disk();
        snapshot.attributes.clear();
        let drive = probe(vec![snapshot], &Config::default());
        assert_eq!(drive.report().unwrap(), "");
        assert_eq!(drive.transport().threshold_reads(), 0);
    }

    #[test]
    fn test_report_without_thresholds() {
        let mut config = Config::default();
        config.report.include_thresholds = false;
        let drive = probe(vec![hard_disk()], &config);
        drive.report().unwrap();
        assert_eq!(drive.transport().threshold_reads(), 0);
    }

    #[test]
    fn test_double_close_is_error() {
        let mut drive = probe(vec![hard_disk()], &Config::default());
        drive.close().unwrap();
        assert!(drive.is_closed());
        assert!(matches!(drive.close(), Err(SmartError::AlreadyClosed)));
        assert_eq!(drive.transport().closes(), 2);
        assert_eq!(drive.transport().open_handles(), 0);
    }

    #[test]
    fn test_use_after_close_is_error() {
        let mut drive = probe(vec![hard_disk()], &Config::default());
        drive.close().unwrap();
        assert!(matches!(drive.update(), Err(SmartError::Closed)));
        assert!(matches!(drive.report(), Err(SmartError::Closed)));
    }

    #[test]
    fn test_drop_releases_handle() {
        let transport = Arc::new(SnapshotTransport::new(vec![hard_disk()]));
        let drive = SmartDrive::probe(transport.clone(), 0, &Config::default()).unwrap();
        assert_eq!(transport.open_handles(), 1);
        drop(drive);
        assert_eq!(transport.open_handles(), 0);

        let mut drive = SmartDrive::probe(transport.clone(), 0, &Config::default())
            .unwrap()
            .unwrap();
        drive.close().unwrap();
        drop(drive);
        assert_eq!(transport.closes(), 4);
    }

    #[test]
    fn test_every_catalog_binds_unique_pairs() {
        for model in DriveModel::ALL {
            let catalog = model.catalog();
            let records: Vec<_> = catalog
                .iter()
                .map(|a| rec(a.id, 100, [1, 0, 0, 0, 0, 0]))
                .collect();
            let mut node = HardwareNode::new(model.name(), "/hdd/0");
            let bindings = bind_sensors(catalog, &records, &mut node, false);

            let mut pairs = HashSet::new();
            for (attr, id) in &bindings {
                let sensor = node.sensor(*id).unwrap();
                assert!(
                    pairs.insert((sensor.kind, sensor.channel)),
                    "{}: duplicate sensor {} {}",
                    model,
                    sensor.kind,
                    sensor.channel
                );

                let first = catalog
                    .iter()
                    .find(|a| {
                        a.sensor
                            .is_some_and(|b| b.kind == sensor.kind && b.channel == sensor.channel)
                    })
                    .unwrap();
                assert_eq!(attr.id, first.id, "{}: pair not bound to first entry", model);
            }

            let declared: HashSet<_> = catalog
                .iter()
                .filter_map(|a| a.sensor.map(|b| (b.kind, b.channel)))
                .collect();
            assert_eq!(pairs, declared, "{}", model);
            assert_eq!(node.active_sensors().count(), bindings.len());
        }
    }
}
