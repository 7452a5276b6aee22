//! Transport backed by recorded drive snapshots
//!
//! Snapshots are plain TOML or JSON documents, one `[[drive]]` table per
//! drive index:
//!
//! ```toml
//! [[drive]]
//! name = "WDC WD10EZEX-08WN4A0"
//! firmware = "01.01A01"
//!
//! [[drive.attributes]]
//! id = 0xC2
//! value = 112
//! worst = 103
//! raw = [31, 0, 0, 0, 0, 0]
//!
//! [[drive.thresholds]]
//! id = 0xC2
//! threshold = 0
//! ```

use super::attribute::{RawAttributeRecord, ThresholdRecord};
use super::transport::{DriveName, SmartTransport};
use crate::error::{Result, SmartError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Recorded health data of one drive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveSnapshot {
    pub name: String,
    #[serde(default)]
    pub firmware: String,
    #[serde(default = "default_true")]
    pub smart_enabled: bool,
    #[serde(default)]
    pub attributes: Vec<RawAttributeRecord>,
    #[serde(default)]
    pub thresholds: Vec<ThresholdRecord>,
}

fn default_true() -> bool {
    true
}

impl DriveSnapshot {
    pub fn new(name: &str, firmware: &str) -> Self {
        Self {
            name: name.to_string(),
            firmware: firmware.to_string(),
            smart_enabled: true,
            attributes: Vec::new(),
            thresholds: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, record: RawAttributeRecord) -> Self {
        self.attributes.push(record);
        self
    }

    pub fn with_threshold(mut self, id: u8, threshold: u8) -> Self {
        self.thresholds.push(ThresholdRecord { id, threshold });
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default, rename = "drive")]
    drives: Vec<DriveSnapshot>,
}

/// Handle issued by [`SnapshotTransport::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotHandle {
    index: usize,
    serial: u64,
}

/// In-memory transport serving snapshots by drive index
///
/// Every call is counted so callers can verify how often the drive was
/// actually queried.
#[derive(Debug, Default)]
pub struct SnapshotTransport {
    drives: Mutex<Vec<DriveSnapshot>>,
    open: Mutex<HashSet<SnapshotHandle>>,
    next_serial: AtomicU64,
    opens: AtomicUsize,
    closes: AtomicUsize,
    attribute_reads: AtomicUsize,
    threshold_reads: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SnapshotTransport {
    pub fn new(drives: Vec<DriveSnapshot>) -> Self {
        Self {
            drives: Mutex::new(drives),
            ..Default::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(contents)
            .map_err(|e| SmartError::Parse(format!("Failed to parse snapshot: {}", e)))?;
        Ok(Self::new(file.drives))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(contents)
            .map_err(|e| SmartError::Parse(format!("Failed to parse snapshot: {}", e)))?;
        Ok(Self::new(file.drives))
    }

    /// Load snapshots from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Serialize the current snapshots as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        let file = SnapshotFile {
            drives: lock(&self.drives).clone(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| SmartError::Parse(format!("Failed to serialize snapshot: {}", e)))
    }

    pub fn drive_count(&self) -> usize {
        lock(&self.drives).len()
    }

    /// Modify the recorded data of one drive. Returns false if no drive exists at `index`.
    pub fn update_drive<F: FnOnce(&mut DriveSnapshot)>(&self, index: usize, f: F) -> bool {
        match lock(&self.drives).get_mut(index) {
            Some(drive) => {
                f(drive);
                true
            }
            None => false,
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::Relaxed)
    }

    pub fn attribute_reads(&self) -> usize {
        self.attribute_reads.load(Ordering::Relaxed)
    }

    pub fn threshold_reads(&self) -> usize {
        self.threshold_reads.load(Ordering::Relaxed)
    }

    /// Handles opened and not yet closed
    pub fn open_handles(&self) -> usize {
        lock(&self.open).len()
    }

    fn check_open(&self, handle: SnapshotHandle) -> Result<()> {
        if lock(&self.open).contains(&handle) {
            Ok(())
        } else {
            Err(SmartError::Transport(format!(
                "handle {} for drive {} is not open",
                handle.serial, handle.index
            )))
        }
    }
}

impl SmartTransport for SnapshotTransport {
    type Handle = SnapshotHandle;

    fn open(&self, index: usize) -> Result<SnapshotHandle> {
        if index >= self.drive_count() {
            return Err(SmartError::InvalidHandle(index));
        }
        let handle = SnapshotHandle {
            index,
            serial: self.next_serial.fetch_add(1, Ordering::Relaxed),
        };
        lock(&self.open).insert(handle);
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(handle)
    }

    fn enable_smart(&self, _handle: SnapshotHandle, index: usize) -> bool {
        lock(&self.drives)
            .get(index)
            .map(|d| d.smart_enabled)
            .unwrap_or(false)
    }

    fn read_name(&self, _handle: SnapshotHandle, index: usize) -> Option<DriveName> {
        let drives = lock(&self.drives);
        let drive = drives.get(index)?;
        let name = drive.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(DriveName {
            name: name.to_string(),
            firmware: drive.firmware.trim().to_string(),
        })
    }

    fn read_attributes(
        &self,
        handle: SnapshotHandle,
        index: usize,
    ) -> Result<Vec<RawAttributeRecord>> {
        self.check_open(handle)?;
        self.attribute_reads.fetch_add(1, Ordering::Relaxed);
        Ok(lock(&self.drives)
            .get(index)
            .filter(|d| d.smart_enabled)
            .map(|d| d.attributes.clone())
            .unwrap_or_default())
    }

    fn read_thresholds(&self, handle: SnapshotHandle, index: usize) -> Result<Vec<ThresholdRecord>> {
        self.check_open(handle)?;
        self.threshold_reads.fetch_add(1, Ordering::Relaxed);
        Ok(lock(&self.drives)
            .get(index)
            .filter(|d| d.smart_enabled)
            .map(|d| d.thresholds.clone())
            .unwrap_or_default())
    }

    fn close(&self, handle: SnapshotHandle) {
        if !lock(&self.open).remove(&handle) {
            log::warn!("close of unknown handle {:?}", handle);
        }
        self.closes.fetch_add(1, Ordering::Relaxed);
    }
}
