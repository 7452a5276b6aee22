//! All S.M.A.R.T. drives reachable through one transport

use super::device::SmartDrive;
use super::transport::SmartTransport;
use crate::config::Config;
use crate::error::{Result, SmartError};
use log::{debug, info, warn};

/// Drives discovered by probing consecutive indices
#[derive(Debug)]
pub struct DriveGroup<T: SmartTransport + Clone> {
    drives: Vec<SmartDrive<T>>,
}

impl<T: SmartTransport + Clone> DriveGroup<T> {
    /// Probe indices `0..max_drives`, keeping every supported drive
    pub fn discover(transport: T, config: &Config) -> Self {
        let mut drives = Vec::new();

        for index in 0..config.storage.max_drives {
            match SmartDrive::probe(transport.clone(), index, config) {
                Ok(Some(drive)) => drives.push(drive),
                Ok(None) => {}
                Err(SmartError::InvalidHandle(_)) => debug!("no drive at index {}", index),
                Err(e) => warn!("failed to probe drive {}: {}", index, e),
            }
        }

        info!("discovered {} S.M.A.R.T. drives", drives.len());
        Self { drives }
    }

    pub fn drives(&self) -> &[SmartDrive<T>] {
        &self.drives
    }

    pub fn drives_mut(&mut self) -> &mut [SmartDrive<T>] {
        &mut self.drives
    }

    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drives.len()
    }

    /// Tick every drive; a failing drive does not stop the others
    pub fn update_all(&mut self) {
        for drive in &mut self.drives {
            if let Err(e) = drive.update() {
                warn!("drive {}: update failed: {}", drive.index(), e);
            }
        }
    }

    /// Concatenated reports of all drives; a failing drive is logged and skipped
    pub fn report(&self) -> String {
        let mut out = String::new();
        for drive in &self.drives {
            match drive.report() {
                Ok(report) => out.push_str(&report),
                Err(e) => warn!("drive {}: report failed: {}", drive.index(), e),
            }
        }
        out
    }

    /// Close every drive, returning the first error
    pub fn close(&mut self) -> Result<()> {
        let mut first = None;
        for drive in &mut self.drives {
            if let Err(e) = drive.close() {
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}
