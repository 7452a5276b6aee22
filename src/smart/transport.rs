//! Transport capability for S.M.A.R.T. queries
//!
//! Implementations open a drive by index and issue the vendor health-data
//! queries. Reads are synchronous and may block for as long as the
//! underlying device query does.

use super::attribute::{RawAttributeRecord, ThresholdRecord};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Model name and firmware revision reported by a drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveName {
    pub name: String,
    pub firmware: String,
}

/// Low-level access to drive health data
pub trait SmartTransport {
    /// Open drive handle
    type Handle: Copy + fmt::Debug;

    /// Open a drive, failing with [`SmartError::InvalidHandle`](crate::SmartError::InvalidHandle)
    /// when no drive exists at `index`
    fn open(&self, index: usize) -> Result<Self::Handle>;

    /// Turn on health reporting, returning whether it is enabled
    fn enable_smart(&self, handle: Self::Handle, index: usize) -> bool;

    /// Read model name and firmware revision; `None` when the identify data is invalid
    fn read_name(&self, handle: Self::Handle, index: usize) -> Option<DriveName>;

    /// Read the attribute table. An empty table is a valid result.
    fn read_attributes(&self, handle: Self::Handle, index: usize)
        -> Result<Vec<RawAttributeRecord>>;

    fn read_thresholds(&self, handle: Self::Handle, index: usize) -> Result<Vec<ThresholdRecord>>;

    fn close(&self, handle: Self::Handle);
}

impl<T: SmartTransport + ?Sized> SmartTransport for Arc<T> {
    type Handle = T::Handle;

    fn open(&self, index: usize) -> Result<Self::Handle> {
        (**self).open(index)
    }

    fn enable_smart(&self, handle: Self::Handle, index: usize) -> bool {
        (**self).enable_smart(handle, index)
    }

    fn read_name(&self, handle: Self::Handle, index: usize) -> Option<DriveName> {
        (**self).read_name(handle, index)
    }

    fn read_attributes(
        &self,
        handle: Self::Handle,
        index: usize,
    ) -> Result<Vec<RawAttributeRecord>> {
        (**self).read_attributes(handle, index)
    }

    fn read_thresholds(&self, handle: Self::Handle, index: usize) -> Result<Vec<ThresholdRecord>> {
        (**self).read_thresholds(handle, index)
    }

    fn close(&self, handle: Self::Handle) {
        (**self).close(handle)
    }
}
