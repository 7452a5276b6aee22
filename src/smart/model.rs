//! Drive model classification
//!
//! A drive is matched against [`DriveModel::ALL`] in order. A model is
//! selected when every attribute it requires is present and the drive name
//! starts with one of its prefixes. Vendor rules come first; the generic
//! hard disk requires nothing and matches any name.

use super::attribute::{AttributeDefinition, RawAttributeRecord};
use super::catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Recognized drive model, each with its own attribute catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveModel {
    PlextorSsd,
    IntelSsd,
    SandforceSsd,
    IndilinxSsd,
    SamsungSsd,
    GenericHardDisk,
}

impl DriveModel {
    /// Classification order
    pub const ALL: [DriveModel; 6] = [
        DriveModel::PlextorSsd,
        DriveModel::IntelSsd,
        DriveModel::SandforceSsd,
        DriveModel::IndilinxSsd,
        DriveModel::SamsungSsd,
        DriveModel::GenericHardDisk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DriveModel::PlextorSsd => "PlextorSSD",
            DriveModel::IntelSsd => "IntelSSD",
            DriveModel::SandforceSsd => "SandforceSSD",
            DriveModel::IndilinxSsd => "IndilinxSSD",
            DriveModel::SamsungSsd => "SamsungSSD",
            DriveModel::GenericHardDisk => "GenericHardDisk",
        }
    }

    /// Drive name prefixes, compared ordinally and case-sensitively
    pub fn name_prefixes(self) -> &'static [&'static str] {
        match self {
            DriveModel::PlextorSsd => &["PLEXTOR"],
            DriveModel::IntelSsd => &["INTEL SSD"],
            _ => &[""],
        }
    }

    /// Attribute IDs a drive must report to be this model
    pub fn required_attributes(self) -> &'static [u8] {
        match self {
            DriveModel::PlextorSsd => &[0x05],
            DriveModel::IntelSsd => &[0xE1, 0xE8, 0xE9],
            DriveModel::SandforceSsd => &[0xAB, 0xB1],
            DriveModel::IndilinxSsd => &[0x01, 0x09, 0x0C, 0xD1, 0xCE, 0xCF],
            DriveModel::SamsungSsd => &[0xB1, 0xB3, 0xB5, 0xB6, 0xB7, 0xBB, 0xC3, 0xC7],
            DriveModel::GenericHardDisk => &[],
        }
    }

    pub fn catalog(self) -> &'static [AttributeDefinition] {
        match self {
            DriveModel::PlextorSsd => catalog::PLEXTOR_SSD,
            DriveModel::IntelSsd => catalog::INTEL_SSD,
            DriveModel::SandforceSsd => catalog::SANDFORCE_SSD,
            DriveModel::IndilinxSsd => catalog::INDILINX_SSD,
            DriveModel::SamsungSsd => catalog::SAMSUNG_SSD,
            DriveModel::GenericHardDisk => catalog::GENERIC_HARD_DISK,
        }
    }

    /// Catalog entry for an attribute ID
    pub fn attribute(self, id: u8) -> Option<&'static AttributeDefinition> {
        self.catalog().iter().find(|a| a.id == id)
    }

    fn matches(self, name: &str, present: &BTreeSet<u8>) -> bool {
        self.required_attributes()
            .iter()
            .all(|id| present.contains(id))
            && self
                .name_prefixes()
                .iter()
                .any(|prefix| name.starts_with(*prefix))
    }
}

impl fmt::Display for DriveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// IDs of all records in one read
pub fn present_identifiers(records: &[RawAttributeRecord]) -> BTreeSet<u8> {
    records.iter().map(|r| r.id).collect()
}

/// Select the first model in [`DriveModel::ALL`] matching the drive
pub fn classify(name: &str, present: &BTreeSet<u8>) -> Option<DriveModel> {
    let model = DriveModel::ALL
        .into_iter()
        .find(|model| model.matches(name, present));
    log::debug!(
        "classified {:?} with {} attributes as {:?}",
        name,
        present.len(),
        model
    );
    model
}
