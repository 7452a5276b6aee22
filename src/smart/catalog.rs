//! Attribute catalogs for each supported drive model
//!
//! Entry order matters: when two entries feed the same sensor kind and
//! channel, the first one present on the drive gets the sensor.

use super::attribute::{
    normalized_value, raw_first_byte, raw_to_int, AttributeDefinition as Attr, RawAttributeRecord,
};
use super::sensor::SensorKind::{Data, Level, Temperature};

/// Host writes/reads counted in 32 MiB units, reported in GB
fn raw_32mib_to_gb(record: &RawAttributeRecord) -> f32 {
    32.0 * raw_to_int(record) / 1024.0
}

/// Host writes counted in 32 MiB units on Intel controllers
fn raw_intel_writes(record: &RawAttributeRecord) -> f32 {
    raw_to_int(record) / 32.0
}

pub static PLEXTOR_SSD: &[Attr] = &[
    Attr::new(0x01, "Read Error Rate"),
    Attr::new(0x05, "Reallocated Sectors Count").with_conversion(raw_to_int),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0xAA, "Wear Leveling Count").with_conversion(raw_to_int),
    Attr::new(0xAB, "Program Fail Count").with_conversion(raw_to_int),
    Attr::new(0xAC, "Erase Fail Count").with_conversion(raw_to_int),
    Attr::new(0xC0, "Unsafe Shutdown Count").with_conversion(raw_to_int),
    Attr::new(0xC4, "Reallocation Event Count").with_conversion(raw_to_int),
    Attr::new(0xC7, "UltraDMA CRC Error Count").with_conversion(raw_to_int),
    Attr::new(0xF1, "Host Writes")
        .with_conversion(raw_32mib_to_gb)
        .with_sensor(Data, 0),
    Attr::new(0xF2, "Host Reads")
        .with_conversion(raw_32mib_to_gb)
        .with_sensor(Data, 1),
];

pub static INTEL_SSD: &[Attr] = &[
    Attr::new(0x01, "Read Error Rate"),
    Attr::new(0x03, "Spin-Up Time"),
    Attr::new(0x04, "Start/Stop Count").with_conversion(raw_to_int),
    Attr::new(0x05, "Reallocated Sectors Count"),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0xAA, "Available Reserved Space"),
    Attr::new(0xAB, "Program Fail Count"),
    Attr::new(0xAC, "Erase Fail Count"),
    Attr::new(0xB8, "End-to-End Error"),
    Attr::new(0xC0, "Unsafe Shutdown Count"),
    Attr::new(0xE1, "Host Writes")
        .with_conversion(raw_intel_writes)
        .with_sensor(Data, 0),
    Attr::new(0xE8, "Remaining Life").with_sensor(Level, 0),
    Attr::new(0xE9, "Media Wearout Indicator"),
    Attr::new(0xF1, "Host Writes")
        .with_conversion(raw_intel_writes)
        .with_sensor(Data, 0),
    Attr::new(0xF2, "Host Reads")
        .with_conversion(raw_intel_writes)
        .with_sensor(Data, 1),
];

pub static SANDFORCE_SSD: &[Attr] = &[
    Attr::new(0x01, "Raw Read Error Rate"),
    Attr::new(0x05, "Retired Block Count").with_conversion(raw_to_int),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0xAB, "Program Fail Count").with_conversion(raw_to_int),
    Attr::new(0xAC, "Erase Fail Count").with_conversion(raw_to_int),
    Attr::new(0xAE, "Unexpected Power Loss Count").with_conversion(raw_to_int),
    Attr::new(0xB1, "Wear Range Delta").with_conversion(raw_to_int),
    Attr::new(0xB5, "Alternative Program Fail Count").with_conversion(raw_to_int),
    Attr::new(0xB6, "Alternative Erase Fail Count").with_conversion(raw_to_int),
    Attr::new(0xBB, "Uncorrectable Error Count").with_conversion(raw_to_int),
    Attr::new(0xC2, "Temperature")
        .with_conversion(raw_first_byte)
        .with_sensor(Temperature, 0)
        .hidden(),
    Attr::new(0xC3, "Unrecoverable ECC"),
    Attr::new(0xC4, "Reallocation Event Count").with_conversion(raw_to_int),
    Attr::new(0xE7, "Remaining Life").with_sensor(Level, 0),
    Attr::new(0xE9, "Controller Writes to NAND")
        .with_conversion(raw_to_int)
        .with_sensor(Data, 0),
    Attr::new(0xEA, "Host Writes to Controller")
        .with_conversion(raw_to_int)
        .with_sensor(Data, 1),
    Attr::new(0xF1, "Host Writes")
        .with_conversion(raw_to_int)
        .with_sensor(Data, 1),
    Attr::new(0xF2, "Host Reads")
        .with_conversion(raw_to_int)
        .with_sensor(Data, 2),
];

pub static INDILINX_SSD: &[Attr] = &[
    Attr::new(0x01, "Read Error Rate"),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0xB8, "Initial Bad Block Count"),
    Attr::new(0xC3, "Program Failure"),
    Attr::new(0xC4, "Erase Failure"),
    Attr::new(0xC5, "Read Failure"),
    Attr::new(0xC6, "Sectors Read"),
    Attr::new(0xC7, "Sectors Written"),
    Attr::new(0xC8, "Read Commands"),
    Attr::new(0xC9, "Write Commands"),
    Attr::new(0xCA, "Error Bits from Flash"),
    Attr::new(0xCB, "Corrected Errors"),
    Attr::new(0xCC, "Bad Block Full Flag"),
    Attr::new(0xCD, "Max Cell Cycles"),
    Attr::new(0xCE, "Min Erase"),
    Attr::new(0xCF, "Max Erase"),
    Attr::new(0xD0, "Average Erase Count"),
    Attr::new(0xD1, "Remaining Life").with_sensor(Level, 0),
    Attr::new(0xD2, "Unknown Unique"),
    Attr::new(0xD3, "SATA Error Count CRC"),
    Attr::new(0xD4, "SATA Error Count Handshake"),
];

pub static SAMSUNG_SSD: &[Attr] = &[
    Attr::new(0x05, "Reallocated Sectors Count"),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0xAF, "Program Fail Count (Chip)").with_conversion(raw_to_int),
    Attr::new(0xB0, "Erase Fail Count (Chip)").with_conversion(raw_to_int),
    Attr::new(0xB1, "Wear Leveling Count")
        .with_conversion(normalized_value)
        .with_sensor(Level, 0),
    Attr::new(0xB2, "Used Reserved Block Count (Chip)").with_conversion(raw_to_int),
    Attr::new(0xB3, "Used Reserved Block Count (Total)").with_conversion(raw_to_int),
    Attr::new(0xB4, "Unused Reserved Block Count (Total)").with_conversion(raw_to_int),
    Attr::new(0xB5, "Program Fail Count (Total)").with_conversion(raw_to_int),
    Attr::new(0xB6, "Erase Fail Count (Total)").with_conversion(raw_to_int),
    Attr::new(0xB7, "Runtime Bad Block (Total)").with_conversion(raw_to_int),
    Attr::new(0xBB, "Uncorrectable Error Count").with_conversion(raw_to_int),
    Attr::new(0xBE, "Temperature")
        .with_conversion(raw_first_byte)
        .with_sensor(Temperature, 0)
        .hidden(),
    Attr::new(0xC2, "Airflow Temperature"),
    Attr::new(0xC3, "ECC Rate"),
    Attr::new(0xC6, "Off-Line Uncorrectable Error Count").with_conversion(raw_to_int),
    Attr::new(0xC7, "CRC Error Count").with_conversion(raw_to_int),
    Attr::new(0xC9, "Supercap Status"),
    Attr::new(0xCA, "Exception Mode Status"),
    Attr::new(0xEB, "Power Recovery Count").with_conversion(raw_to_int),
    Attr::new(0xF1, "Total LBAs Written").with_conversion(raw_to_int),
];

pub static GENERIC_HARD_DISK: &[Attr] = &[
    Attr::new(0x01, "Read Error Rate"),
    Attr::new(0x02, "Throughput Performance"),
    Attr::new(0x03, "Spin-Up Time"),
    Attr::new(0x04, "Start/Stop Count").with_conversion(raw_to_int),
    Attr::new(0x05, "Reallocated Sectors Count"),
    Attr::new(0x06, "Read Channel Margin"),
    Attr::new(0x07, "Seek Error Rate"),
    Attr::new(0x08, "Seek Time Performance"),
    Attr::new(0x09, "Power-On Hours (POH)").with_conversion(raw_to_int),
    Attr::new(0x0A, "Spin Retry Count"),
    Attr::new(0x0B, "Recalibration Retries"),
    Attr::new(0x0C, "Power Cycle Count").with_conversion(raw_to_int),
    Attr::new(0x0D, "Soft Read Error Rate"),
    Attr::new(0xAA, "Unknown"),
    Attr::new(0xAB, "Unknown"),
    Attr::new(0xAC, "Unknown"),
    Attr::new(0xB7, "SATA Downshift Error Count"),
    Attr::new(0xB8, "End-to-End Error"),
    Attr::new(0xB9, "Head Stability"),
    Attr::new(0xBA, "Induced Op-Vibration Detection"),
    Attr::new(0xBB, "Reported Uncorrectable Errors"),
    Attr::new(0xBC, "Command Timeout"),
    Attr::new(0xBD, "High Fly Writes"),
    Attr::new(0xBE, "Airflow Temperature")
        .with_conversion(raw_first_byte)
        .with_sensor(Temperature, 0),
    Attr::new(0xBF, "G-Sense Error Rate"),
    Attr::new(0xC0, "Emergency Retract Cycle Count"),
    Attr::new(0xC1, "Load Cycle Count"),
    Attr::new(0xC2, "Temperature")
        .with_conversion(raw_first_byte)
        .with_sensor(Temperature, 0),
    Attr::new(0xC3, "Hardware ECC Recovered"),
    Attr::new(0xC4, "Reallocation Event Count"),
    Attr::new(0xC5, "Current Pending Sector Count"),
    Attr::new(0xC6, "Uncorrectable Sector Count"),
    Attr::new(0xC7, "UltraDMA CRC Error Count"),
    Attr::new(0xC8, "Write Error Rate"),
    Attr::new(0xCA, "Data Address Mark errors"),
    Attr::new(0xCB, "Run Out Cancel"),
    Attr::new(0xCC, "Soft ECC Correction"),
    Attr::new(0xCD, "Thermal Asperity Rate (TAR)"),
    Attr::new(0xCE, "Flying Height"),
    Attr::new(0xCF, "Spin High Current"),
    Attr::new(0xD0, "Spin Buzz"),
    Attr::new(0xD1, "Offline Seek Performance"),
    Attr::new(0xD3, "Vibration During Write"),
    Attr::new(0xD4, "Shock During Write"),
    Attr::new(0xDC, "Disk Shift"),
    Attr::new(0xDD, "Alternative G-Sense Error Rate"),
    Attr::new(0xDE, "Loaded Hours"),
    Attr::new(0xDF, "Load/Unload Retry Count"),
    Attr::new(0xE0, "Load Friction"),
    Attr::new(0xE1, "Load/Unload Cycle Count"),
    Attr::new(0xE2, "Load-in Time"),
    Attr::new(0xE3, "Torque Amplification Count"),
    Attr::new(0xE4, "Power-Off Retract Cycle"),
    Attr::new(0xE6, "GMR Head Amplitude"),
    Attr::new(0xE7, "Temperature")
        .with_conversion(raw_first_byte)
        .with_sensor(Temperature, 0),
    Attr::new(0xE8, "Endurance Remaining"),
    Attr::new(0xE9, "Power-On Hours"),
    Attr::new(0xF0, "Head Flying Hours"),
    Attr::new(0xF1, "Total LBAs Written"),
    Attr::new(0xF2, "Total LBAs Read"),
    Attr::new(0xFA, "Read Error Retry Rate"),
    Attr::new(0xFE, "Free Fall Protection"),
];

/// Extra sensor owned by SandForce drives, kind `Factor`
pub const WRITE_AMPLIFICATION_NAME: &str = "Write Amplification";
pub const WRITE_AMPLIFICATION_CHANNEL: u32 = 1;

/// Controller writes to NAND over host writes to controller
pub fn write_amplification(controller_writes: f32, host_writes: f32) -> f32 {
    if host_writes > 0.0 {
        controller_writes / host_writes
    } else {
        0.0
    }
}
