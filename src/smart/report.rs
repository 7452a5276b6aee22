//! Diagnostic attribute table

use super::attribute::{RawAttributeRecord, ThresholdRecord};
use super::model::DriveModel;
use std::fmt::Write;

const PLACEHOLDER: &str = "-";

fn row(out: &mut String, cols: [&str; 7]) {
    let _ = writeln!(
        out,
        " {:<3}{:<35}{:<13}{:<6}{:<6}{:<6}{:<8}",
        cols[0], cols[1], cols[2], cols[3], cols[4], cols[5], cols[6]
    );
}

/// Render the attribute table of one drive
///
/// Rows follow the order of `records` and stop at the first ID 0x00.
/// `thresholds` of `None` renders every threshold as a placeholder.
pub fn render(
    model: DriveModel,
    name: &str,
    firmware: &str,
    records: &[RawAttributeRecord],
    thresholds: Option<&[ThresholdRecord]>,
) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }

    let _ = writeln!(out, "{}", model);
    out.push('\n');
    let _ = writeln!(out, "Drive name: {}", name);
    let _ = writeln!(out, "Firmware version: {}", firmware);
    out.push('\n');
    row(
        &mut out,
        ["ID", "Description", "Raw Value", "Worst", "Value", "Thres", "Physical"],
    );

    for record in records.iter().take_while(|r| r.id != 0x00) {
        let threshold = thresholds
            .and_then(|t| t.iter().find(|t| t.id == record.id))
            .map(|t| t.threshold.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let attr = model.attribute(record.id);
        let description = attr.map_or("Unknown", |a| a.name);
        let physical = attr
            .filter(|a| a.has_physical_value())
            .map(|a| a.convert(record).to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        row(
            &mut out,
            [
                &format!("{:02X}", record.id),
                description,
                &record.raw_hex(),
                &record.worst.to_string(),
                &record.value.to_string(),
                &threshold,
                &physical,
            ],
        );
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u8, value: u8, worst: u8, raw: [u8; 6]) -> RawAttributeRecord {
        RawAttributeRecord::new(id, value, worst, raw)
    }

    fn table(report: &str) -> Vec<&str> {
        report.lines().skip(6).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(render(DriveModel::GenericHardDisk, "x", "y", &[], None), "");
    }

    #[test]
    fn test_preamble_and_header() {
        let records = [rec(0x09, 90, 90, [0x10, 0x27, 0, 0, 0, 0])];
        let report = render(DriveModel::GenericHardDisk, "ST2000DM008", "0001", &records, None);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "GenericHardDisk");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Drive name: ST2000DM008");
        assert_eq!(lines[3], "Firmware version: 0001");
        assert_eq!(lines[4], "");
        assert_eq!(
            lines[5],
            " ID Description                        Raw Value    Worst Value Thres Physical"
        );
        assert!(report.ends_with("\n\n"));
    }

    #[test]
    fn test_row_columns() {
        let records = [
            rec(0x09, 90, 88, [0x10, 0x27, 0, 0, 0, 0]),
            rec(0x01, 200, 199, [0; 6]),
            rec(0x99, 100, 100, [0xAB, 0, 0, 0, 0, 0x01]),
        ];
        let thresholds = [ThresholdRecord { id: 0x01, threshold: 51 }];
        let report = render(
            DriveModel::GenericHardDisk,
            "d",
            "f",
            &records,
            Some(&thresholds),
        );
        let rows = table(&report);
        assert_eq!(rows.len(), 3);

        let cols: Vec<&str> = rows[0].split_whitespace().collect();
        assert_eq!(cols, ["09", "Power-On", "Hours", "(POH)", "102700000000", "88", "90", "-", "10000"]);

        // informational attribute: threshold shown, no physical value
        assert!(rows[1].starts_with(" 01 Read Error Rate"));
        assert!(rows[1].trim_end().ends_with("51    -"));

        assert!(rows[2].starts_with(" 99 Unknown"));
        assert!(rows[2].contains("AB0000000001"));
    }

    #[test]
    fn test_stops_at_zero_id() {
        let records = [
            rec(0xC2, 100, 100, [30, 0, 0, 0, 0, 0]),
            rec(0x00, 0, 0, [0; 6]),
            rec(0x09, 100, 100, [1, 0, 0, 0, 0, 0]),
        ];
        let rows_text = render(DriveModel::GenericHardDisk, "d", "f", &records, None);
        let rows = table(&rows_text);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with(" C2 Temperature"));
        assert!(rows[0].trim_end().ends_with("30"));
    }

    #[test]
    fn test_sensor_without_conversion_shows_value() {
        let records = [rec(0xE8, 97, 97, [0; 6])];
        let text = render(DriveModel::IntelSsd, "INTEL SSD", "1", &records, None);
        let rows = table(&text);
        assert!(rows[0].starts_with(" E8 Remaining Life"));
        assert!(rows[0].trim_end().ends_with("97"));
    }

    #[test]
    fn test_fractional_physical_value() {
        // 0x10 * 32 / 1024 GB
        let records = [rec(0xF1, 100, 100, [0x10, 0, 0, 0, 0, 0])];
        let text = render(DriveModel::PlextorSsd, "PLEXTOR", "1", &records, None);
        assert!(table(&text)[0].trim_end().ends_with("0.5"));
    }
}
