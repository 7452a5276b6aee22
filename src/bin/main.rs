//! CLI tool for Drive Sense (drivesense)

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "drivesense")]
#[command(about = "Drive Sense: S.M.A.R.T. drive classification, sensors and reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Drive snapshot file (.toml or .json)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Configuration file (defaults to the user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Show the model selected for each drive
    Classify,
    /// Print the diagnostic attribute table of each drive
    Report,
    /// Run update ticks and print active sensors
    Monitor {
        /// Number of update ticks
        #[arg(short, long, default_value = "1")]
        ticks: u32,

        /// Seconds between ticks
        #[arg(short, long, default_value = "0.0")]
        interval: f64,
    },
}

#[cfg(feature = "cli")]
#[derive(serde::Serialize)]
struct DriveSummary<'a> {
    index: usize,
    name: &'a str,
    firmware: &'a str,
    model: drivesense::DriveModel,
    sensors: Vec<&'a drivesense::Sensor>,
}

#[cfg(feature = "cli")]
fn summaries<T: drivesense::SmartTransport + Clone>(
    group: &drivesense::DriveGroup<T>,
) -> Vec<DriveSummary<'_>> {
    group
        .drives()
        .iter()
        .map(|d| DriveSummary {
            index: d.index(),
            name: d.name(),
            firmware: d.firmware(),
            model: d.model(),
            sensors: d.node().active_sensors().collect(),
        })
        .collect()
}

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use drivesense::{Config, DriveGroup, SnapshotTransport};
    use std::sync::Arc;
    use std::time::Duration;

    let cli = Cli::parse();

    env_logger::init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let transport = Arc::new(SnapshotTransport::load(&cli.snapshot)?);
    let mut group = DriveGroup::discover(transport, &config);

    match &cli.command {
        Commands::Classify => {
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&summaries(&group))?);
            } else {
                for drive in group.drives() {
                    println!(
                        "{:>3}  {:<40} {:<10} {}",
                        drive.index(),
                        drive.name(),
                        drive.firmware(),
                        drive.model()
                    );
                }
            }
        }
        Commands::Report => {
            print!("{}", group.report());
        }
        Commands::Monitor { ticks, interval } => {
            for tick in 0..*ticks {
                if tick > 0 && *interval > 0.0 {
                    std::thread::sleep(Duration::from_secs_f64(*interval));
                }
                group.update_all();
            }
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&summaries(&group))?);
            } else {
                for drive in group.drives() {
                    println!("{} ({})", drive.name(), drive.model());
                    drive.for_each_sensor(&mut |s: &drivesense::Sensor| {
                        let value = s
                            .value
                            .map(|v| format!("{:.1}", v))
                            .unwrap_or_else(|| "-".to_string());
                        let hidden = if s.hidden { " (hidden)" } else { "" };
                        println!("  {:<28} {:>10}  {}{}", s.name, value, s.identifier, hidden);
                    });
                }
            }
        }
    }

    group.close()?;
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_monitor() {
        let cli = Cli::try_parse_from([
            "drivesense",
            "--snapshot",
            "demos/drives.toml",
            "monitor",
            "--ticks",
            "3",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("demos/drives.toml"));
        assert_eq!(cli.format, "json");
        assert!(matches!(cli.command, Commands::Monitor { ticks: 3, .. }));
    }

    #[test]
    fn test_snapshot_required() {
        assert!(Cli::try_parse_from(["drivesense", "classify"]).is_err());
    }
}
