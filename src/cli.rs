// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use crate::types::SensorKind;

/// Capture sensor readings from a serial port and plot them.
///
/// Reads until Ctrl+C, then shows two charts of the captured data.
#[derive(Parser, Debug)]
#[command(name = "serial-plotter", version, about)]
pub struct Cli {
    /// Which firmware report to parse
    #[arg(value_enum, default_value_t = SensorKind::Adc)]
    pub sensor: SensorKind,

    /// Serial port to open; skips port selection
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long, default_value_t = 9600)]
    pub baud: u32,

    /// Per-read timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Also write both charts to this PNG file
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Do not open the plot window
    #[arg(long)]
    pub no_gui: bool,

    /// Enable debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
