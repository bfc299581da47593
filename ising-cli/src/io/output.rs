//! Output destinations and logging utilities

use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // Format as HH:MM:SS (only seconds precision)
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Setup logging to a file or stdout
pub fn setup_output(log_path: Option<&String>, verbose: u8) {
    let level = level_for(verbose);
    match log_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false)
                    .with_filter(level);
                Registry::default().with(file_layer).init();
                info!("Log will be written to: {}", path);
            } else {
                eprintln!("Could not create log file: {}", path);
            }
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }
}

/// Destination for rendered frames: a buffered file, or stdout
pub fn open_frames(path: Option<&String>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Unable to create frame output file: {}", path))?;
            info!("Frames will be written to: {}", path);
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
