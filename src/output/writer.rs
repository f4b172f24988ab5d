// src/output/writer.rs
//! Performs the actual I/O for a delivery.

use super::types::{DeliveryTarget, OutputReport};
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers rendered content to its target.
pub fn deliver(target: DeliveryTarget) -> Result<OutputReport, AppError> {
    let start = Instant::now();

    let (bytes_written, path) = match &target {
        DeliveryTarget::WriteFile { path, content } => {
            (write_file(path, content)?, Some(path.clone()))
        }
        DeliveryTarget::PrintToStdout { content } => (print_to_stdout(content)?, None),
    };

    let report = OutputReport {
        bytes_written,
        duration_ms: start.elapsed().as_millis() as u64,
        path,
    };
    log::debug!(
        "Delivered {} bytes in {}ms",
        report.bytes_written,
        report.duration_ms
    );
    Ok(report)
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<usize, AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(content.as_bytes())?;
    handle.flush()?;
    Ok(content.len())
}
