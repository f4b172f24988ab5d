// src/output/types.rs
//! Type definitions for output operations.

use clap::ValueEnum;
use std::path::PathBuf;

/// How a page list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One title per line.
    #[default]
    Text,
    /// A JSON document with the root and every collected page.
    Json,
}

/// Where rendered content goes.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories.
    WriteFile { path: PathBuf, content: String },
    /// Print to stdout.
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    /// Picks the file target when a path is given, stdout otherwise.
    pub fn for_destination(path: Option<PathBuf>, content: String) -> Self {
        match path {
            Some(path) => DeliveryTarget::WriteFile { path, content },
            None => DeliveryTarget::PrintToStdout { content },
        }
    }

    pub fn content(&self) -> &str {
        match self {
            DeliveryTarget::WriteFile { content, .. } => content,
            DeliveryTarget::PrintToStdout { content } => content,
        }
    }
}

/// Result of a completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    pub bytes_written: usize,
    pub duration_ms: u64,
    /// Set when the content went to a file.
    pub path: Option<PathBuf>,
}
