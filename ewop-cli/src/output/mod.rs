//! Output writing module

use anyhow::Result;
use ewop_core::RankedTable;
use std::path::Path;

/// Trait for result writers
pub trait TableWriter {
    /// Add one labelled table
    fn write_table(&mut self, label: &str, table: &RankedTable) -> Result<()>;

    /// Finalize output (e.g., save the workbook)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod xlsx;

pub use json::JsonWriter;
pub use xlsx::XlsxWriter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook, one sheet per table
    Xlsx,
    /// JSON object keyed by table label
    Json,
}

impl OutputFormat {
    /// Pick a format from the file extension, defaulting to xlsx
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Xlsx,
        }
    }
}
