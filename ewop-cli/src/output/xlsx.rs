//! Excel workbook writer

use super::TableWriter;
use anyhow::{Context, Result};
use ewop_core::RankedTable;
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;

/// Header of the count column; the key column header is left blank
const COUNT_HEADER: &str = "count";

/// Writes each table to its own worksheet and saves on `finish`
pub struct XlsxWriter {
    path: PathBuf,
    workbook: Workbook,
    sheets: usize,
}

impl XlsxWriter {
    /// Create a writer targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workbook: Workbook::new(),
            sheets: 0,
        }
    }
}

impl TableWriter for XlsxWriter {
    fn write_table(&mut self, label: &str, table: &RankedTable) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(label)
            .with_context(|| format!("Invalid sheet name: {label}"))?;

        worksheet.write_string(0, 1, COUNT_HEADER)?;
        for (i, (key, count)) in table.iter().enumerate() {
            let row = u32::try_from(i + 1).context("Table exceeds worksheet row limit")?;
            worksheet.write_string(row, 0, key)?;
            worksheet.write_number(row, 1, count as f64)?;
        }

        self.sheets += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.sheets == 0 {
            // A workbook needs at least one sheet.
            self.workbook.add_worksheet();
        }

        self.workbook
            .save(&self.path)
            .with_context(|| format!("Failed to save workbook: {}", self.path.display()))?;
        Ok(())
    }
}
