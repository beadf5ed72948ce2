//! Spreadsheet reading

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use ewop_core::config::InputConfig;
use ewop_core::Row;
use std::path::Path;

/// Columns handed to the row processor (A and B)
const COLUMNS: u32 = 2;

/// Reads free-text rows from an xlsx/xls/ods workbook
#[derive(Debug, Clone)]
pub struct SpreadsheetReader {
    skip_rows: usize,
    header: bool,
    sheet: Option<String>,
}

impl SpreadsheetReader {
    /// Create a reader for the given layout
    pub fn new(config: &InputConfig) -> Self {
        Self {
            skip_rows: config.skip_rows,
            header: config.header,
            sheet: config.sheet.clone(),
        }
    }

    /// Read every data row of the selected sheet
    pub fn read(&self, path: &Path) -> Result<Vec<Row>> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

        let sheet = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("Workbook has no sheets: {}", path.display()))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .with_context(|| format!("Failed to read sheet '{sheet}'"))?;

        let rows = self.rows_from_range(&range);
        log::info!("Read {} rows from sheet '{sheet}'", rows.len());
        Ok(rows)
    }

    /// First absolute row index holding data
    fn first_data_row(&self) -> usize {
        self.skip_rows + usize::from(self.header)
    }

    fn rows_from_range(&self, range: &Range<Data>) -> Vec<Row> {
        let Some((end_row, _)) = range.end() else {
            return Vec::new();
        };

        let first = self.first_data_row();
        let last = end_row as usize;
        if first > last {
            return Vec::new();
        }

        (first..=last)
            .map(|row| {
                let row = row as u32;
                Row::new((0..COLUMNS).map(|col| cell_text(range, row, col)).collect())
            })
            .collect()
    }
}

/// Text of a cell addressed by absolute position; `None` when empty
fn cell_text(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col))? {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_workbook(dir: &TempDir, cells: &[(u32, u16, &str)]) -> std::path::PathBuf {
        let path = dir.path().join("input.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for &(row, col, text) in cells {
            worksheet.write_string(row, col, text).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    fn texts(rows: &[Row]) -> Vec<Option<&str>> {
        rows.iter().map(|r| r.text()).collect()
    }

    #[test]
    fn test_skips_title_and_header_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(
            &dir,
            &[
                (0, 0, "Encuesta 2024"),
                (1, 0, "Respuesta"),
                (1, 1, "Fecha"),
                (2, 0, "La casa blanca"),
                (2, 1, "lunes"),
                (3, 0, "El gato negro"),
            ],
        );

        let rows = SpreadsheetReader::new(&InputConfig::default())
            .read(&path)
            .unwrap();
        assert_eq!(texts(&rows), vec![Some("La casa blanca"), Some("El gato negro")]);
        assert_eq!(rows[0].column(1), Some("lunes"));
        assert_eq!(rows[1].column(1), None);
    }

    #[test]
    fn test_blank_cells_become_none() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, &[(0, 0, "uno"), (2, 0, "tres")]);

        let config = InputConfig {
            skip_rows: 0,
            header: false,
            sheet: None,
        };
        let rows = SpreadsheetReader::new(&config).read(&path).unwrap();
        assert_eq!(texts(&rows), vec![Some("uno"), None, Some("tres")]);
    }

    #[test]
    fn test_leading_empty_rows_count_toward_skip() {
        let dir = TempDir::new().unwrap();
        // Rows 0 and 1 are empty, so the used range starts at row 2.
        let path = write_workbook(&dir, &[(2, 0, "primera"), (3, 0, "segunda")]);

        let config = InputConfig {
            skip_rows: 1,
            header: true,
            sheet: None,
        };
        let rows = SpreadsheetReader::new(&config).read(&path).unwrap();
        assert_eq!(texts(&rows), vec![Some("primera"), Some("segunda")]);
    }

    #[test]
    fn test_numbers_rendered_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("numbers.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_number(0, 0, 42).unwrap();
        workbook.save(&path).unwrap();

        let config = InputConfig {
            skip_rows: 0,
            header: false,
            sheet: None,
        };
        let rows = SpreadsheetReader::new(&config).read(&path).unwrap();
        assert_eq!(rows[0].text(), Some("42"));
    }

    #[test]
    fn test_only_header_yields_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, &[(0, 0, "Título"), (1, 0, "Respuesta")]);

        let rows = SpreadsheetReader::new(&InputConfig::default())
            .read(&path)
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_named_sheet_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, &[(0, 0, "x")]);

        let config = InputConfig {
            sheet: Some("Missing".to_string()),
            ..InputConfig::default()
        };
        let err = SpreadsheetReader::new(&config).read(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read sheet 'Missing'"));
    }

    #[test]
    fn test_nonexistent_file() {
        let result = SpreadsheetReader::new(&InputConfig::default())
            .read(Path::new("/nonexistent/ewop-data.xlsx"));
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to open workbook"));
    }
}
