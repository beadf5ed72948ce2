//! Input handling module

pub mod spreadsheet;

pub use spreadsheet::SpreadsheetReader;
