//! Command-line arguments and the run command

use crate::error::{CliError, CliResult};
use crate::input::SpreadsheetReader;
use crate::output::{JsonWriter, OutputFormat, TableWriter, XlsxWriter};
use crate::progress::ProgressReporter;
use anyhow::Context;
use clap::Parser;
use ewop_core::{
    Config, LabeledTable, LogObserver, NoopObserver, Pipeline, RankObserver, RunOptions,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Count words and adjective-noun phrases in spreadsheet free-text answers
#[derive(Debug, Parser)]
#[command(name = "ewop", version, about)]
pub struct Cli {
    /// Input workbook
    #[arg(short, long, value_name = "FILE", default_value = "ewop-data.xlsx")]
    pub input_file: PathBuf,

    /// Results file
    #[arg(short, long, value_name = "FILE", default_value = "ewop-results.xlsx")]
    pub output_file: PathBuf,

    /// Configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", default_value = "ewop-config.yaml")]
    pub config_file: PathBuf,

    /// Output format (default: from the output file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show additional debug info
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Spread rows across worker threads
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for --parallel (default: all cores)
    #[arg(short, long, value_name = "N", requires = "parallel")]
    pub threads: Option<usize>,
}

impl Cli {
    /// Execute the run
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging()?;

        log::info!("Starting word processing");
        log::debug!("Arguments: {:?}", self);

        let config = Config::from_file(&self.config_file)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        let pipeline =
            Pipeline::new(&config).map_err(|e| CliError::ConfigError(e.to_string()))?;

        let rows = SpreadsheetReader::new(&config.input)
            .read(&self.input_file)
            .map_err(|e| CliError::InputRead(format!("{e:#}")))?;

        if self.parallel {
            self.init_thread_pool()?;
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_rows(rows.len() as u64);
        let tick = || progress.row_completed();

        let observer: &dyn RankObserver = if self.verbose {
            &LogObserver
        } else {
            &NoopObserver
        };
        let options = RunOptions {
            parallel: self.parallel,
            observer,
            progress: Some(&tick),
        };

        let output = pipeline
            .run_with(&rows, &options)
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;
        progress.finish();

        self.write_output(&output.tables)
            .map_err(|e| CliError::OutputWrite(format!("{e:#}")))?;

        let report = &output.report;
        log::info!(
            "Processed {} rows into {} tables: {}",
            report.rows,
            output.tables.len(),
            self.output_file.display()
        );
        if let Some(words) = report.distinct_words {
            log::info!("Distinct words: {words}");
        }
        if let Some(phrases) = report.distinct_phrases {
            log::info!("Distinct phrases: {phrases}");
        }
        Ok(())
    }

    /// Format actually used for the results file
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output_file))
    }

    fn write_output(&self, tables: &[LabeledTable]) -> CliResult<()> {
        let mut writer: Box<dyn TableWriter> = match self.output_format() {
            OutputFormat::Xlsx => Box::new(XlsxWriter::new(&self.output_file)),
            OutputFormat::Json => {
                let file = File::create(&self.output_file).with_context(|| {
                    format!("Failed to create {}", self.output_file.display())
                })?;
                Box::new(JsonWriter::new(BufWriter::new(file)))
            }
        };

        for labeled in tables {
            writer.write_table(labeled.label, &labeled.table)?;
        }
        writer.finish()
    }

    fn init_thread_pool(&self) -> CliResult<()> {
        let threads = self.threads.unwrap_or_else(num_cpus::get);
        log::debug!("Using {threads} worker threads");

        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> CliResult<()> {
        let log_level = if self.verbose { "debug" } else { "info" };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }

        Ok(())
    }
}
