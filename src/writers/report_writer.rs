use crate::error::{ProcessingError, Result};
use crate::models::AggregateTable;
use crate::utils::constants::{FORMAT_CSV, FORMAT_JSON, FORMAT_TEXT};
use crate::writers::report_formatter::{format_report, sorted_summaries};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{name=min/mean/max, ...}`
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            FORMAT_TEXT => Ok(OutputFormat::Text),
            FORMAT_JSON => Ok(OutputFormat::Json),
            FORMAT_CSV => Ok(OutputFormat::Csv),
            _ => Err(ProcessingError::InvalidFormat(format!(
                "Unsupported output format: {} (expected text, json or csv)",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => FORMAT_TEXT,
            OutputFormat::Json => FORMAT_JSON,
            OutputFormat::Csv => FORMAT_CSV,
        };
        write!(f, "{}", name)
    }
}

pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: &str) -> Result<Self> {
        self.format = format.parse()?;
        Ok(self)
    }

    /// Write the report for `table` to `path`, creating parent directories.
    ///
    /// The report is rendered before the file is created, so an empty table
    /// fails with `EmptyResult` and leaves nothing on disk.
    pub fn write_report(&self, table: &AggregateTable, path: &Path) -> Result<ReportFileInfo> {
        let contents = self.render(table)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&contents)?;
        writer.flush()?;

        info!(path = %path.display(), format = %self.format, bytes = contents.len(), "report written");

        Ok(ReportFileInfo {
            path: path.to_path_buf(),
            format: self.format,
            stations: table.len(),
            bytes: contents.len(),
        })
    }

    /// Render the report in the configured format.
    pub fn render(&self, table: &AggregateTable) -> Result<Vec<u8>> {
        match self.format {
            OutputFormat::Text => Ok(format_report(table)?.into_bytes()),
            OutputFormat::Json => {
                let summaries = sorted_summaries(table)?;
                let mut json = serde_json::to_vec_pretty(&summaries)?;
                json.push(b'\n');
                Ok(json)
            }
            OutputFormat::Csv => {
                let summaries = sorted_summaries(table)?;
                let mut writer = csv::Writer::from_writer(Vec::new());
                for summary in &summaries {
                    writer.serialize(summary)?;
                }
                writer
                    .into_inner()
                    .map_err(|e| ProcessingError::Io(e.into_error()))
            }
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ReportFileInfo {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub stations: usize,
    pub bytes: usize,
}

impl ReportFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Report: {} ({} format)\nStations: {}\nSize: {} bytes",
            self.path.display(),
            self.format,
            self.stations,
            self.bytes
        )
    }
}
