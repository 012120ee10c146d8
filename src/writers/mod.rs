pub mod report_formatter;
pub mod report_writer;

pub use report_formatter::{format_report, sorted_summaries};
pub use report_writer::{OutputFormat, ReportFileInfo, ReportWriter};
