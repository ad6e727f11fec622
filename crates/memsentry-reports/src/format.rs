//! Fixed-width text envelope around a model completion.

use chrono::{DateTime, Local};
use memsentry_core::Completion;

pub const RULE_WIDTH: usize = 80;
pub const REPORT_TITLE: &str = "CODE SECURITY AND MEMORY ANALYSIS REPORT";
pub const ANALYZER_NAME: &str = "LLM-based Security Agent";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wrap the completion content in the report envelope.
///
/// The content is copied verbatim; nothing is escaped or trimmed.
pub fn format_report(filename: &str, completion: &Completion, timestamp: &DateTime<Local>) -> String {
    let banner = "=".repeat(RULE_WIDTH);
    let divider = "-".repeat(RULE_WIDTH);

    format!(
        "{banner}\n\
         {title}\n\
         {banner}\n\
         File Analyzed: {filename}\n\
         Analysis Date: {date}\n\
         Analyzer: {analyzer}\n\
         {banner}\n\
         \n\
         ANALYSIS RESULTS:\n\
         {divider}\n\
         {content}\n\
         {divider}\n\
         {banner}\n\
         END OF REPORT\n\
         {banner}\n",
        banner = banner,
        divider = divider,
        title = REPORT_TITLE,
        filename = filename,
        date = timestamp.format(DATE_FORMAT),
        analyzer = ANALYZER_NAME,
        content = completion.content,
    )
}
