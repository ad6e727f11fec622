use std::path::Path;

use chrono::{DateTime, Local};

/// Marker between the source base name and the timestamp.
pub const REPORT_SUFFIX: &str = "_security_report_";

/// Timestamp layout used in report filenames (second precision).
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Base name of the source file without its final extension.
///
/// `src/net/socket.c` becomes `socket`, `list.tmpl.h` becomes `list.tmpl`.
pub fn report_base_name(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "report".to_string())
}

/// Generate the report filename for a source file:
/// `<base>_security_report_<YYYYMMDD_HHMMSS>.txt`.
pub fn report_filename(file_path: &Path, timestamp: &DateTime<Local>) -> String {
    format!(
        "{}{}{}.txt",
        report_base_name(file_path),
        REPORT_SUFFIX,
        timestamp.format(FILENAME_TIMESTAMP_FORMAT)
    )
}

/// Insert a `_<n>` counter before the `.txt` extension.
pub fn with_sequence(filename: &str, n: usize) -> String {
    match filename.strip_suffix(".txt") {
        Some(stem) => format!("{}_{}.txt", stem, n),
        None => format!("{}_{}", filename, n),
    }
}
