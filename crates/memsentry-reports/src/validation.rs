use std::path::Path;

use crate::writer::ReportError;

/// Check that reports can be written into `dir`.
///
/// The directory is not created; it must already exist. Writability is
/// checked by creating and removing a scratch file, so ownership and ACLs
/// are taken into account.
pub fn validate_output_directory(dir: &Path) -> Result<(), ReportError> {
    let unusable = |reason: &str| ReportError::OutputDirectory {
        path: dir.to_path_buf(),
        reason: reason.to_string(),
    };

    if !dir.exists() {
        return Err(unusable("directory does not exist"));
    }
    if !dir.is_dir() {
        return Err(unusable("not a directory"));
    }

    tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| unusable(&format!("directory is not writable: {}", e)))?;

    Ok(())
}
