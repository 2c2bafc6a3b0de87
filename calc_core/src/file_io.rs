//! # File I/O Module
//!
//! File helpers used by the presentation layer:
//! - **Reading input**: load a text file to feed a calculator (e.g., a list
//!   of numbers for the statistics tool)
//! - **Atomic writes**: write to `.tmp`, sync, rename, so an exported result
//!   is never left half written
//! - **Settings files**: JSON settings with schema version validation
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_settings, read_text, write_text_atomic};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("reckon.json"))?;
//! let data = read_text(Path::new("scores.txt"))?;
//! write_text_atomic(Path::new("summary.txt"), &data)?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::settings::{Settings, SCHEMA_VERSION};

/// Read a whole UTF-8 text file.
pub fn read_text(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "read input file");
    Ok(contents)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write text with atomic replace semantics.
///
/// The save process:
/// 1. Write to a temporary file next to the target (`<name>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_text_atomic(path: &Path, text: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(text.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = text.len(), "wrote output file");
    Ok(())
}

/// Save settings as pretty JSON (atomic).
pub fn save_settings(settings: &Settings, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(settings)?;
    write_text_atomic(path, &json)
}

/// Load and validate a settings file.
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded settings
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<Settings> {
    let contents = read_text(path)?;

    let settings: Settings = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&settings.version)?;
    settings.validate()?;
    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("reckon_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/out.json"));
        assert_eq!(tmp, Path::new("/path/to/out.json.tmp"));
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let path = temp_path("roundtrip.txt");
        write_text_atomic(&path, "1, 2, 3\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "1, 2, 3\n");
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_text(&temp_path("does_not_exist.txt")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("settings.json");
        let mut settings = Settings::default();
        settings.reading_wpm = 240;
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.reading_wpm, 240);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_invalid_json() {
        let path = temp_path("bad_settings.json");
        write_text_atomic(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
