//! Query-parameter file handling
//!
//! The params file is the CLI's stand-in for a URL query string: a flat JSON
//! object whose values are strings or string arrays.

use std::fs;
use std::path::Path;

use sift_core::QueryParams;

use crate::errors::CliError;
use crate::ui;

/// Load query parameters. No path or a missing file yields an empty map.
pub fn load_params(path: Option<&Path>) -> Result<QueryParams, CliError> {
    let Some(path) = path else {
        return Ok(QueryParams::new());
    };
    if !path.exists() {
        log::debug!("params file {} does not exist yet", path.display());
        return Ok(QueryParams::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ui::error_with_details("Couldn't read params file", &e.to_string());
        CliError::FileError
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        ui::error_with_details("Couldn't parse params file", &e.to_string());
        CliError::FileError
    })
}

/// Write query parameters back, when a path was supplied.
pub fn save_params(path: Option<&Path>, params: &QueryParams) -> Result<(), CliError> {
    let Some(path) = path else {
        return Ok(());
    };

    let contents = serde_json::to_string_pretty(params).map_err(|e| {
        ui::error_with_details("Couldn't serialize params", &e.to_string());
        CliError::FileError
    })?;

    fs::write(path, contents).map_err(|e| {
        ui::error_with_details("Couldn't write params file", &e.to_string());
        CliError::FileError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::ParamValue;

    #[test]
    fn test_missing_file_is_empty_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = load_params(Some(&path)).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_no_path_is_empty_params() {
        assert!(load_params(None).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let mut params = QueryParams::new();
        params.insert("status".into(), ParamValue::from("active"));
        params.insert(
            "tags".into(),
            ParamValue::Many(vec!["icu".into(), "er".into()]),
        );

        save_params(Some(&path), &params).unwrap();
        assert_eq!(load_params(Some(&path)).unwrap(), params);
    }

    #[test]
    fn test_garbage_file_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_params(Some(&path)), Err(CliError::FileError));
    }
}
