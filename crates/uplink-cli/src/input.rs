//! Uplink input: JSON files (optionally via a glob) and inline hex payloads.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::glob;
use uplink_core::Uplink;

use crate::CliError;

/// Read an uplink JSON file. A literal `null` document yields `None`.
pub fn read_uplink(path: &Path) -> Result<Option<Uplink>, CliError> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| {
        CliError::new(
            format!("invalid uplink JSON in {}: {}", path.display(), err),
            Some(r#"expected {"bytes": [...], "fPort": n} or null"#.to_string()),
        )
    })
}

/// Decode an inline hex payload such as `0175570367` or `01 75 57`.
pub fn parse_hex(raw: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    hex::decode(&digits).map_err(|err| {
        CliError::new(
            format!("invalid hex payload '{}': {}", raw, err),
            Some("use an even number of hex digits, e.g. --hex 017557".to_string()),
        )
    })
}

pub fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass an uplink .json file or use --hex".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass an uplink .json file or use --hex".to_string()),
        ));
    }
    Ok(())
}

pub fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single uplink file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{parse_hex, read_uplink, resolve_input_path};

    #[test]
    fn hex_accepts_common_spellings() {
        assert_eq!(parse_hex("017557").unwrap(), vec![0x01, 0x75, 0x57]);
        assert_eq!(parse_hex("0x01 75 57").unwrap(), vec![0x01, 0x75, 0x57]);
        assert_eq!(parse_hex("01:75:57\n").unwrap(), vec![0x01, 0x75, 0x57]);
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn hex_rejects_odd_length() {
        let err = parse_hex("175").unwrap_err();
        assert!(err.message.contains("invalid hex payload"));
        assert!(err.hint.is_some());
    }

    #[test]
    fn null_document_is_none() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("null.json");
        fs::write(&path, "null").expect("write");
        assert!(read_uplink(&path).unwrap().is_none());
    }

    #[test]
    fn uplink_document_is_parsed() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("uplink.json");
        fs::write(&path, r#"{"bytes": [20, 232, 14], "fPort": 1}"#).expect("write");
        let uplink = read_uplink(&path).unwrap().expect("uplink");
        assert_eq!(uplink.bytes, vec![20, 232, 14]);
        assert_eq!(uplink.f_port, 1);
    }

    #[test]
    fn glob_must_match_exactly_one_file() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("a.json"), "null").expect("write");
        let single = resolve_input_path(&temp.path().join("*.json")).unwrap();
        assert!(single.ends_with("a.json"));

        fs::write(temp.path().join("b.json"), "null").expect("write");
        let err = resolve_input_path(&temp.path().join("*.json")).unwrap_err();
        assert!(err.message.contains("multiple files match"));

        let err = resolve_input_path(&temp.path().join("*.bin")).unwrap_err();
        assert!(err.message.contains("no files match"));
    }
}
