use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Deserialize;
use uplink_core::families::Family;
use uplink_core::{Uplink, decode_uplink};

/// `uplink.json` in a golden case directory.
#[derive(Debug, Deserialize)]
struct GoldenCase {
    family: Family,
    uplink: Option<Uplink>,
}

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("uplink.json");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_result.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let raw = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let case: GoldenCase = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid golden case {}: {}", input.display(), err))?;
    let result = decode_uplink(case.family, case.uplink.as_ref());
    let mut json = serde_json::to_string_pretty(&result)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
