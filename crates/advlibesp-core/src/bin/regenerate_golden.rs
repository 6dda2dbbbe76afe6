use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use advlibesp_core::{ProcessOptions, process};

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
        if !path.join("input.hex").exists() {
            continue;
        }
        regenerate_one(&path)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path) -> Result<(), String> {
    let input_path = dir.join("input.hex");
    let input = fs::read_to_string(&input_path)
        .map_err(|err| format!("failed to read {}: {}", input_path.display(), err))?;
    let options = load_options(dir)?;

    let packet = process(input.trim(), &[], &options)
        .ok_or_else(|| format!("packet rejected: {}", input_path.display()))?;
    let mut json = serde_json::to_string_pretty(&packet)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');

    let output = dir.join("expected.json");
    fs::write(&output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

fn load_options(dir: &Path) -> Result<ProcessOptions, String> {
    let path = dir.join("options.json");
    if !path.exists() {
        return Ok(ProcessOptions::default());
    }
    let json = fs::read_to_string(&path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&json).map_err(|err| format!("invalid {}: {}", path.display(), err))
}
