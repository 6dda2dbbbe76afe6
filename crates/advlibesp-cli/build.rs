use std::env;
use std::path::PathBuf;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for var in ["ADVLIBESP_COMMIT", "GITHUB_SHA"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    if let Some(head) = git_head_path() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    println!("cargo:rustc-env=ADVLIBESP_BUILD_COMMIT={}", revision());
    println!("cargo:rustc-env=ADVLIBESP_BUILD_DATE={}", commit_date());
}

/// Packagers may pin the revision; CI builds use the checked-out SHA; local
/// builds describe the working tree, marking uncommitted changes.
fn revision() -> String {
    let pinned = ["ADVLIBESP_COMMIT", "GITHUB_SHA"]
        .into_iter()
        .find_map(|var| env::var(var).ok().filter(|value| !value.trim().is_empty()));
    match pinned {
        Some(sha) => sha.trim().chars().take(7).collect(),
        None => git(&["describe", "--always", "--dirty", "--abbrev=7"])
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn commit_date() -> String {
    git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| UNKNOWN.to_string())
}

fn git_head_path() -> Option<PathBuf> {
    git(&["rev-parse", "--git-path", "HEAD"]).map(PathBuf::from)
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
