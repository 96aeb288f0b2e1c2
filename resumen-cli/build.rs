use std::path::{Path, PathBuf};
use std::process::Command;

/// Short commit of the workspace checkout, with `-dirty` for local edits.
fn git_describe(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!rev.is_empty()).then_some(rev)
}

fn main() {
    // Source tarballs have no .git; packagers pass the revision in.
    println!("cargo:rerun-if-env-changed=RESUMEN_BUILD_SHA");

    let manifest_dir = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into()));
    let repo_root = manifest_dir.join("..");
    println!("cargo:rerun-if-changed={}", repo_root.join(".git/HEAD").display());

    let rev = std::env::var("RESUMEN_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&repo_root))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=RESUMEN_BUILD_SHA={}", rev);
}
