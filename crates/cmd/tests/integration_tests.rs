// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use tempfile::tempdir;

use cmd::commands::{RunSummary, run_command};
use cmd::common::{build_options, open_script};

/// Write `script` into a temporary directory and run it from disk.
fn run_script_file(script: &str, no_auto_create: bool) -> anyhow::Result<(treefs::FS, RunSummary, String)> {
    let tmp = tempdir()?;
    let path = tmp.path().join("script.tfs");
    std::fs::write(&path, script)?;

    let fs = treefs::FS::with_options(build_options(no_auto_create));
    let input = open_script(Some(&path))?;
    let mut out = Vec::new();
    let summary = run_command(&fs, input, &mut out, false)?;
    Ok((fs, summary, String::from_utf8(out)?))
}

#[test]
fn test_script_builds_tree() -> anyhow::Result<()> {
    let script = "\
# project layout
mkdir src/bin
write src/lib.rs pub mod fs;
write src/lib.rs \\npub mod dir;
write README hello
cat src/lib.rs
print
";
    let (fs, summary, out) = run_script_file(script, false)?;

    assert_eq!(summary, RunSummary { executed: 6, failed: 0 });
    assert!(out.starts_with("pub mod fs;\npub mod dir;\n"));
    assert_eq!(fs.read_file("README")?, "hello");

    let json_start = out.find('{').unwrap();
    let value: serde_json::Value = serde_json::from_str(&out[json_start..])?;
    assert_eq!(
        value,
        serde_json::json!({
            "README": "hello",
            "src": {"bin": {}, "lib.rs": "pub mod fs;\npub mod dir;"},
        })
    );
    Ok(())
}

#[test]
fn test_restrictive_script_fails_on_missing_parent() {
    let err = run_script_file("mkdir a\nwrite a/b/c x\n", true).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("line 2"), "{}", msg);
    assert!(msg.contains("path 'a/b/c' does not exist"), "{}", msg);
}

#[test]
fn test_restrictive_script_with_explicit_parents() -> anyhow::Result<()> {
    let (fs, summary, out) = run_script_file("mkdir a\nmkdir a/b\nwrite a/b/c x\ntree\n", true)?;

    assert_eq!(summary.executed, 4);
    assert_eq!(fs.read_file("a/b/c")?, "x");
    assert_eq!(out, "/\n└─┬ a/\n  └─┬ b/\n    └── c (1 bytes)\n");
    Ok(())
}
