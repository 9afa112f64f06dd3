// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Run command - executes a script of filesystem operations against a
//! fresh in-memory filesystem.
//!
//! Example:
//!   treefs run setup.tfs
//!   echo "write a/b hello" | treefs --no-auto-create run

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use diagnostics::{log_debug, log_info, log_warn};

use crate::script::Command;

/// Outcome of a script run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Run every line of `input` against `fs`, writing command output to `out`.
///
/// Without `keep_going` the first failing line aborts the run. With it,
/// failures are reported to `out` as `error: line N: ...` and counted.
pub fn run_command<R, W>(fs: &treefs::FS, input: R, out: &mut W, keep_going: bool) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read script line {}", line_no))?;

        let result = Command::parse(&line).and_then(|cmd| match cmd {
            Some(cmd) => execute(fs, &cmd, out).map(|()| true),
            None => Ok(false),
        });

        match result {
            Ok(true) => summary.executed += 1,
            Ok(false) => {}
            Err(e) if keep_going => {
                summary.failed += 1;
                let reason = format!("{:#}", e);
                log_warn!("line {line_no} failed: {reason}", line_no: line_no, reason: reason);
                writeln!(out, "error: line {}: {:#}", line_no, e)?;
            }
            Err(e) => return Err(e.context(format!("line {}", line_no))),
        }
    }

    let RunSummary { executed, failed } = summary;
    log_info!("script finished: {executed} executed, {failed} failed", executed: executed, failed: failed);
    Ok(summary)
}

/// Apply one command.
pub fn execute<W: Write>(fs: &treefs::FS, cmd: &Command, out: &mut W) -> Result<()> {
    let debug_cmd = format!("{:?}", cmd);
    log_debug!("executing {cmd}", cmd: debug_cmd);

    match cmd {
        Command::Mkdir(path) => {
            fs.mkdir(path)
                .with_context(|| format!("Failed to create directory {}", path))?;
        }
        Command::Write { path, content } => {
            fs.write_file(path, content)
                .with_context(|| format!("Failed to write {}", path))?;
        }
        Command::Cat(path) => {
            let data = fs
                .read_file(path)
                .with_context(|| format!("Failed to read {}", path))?;
            writeln!(out, "{}", data)?;
        }
        Command::Print => {
            let json = fs.pretty_print().context("Failed to serialize filesystem")?;
            writeln!(out, "{}", json)?;
        }
        Command::Tree => {
            write!(out, "{}", fs.tree())?;
        }
    }
    Ok(())
}
