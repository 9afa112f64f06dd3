// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented script format understood by `treefs run`.
//!
//! ```text
//! # comment
//! mkdir a/b
//! write a/b/notes hello\nworld
//! cat a/b/notes
//! print
//! tree
//! ```

use anyhow::{Result, anyhow};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir(String),
    Write { path: String, content: String },
    Cat(String),
    Print,
    Tree,
}

impl Command {
    /// Parses a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

        let cmd = match verb {
            "mkdir" => Command::Mkdir(required_path(verb, rest)?),
            "cat" => Command::Cat(required_path(verb, rest)?),
            "write" => {
                // Content is everything after the first space following the path
                let (path, content) = rest.split_once(' ').unwrap_or((rest, ""));
                Command::Write {
                    path: required_path(verb, path)?,
                    content: unescape(content)?,
                }
            }
            "print" => Command::Print,
            "tree" => Command::Tree,
            _ => return Err(anyhow!("unknown command '{}'", verb)),
        };
        Ok(Some(cmd))
    }
}

fn required_path(verb: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(anyhow!("'{}' needs a path", verb));
    }
    Ok(rest.to_string())
}

/// Expands `\n`, `\t` and `\\` escapes.
pub fn unescape(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(anyhow!("unsupported escape '\\{}'", other)),
            None => return Err(anyhow!("dangling '\\' at end of content")),
        }
    }
    Ok(out)
}
