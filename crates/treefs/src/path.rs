// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Slash-delimited path helpers.
//!
//! Paths are split literally: no root stripping, no `.`/`..` handling, and
//! empty segments (from leading, trailing or doubled separators) are kept
//! as names like any other.

pub const SEPARATOR: char = '/';

/// Splits a path into its ordered segments. Always yields at least one
/// segment; `""` yields a single empty segment.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

/// Joins segments back into a path string, used for error payloads.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(seg.as_ref());
    }
    out
}

/// Splits a path into its parent segments and final name.
pub fn split_last(path: &str) -> (Vec<&str>, &str) {
    let mut segs = segments(path);
    let name = segs.pop().unwrap_or_default();
    (segs, name)
}
