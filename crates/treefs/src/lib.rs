// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! An in-memory hierarchical namespace of directories and text files.
//!
//! [`FS`] is the path-string facade: `mkdir`, `read_file`, `write_file`
//! and `pretty_print` split `/`-separated paths into segments and hand them
//! to the root [`Directory`], which walks the tree one segment at a time.
//!
//! ```
//! use treefs::{FS, Options};
//!
//! let fs = FS::new();
//! fs.write_file("a/b", "x").unwrap();
//! fs.write_file("a/b", "y").unwrap();
//! assert_eq!(fs.read_file("a/b").unwrap(), "xy");
//!
//! let strict = FS::with_options(Options::default().disable_auto_create());
//! assert!(strict.mkdir("a/b").unwrap_err().is_not_found());
//! ```

mod error;
mod fs;
mod node;
mod snapshot;

pub mod dir;
pub mod file;
pub mod path;
pub mod tree_format;

pub use dir::Directory;
pub use error::{Error, ErrorKind, Result};
pub use file::File;
pub use fs::{FS, Options};
pub use node::{EntryKind, Node};
pub use snapshot::Snapshot;

#[cfg(test)]
mod tests;
