// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use diagnostics::log_debug;
use serde::{Deserialize, Serialize};

use crate::dir;
use crate::error::Result;
use crate::path;

/// Filesystem configuration, fixed at construction and shared read-only
/// with every directory created under the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// When set, `mkdir` and `write_file` create missing ancestor
    /// directories. When cleared, a missing ancestor is `NotFound`.
    #[serde(default = "default_auto_create")]
    pub auto_create: bool,
}

fn default_auto_create() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            auto_create: default_auto_create(),
        }
    }
}

impl Options {
    /// Require ancestor directories to exist (restrictive mode).
    pub fn disable_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    fn mode(&self) -> &'static str {
        if self.auto_create {
            "permissive"
        } else {
            "restrictive"
        }
    }
}

/// In-memory filesystem: a root directory plus its options.
///
/// All operations take `/`-separated paths relative to the root. Paths are
/// not normalized: a leading, trailing or doubled `/` yields an empty
/// segment, which is a literal entry name.
#[derive(Clone, Debug)]
pub struct FS {
    root: dir::Handle,
    options: Arc<Options>,
}

impl Default for FS {
    fn default() -> Self {
        Self::new()
    }
}

impl FS {
    /// Creates an empty filesystem that auto-creates ancestors.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let options = Arc::new(options);
        Self {
            root: dir::Handle::new("", options.clone()),
            options,
        }
    }

    pub fn root(&self) -> dir::Handle {
        self.root.clone()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolves the directory holding `parent`, creating it in permissive
    /// mode. Errors carry `full_path`.
    fn parent_dir(&self, parent: &[&str], full_path: &str) -> Result<dir::Handle> {
        let resolved = if self.options.auto_create {
            self.root.create_path(parent)
        } else {
            self.root.find(parent).and_then(|node| node.as_dir())
        };
        resolved.map_err(|e| e.at_path(full_path))
    }

    /// Creates the directory at `path`.
    ///
    /// In permissive mode every missing directory along the path is
    /// created and an existing directory at `path` is not an error. In
    /// restrictive mode all ancestors must exist and the final name must be
    /// free.
    pub fn mkdir(&self, path: &str) -> Result<()> {
        let mode = self.options.mode();
        log_debug!("mkdir {path} ({mode})", path: path, mode: mode);

        if self.options.auto_create {
            _ = self
                .root
                .create_path(&path::segments(path))
                .map_err(|e| e.at_path(path))?;
            return Ok(());
        }

        let (parent, name) = path::split_last(path);
        let parent = self.parent_dir(&parent, path)?;
        _ = parent.create_dir(name).map_err(|e| e.at_path(path))?;
        Ok(())
    }

    /// Returns the content of the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<String> {
        log_debug!("read_file {path}", path: path);

        let node = self
            .root
            .find(&path::segments(path))
            .map_err(|e| e.at_path(path))?;
        let file = node.as_file().map_err(|e| e.at_path(path))?;
        Ok(file.data())
    }

    /// Creates the file at `path` with `data`, or appends `data` when it
    /// already exists.
    pub fn write_file(&self, path: &str, data: &str) -> Result<()> {
        let mode = self.options.mode();
        let len = data.len();
        log_debug!("write_file {path} {len} bytes ({mode})", path: path, len: len, mode: mode);

        let (parent, name) = path::split_last(path);
        let parent = self.parent_dir(&parent, path)?;
        parent.write_file(name, data).map_err(|e| e.at_path(path))
    }

    /// True when `path` resolves to a file or directory.
    pub fn exists(&self, path: &str) -> bool {
        self.root.find(&path::segments(path)).is_ok()
    }

    /// Serializes the whole tree as indented JSON: files as strings,
    /// directories as objects.
    pub fn pretty_print(&self) -> Result<String> {
        crate::snapshot::Snapshot::Directory(self.root.pretty_print()).to_json_pretty()
    }

    /// Renders the whole tree with box-drawing characters, children sorted
    /// by name.
    pub fn tree(&self) -> String {
        // The root has the empty name, so it renders as "/"
        let snapshot = crate::snapshot::Snapshot::Directory(self.root.pretty_print());
        crate::tree_format::format_tree(&snapshot.to_tree_node(""))
    }
}
