// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};

/// Kind of a node (file or directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// A child of a directory: either a file or a directory handle.
///
/// Nodes are cheap to clone; clones refer to the same underlying entry.
#[derive(Clone, Debug)]
pub enum Node {
    File(crate::file::Handle),
    Directory(crate::dir::Handle),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => f.name(),
            Node::Directory(d) => d.name(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Node::File(_) => EntryKind::File,
            Node::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    pub fn as_file(&self) -> Result<crate::file::Handle> {
        if let Node::File(f) = self {
            Ok(f.clone())
        } else {
            Err(Error::invalid_path(self.name()))
        }
    }

    pub fn as_dir(&self) -> Result<crate::dir::Handle> {
        if let Node::Directory(d) = self {
            Ok(d.clone())
        } else {
            Err(Error::invalid_path(self.name()))
        }
    }

    /// True when both nodes refer to the same entry.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::File(a), Node::File(b)) => a.ptr_eq(b),
            (Node::Directory(a), Node::Directory(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
