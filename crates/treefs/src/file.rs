// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

/// Represents a file holding appendable text content.
#[derive(Debug)]
pub struct File {
    name: String,
    data: RwLock<String>,
}

/// A handle for a refcounted file. Clones share the same content.
#[derive(Clone, Debug)]
pub struct Handle(Arc<File>);

impl File {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends `data` to the current content.
    pub fn append(&self, data: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(data);
    }

    /// Returns a snapshot of the full content.
    pub fn data(&self) -> String {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Handle {
    pub(crate) fn new<S: Into<String>>(name: S, data: &str) -> Self {
        Self(Arc::new(File {
            name: name.into(),
            data: RwLock::new(data.to_string()),
        }))
    }

    /// True when both handles refer to the same file.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Handle {
    type Target = File;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
