// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::Entry;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::fs::Options;
use crate::node::Node;
use crate::snapshot::Snapshot;

/// Represents a directory containing uniquely named entries.
///
/// Entries live behind a reader/writer lock: lookups proceed concurrently
/// and every check-then-insert runs inside one write-lock scope, so two
/// creators racing on the same name cannot both succeed. Nothing locks
/// across directories; a multi-segment walk may observe the tree changing
/// between one segment and the next.
#[derive(Debug)]
pub struct Directory {
    name: String,
    options: Arc<Options>,
    entries: RwLock<HashMap<String, Node>>,
}

/// A handle for a refcounted directory.
#[derive(Clone, Debug)]
pub struct Handle(Arc<Directory>);

impl Handle {
    pub(crate) fn new<S: Into<String>>(name: S, options: Arc<Options>) -> Self {
        Self(Arc::new(Directory {
            name: name.into(),
            options,
            entries: RwLock::new(HashMap::new()),
        }))
    }

    /// True when both handles refer to the same directory.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn child_dir(&self, name: &str) -> Handle {
        Handle::new(name, self.options.clone())
    }

    /// Creates an empty child directory.
    pub fn create_dir(&self, name: &str) -> Result<Handle> {
        match self.write_entries().entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::already_exists(name)),
            Entry::Vacant(slot) => {
                let dir = self.child_dir(name);
                _ = slot.insert(Node::Directory(dir.clone()));
                Ok(dir)
            }
        }
    }

    /// Returns the child directory `name`, creating it when absent.
    fn get_or_create_dir(&self, name: &str) -> Result<Handle> {
        let node = self
            .write_entries()
            .entry(name.to_string())
            .or_insert_with(|| Node::Directory(self.child_dir(name)))
            .clone();
        node.as_dir()
    }

    /// Walks `path` from this directory, creating any missing directories,
    /// and returns the final one. An empty path yields this directory.
    pub fn create_path<S: AsRef<str>>(&self, path: &[S]) -> Result<Handle> {
        let mut current = self.clone();
        for (pos, name) in path.iter().enumerate() {
            current = current
                .get_or_create_dir(name.as_ref())
                .map_err(|_| Error::invalid_path(crate::path::join(&path[..=pos])))?;
        }
        Ok(current)
    }

    /// Resolves `path` from this directory without creating anything.
    /// An empty path yields this directory.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Result<Node> {
        let mut current = Node::Directory(self.clone());
        for (pos, name) in path.iter().enumerate() {
            // Only directories can be descended into
            let Node::Directory(dir) = current else {
                return Err(Error::invalid_path(crate::path::join(&path[..pos])));
            };
            current = dir
                .get_child(name.as_ref())
                .map_err(|_| Error::not_found(crate::path::join(path)))?;
        }
        Ok(current)
    }
}

impl Directory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, Node>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, Node>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.read_entries().contains_key(name)
    }

    pub fn get_child(&self, name: &str) -> Result<Node> {
        self.read_entries()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(name))
    }

    /// Creates a file with initial content.
    pub fn create_file(&self, name: &str, data: &str) -> Result<()> {
        match self.write_entries().entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::already_exists(name)),
            Entry::Vacant(slot) => {
                _ = slot.insert(Node::File(crate::file::Handle::new(name, data)));
                Ok(())
            }
        }
    }

    /// Appends to the file `name`, creating it first when absent.
    pub fn write_file(&self, name: &str, data: &str) -> Result<()> {
        match self.write_entries().entry(name.to_string()) {
            Entry::Occupied(slot) => {
                slot.get().as_file()?.append(data);
                Ok(())
            }
            Entry::Vacant(slot) => {
                _ = slot.insert(Node::File(crate::file::Handle::new(name, data)));
                Ok(())
            }
        }
    }

    /// Lists direct children sorted by name.
    pub fn entries(&self) -> Vec<(String, Node)> {
        let mut items: Vec<_> = self
            .read_entries()
            .iter()
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exports this directory: files map to their content and directories
    /// to their own nested mapping.
    pub fn pretty_print(&self) -> BTreeMap<String, Snapshot> {
        // Directories in discovery order as (parent index, name, mapping).
        // A directory always comes after its parent.
        let mut built: Vec<(usize, String, BTreeMap<String, Snapshot>)> =
            vec![(0, self.name.clone(), BTreeMap::new())];
        let mut pending: Vec<(usize, Vec<(String, Node)>)> = vec![(0, self.entries())];

        while let Some((index, children)) = pending.pop() {
            for (name, node) in children {
                match node {
                    Node::File(f) => {
                        _ = built[index].2.insert(name, Snapshot::File(f.data()));
                    }
                    Node::Directory(d) => {
                        built.push((index, name, BTreeMap::new()));
                        pending.push((built.len() - 1, d.entries()));
                    }
                }
            }
        }

        // Fold children into parents from the deepest discovery upward
        while let Some((parent, name, mapping)) = built.pop() {
            match built.get_mut(parent) {
                Some((_, _, into)) => {
                    _ = into.insert(name, Snapshot::Directory(mapping));
                }
                None => return mapping,
            }
        }
        BTreeMap::new()
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        // Free descendants here, one level at a time, instead of through
        // nested drops of each child map
        let mut pending: Vec<Node> = self
            .entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, node)| node)
            .collect();

        while let Some(node) = pending.pop() {
            let Node::Directory(handle) = node else {
                continue;
            };
            // Other holders keep the subtree alive; only the last one drains it
            if let Some(mut dir) = Arc::into_inner(handle.0) {
                pending.extend(
                    dir.entries
                        .get_mut()
                        .unwrap_or_else(PoisonError::into_inner)
                        .drain()
                        .map(|(_, node)| node),
                );
            }
        }
    }
}

impl Deref for Handle {
    type Target = Directory;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Handle {
        Handle::new("", Arc::new(Options::default()))
    }

    #[test]
    fn test_create_dir_and_get_child() {
        let root = root();
        assert_eq!(root.name(), "");
        assert!(!root.has_child("a"));

        let a = root.create_dir("a").unwrap();
        assert_eq!(a.name(), "a");
        assert!(root.has_child("a"));

        let node = root.get_child("a").unwrap();
        assert!(node.is_dir());
        assert!(node.as_dir().unwrap().ptr_eq(&a));
    }

    #[test]
    fn test_get_child_missing() {
        let root = root();
        assert_eq!(root.get_child("nope").unwrap_err(), Error::not_found("nope"));
    }

    #[test]
    fn test_names_shared_between_kinds() {
        let root = root();
        root.create_dir("d").unwrap();
        root.create_file("f", "x").unwrap();

        assert_eq!(root.create_dir("d").unwrap_err(), Error::already_exists("d"));
        assert_eq!(root.create_dir("f").unwrap_err(), Error::already_exists("f"));
        assert_eq!(
            root.create_file("d", "y").unwrap_err(),
            Error::already_exists("d")
        );
        assert_eq!(
            root.create_file("f", "y").unwrap_err(),
            Error::already_exists("f")
        );

        // The failed create left the original file alone
        let f = root.get_child("f").unwrap().as_file().unwrap();
        assert_eq!(f.data(), "x");
    }

    #[test]
    fn test_children_inherit_options() {
        let root = Handle::new("", Arc::new(Options::default().disable_auto_create()));
        let deep = root.create_path(&["a", "b"]).unwrap();
        assert!(!deep.options().auto_create);
    }

    #[test]
    fn test_create_path_is_idempotent() {
        let root = root();
        let first = root.create_path(&["a", "b", "c"]).unwrap();
        let second = root.create_path(&["a", "b", "c"]).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(first.name(), "c");
    }

    #[test]
    fn test_create_path_empty_returns_self() {
        let root = root();
        let same = root.create_path::<&str>(&[]).unwrap();
        assert!(same.ptr_eq(&root));
    }

    #[test]
    fn test_create_path_through_file() {
        let root = root();
        root.create_path(&["a"]).unwrap().create_file("f", "").unwrap();

        assert_eq!(
            root.create_path(&["a", "f", "g"]).unwrap_err(),
            Error::invalid_path("a/f")
        );
        // Final segment occupied by a file is just as invalid
        assert_eq!(
            root.create_path(&["a", "f"]).unwrap_err(),
            Error::invalid_path("a/f")
        );
    }

    #[test]
    fn test_find() {
        let root = root();
        let b = root.create_path(&["a", "b"]).unwrap();
        b.create_file("f", "hello").unwrap();

        let node = root.find(&["a", "b", "f"]).unwrap();
        assert_eq!(node.name(), "f");
        assert_eq!(node.as_file().unwrap().data(), "hello");

        let node = root.find(&["a", "b"]).unwrap();
        assert!(node.as_dir().unwrap().ptr_eq(&b));

        let node = root.find::<&str>(&[]).unwrap();
        assert!(node.as_dir().unwrap().ptr_eq(&root));
    }

    #[test]
    fn test_find_not_found_carries_full_path() {
        let root = root();
        root.create_path(&["a"]).unwrap();

        assert_eq!(
            root.find(&["a", "b", "c"]).unwrap_err(),
            Error::not_found("a/b/c")
        );
        assert_eq!(root.find(&["x"]).unwrap_err(), Error::not_found("x"));
    }

    #[test]
    fn test_find_through_file_is_invalid() {
        let root = root();
        root.create_file("f", "").unwrap();

        let err = root.find(&["f", "missing"]).unwrap_err();
        assert_eq!(err, Error::invalid_path("f"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_empty_segment_is_a_name() {
        let root = root();
        let blank = root.create_path(&["", ""]).unwrap();
        assert_eq!(blank.name(), "");
        assert!(root.has_child(""));
        assert!(root.find(&["", ""]).unwrap().is_dir());
    }

    #[test]
    fn test_write_file() {
        let root = root();
        root.write_file("f", "a").unwrap();
        root.write_file("f", "b").unwrap();
        assert_eq!(root.get_child("f").unwrap().as_file().unwrap().data(), "ab");

        root.create_dir("d").unwrap();
        assert_eq!(root.write_file("d", "x").unwrap_err(), Error::invalid_path("d"));
    }

    #[test]
    fn test_entries_sorted() {
        let root = root();
        root.create_file("b", "").unwrap();
        root.create_dir("c").unwrap();
        root.create_file("a", "").unwrap();

        let names: Vec<_> = root.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(root.len(), 3);
    }

    #[test]
    fn test_pretty_print() {
        let root = root();
        assert!(root.pretty_print().is_empty());

        root.create_path(&["a"]).unwrap().create_file("b", "x").unwrap();
        root.create_dir("empty").unwrap();

        let expected = BTreeMap::from([
            (
                "a".to_string(),
                Snapshot::Directory(BTreeMap::from([(
                    "b".to_string(),
                    Snapshot::File("x".to_string()),
                )])),
            ),
            ("empty".to_string(), Snapshot::Directory(BTreeMap::new())),
        ]);
        assert_eq!(root.pretty_print(), expected);
    }
}
