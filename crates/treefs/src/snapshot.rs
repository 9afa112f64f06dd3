// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::error::Result;
use crate::tree_format::TreeNode;

/// Structural export of a subtree, as produced by
/// [`Directory::pretty_print`](crate::dir::Directory::pretty_print).
///
/// Serializes untagged: files become strings and directories become
/// objects keyed by child name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    File(String),
    Directory(BTreeMap<String, Snapshot>),
}

const INDENT: &str = "  ";

impl Snapshot {
    fn label(&self, name: &str) -> String {
        match self {
            Snapshot::File(data) => format!("{} ({} bytes)", name, data.len()),
            Snapshot::Directory(_) => format!("{}/", name),
        }
    }

    /// Render as a tree for display, labelling this node `label`.
    pub fn to_tree_node(&self, label: &str) -> TreeNode {
        // Nodes in discovery order with their parent's index; a child
        // always comes after its parent
        let mut built: Vec<(usize, TreeNode)> = vec![(0, TreeNode::new(self.label(label)))];
        let mut pending: Vec<(usize, &Snapshot)> = vec![(0, self)];

        while let Some((index, snap)) = pending.pop() {
            if let Snapshot::Directory(children) = snap {
                for (name, child) in children {
                    built.push((index, TreeNode::new(child.label(name))));
                    pending.push((built.len() - 1, child));
                }
            }
        }

        // Siblings are attached last-first, so each node reverses its
        // children once all of them are in place
        while let Some((parent, mut node)) = built.pop() {
            node.children.reverse();
            match built.get_mut(parent) {
                Some((_, into)) => into.children.push(node),
                None => return node,
            }
        }
        TreeNode::new(self.label(label))
    }

    /// Serializes as JSON indented by two spaces, the layout of
    /// `serde_json::to_string_pretty`, without recursing per level.
    pub fn to_json_pretty(&self) -> Result<String> {
        let children = match self {
            Snapshot::File(data) => return Ok(serde_json::to_string(data)?),
            Snapshot::Directory(children) => children,
        };

        let mut out = String::from("{");
        if children.is_empty() {
            out.push('}');
            return Ok(out);
        }

        // One open object per frame: its remaining entries and whether
        // one has been written yet
        let mut stack: Vec<(btree_map::Iter<'_, String, Snapshot>, bool)> =
            vec![(children.iter(), false)];

        loop {
            let next = match stack.last_mut() {
                Some((entries, written)) => {
                    let comma = *written;
                    *written = true;
                    entries.next().map(|entry| (entry, comma))
                }
                None => break,
            };

            let Some(((name, value), comma)) = next else {
                _ = stack.pop();
                out.push('\n');
                out.push_str(&INDENT.repeat(stack.len()));
                out.push('}');
                continue;
            };

            if comma {
                out.push(',');
            }
            out.push('\n');
            out.push_str(&INDENT.repeat(stack.len()));
            out.push_str(&serde_json::to_string(name)?);
            out.push_str(": ");

            match value {
                Snapshot::File(data) => out.push_str(&serde_json::to_string(data)?),
                Snapshot::Directory(grand) if grand.is_empty() => out.push_str("{}"),
                Snapshot::Directory(grand) => {
                    out.push('{');
                    stack.push((grand.iter(), false));
                }
            }
        }
        Ok(out)
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        let Snapshot::Directory(children) = self else {
            return;
        };
        let mut pending: Vec<Snapshot> = std::mem::take(children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            if let Snapshot::Directory(children) = &mut node {
                pending.extend(std::mem::take(children).into_values());
            }
        }
    }
}
