// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Box-drawing rendering of hierarchical structures.
//!
//! # Example
//!
//! ```
//! use treefs::tree_format::{TreeNode, format_tree};
//!
//! let root = TreeNode::new("/")
//!     .with_child(TreeNode::new("etc/")
//!         .with_child(TreeNode::new("hosts (9 bytes)")))
//!     .with_child(TreeNode::new("tmp/"));
//!
//! let output = format_tree(&root);
//! assert_eq!(output, "/\n├─┬ etc/\n│ └── hosts (9 bytes)\n└── tmp/\n");
//! ```

/// A labelled node with ordered children.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The label for this node (can be multi-line)
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node (builder pattern)
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Format a tree with the root label on the first line and every child
/// below it, connected with `├──`/`└──` (leaves) or `├─┬`/`└─┬` (nodes
/// with children of their own).
pub fn format_tree(root: &TreeNode) -> String {
    let mut output = String::new();
    output.push_str(&root.label);
    output.push('\n');

    // One frame per open level: siblings still to draw and their prefix
    let mut stack: Vec<(std::slice::Iter<'_, TreeNode>, String)> =
        vec![(root.children.iter(), String::new())];

    while let Some((siblings, prefix)) = stack.last_mut() {
        let Some(child) = siblings.next() else {
            _ = stack.pop();
            continue;
        };
        let is_last = siblings.len() == 0;

        let (connector, continuation_char) = match (child.children.is_empty(), is_last) {
            (true, true) => ("└──", ' '),
            (true, false) => ("├──", '│'),
            (false, true) => ("└─┬", ' '),
            (false, false) => ("├─┬", '│'),
        };

        for (line_idx, line) in child.label.lines().enumerate() {
            output.push_str(prefix);
            if line_idx == 0 {
                output.push_str(connector);
                output.push(' ');
            } else {
                // Continuation lines align under the first
                output.push(continuation_char);
                output.push_str(&" ".repeat(connector.chars().count()));
            }
            output.push_str(line);
            output.push('\n');
        }

        if !child.children.is_empty() {
            let new_prefix = format!("{}{} ", prefix, continuation_char);
            stack.push((child.children.iter(), new_prefix));
        }
    }

    output
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
