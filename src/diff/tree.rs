//! Groups parsed file diffs into a directory hierarchy.

use std::cmp::Ordering;

use serde::Serialize;

use super::FileDiff;

/// A directory or file entry in the change tree.
///
/// Leaves borrow the [`FileDiff`] they were built from; directories carry
/// only their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<'a> {
    /// Last path segment.
    pub name: String,
    /// Slash-joined path from the root up to and including `name`.
    pub path: String,
    /// Whether this node is a directory.
    pub is_dir: bool,
    /// Child nodes: directories first, then by name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<'a>>,
    /// The file this leaf represents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a FileDiff>,
}

impl<'a> TreeNode<'a> {
    fn directory(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            is_dir: true,
            children: Vec::new(),
            file: None,
        }
    }

    fn leaf(name: &str, path: String, file: &'a FileDiff) -> Self {
        Self {
            name: name.to_string(),
            path,
            is_dir: false,
            children: Vec::new(),
            file: Some(file),
        }
    }

    /// Number of file leaves at or below this node.
    pub fn file_count(&self) -> usize {
        if self.is_dir {
            self.children.iter().map(TreeNode::file_count).sum()
        } else {
            1
        }
    }
}

/// Builds a sorted forest from parsed diffs, keyed on each file's new path.
///
/// Intermediate directories are shared between files, but leaves are never
/// merged: two diffs touching the same path produce two leaves, so a file
/// that is both staged and unstaged shows up once per diff instead of keeping
/// only the first.
pub fn build_tree(files: &[FileDiff]) -> Vec<TreeNode<'_>> {
    let mut roots = Vec::new();
    for file in files {
        insert(&mut roots, file);
    }
    sort_nodes(&mut roots);
    roots
}

fn insert<'a>(roots: &mut Vec<TreeNode<'a>>, file: &'a FileDiff) {
    let segments: Vec<&str> = file.new_path.split('/').collect();
    let Some((leaf, dirs)) = segments.split_last() else {
        return;
    };

    let mut level = roots;
    let mut path = String::new();
    for dir in dirs {
        push_segment(&mut path, dir);
        let index = match level.iter().position(|n| n.is_dir && n.name == *dir) {
            Some(index) => index,
            None => {
                level.push(TreeNode::directory(dir, &path));
                level.len() - 1
            }
        };
        level = &mut level[index].children;
    }

    push_segment(&mut path, leaf);
    level.push(TreeNode::leaf(leaf, path, file));
}

fn push_segment(path: &mut String, segment: &str) {
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(segment);
}

fn sort_nodes(nodes: &mut [TreeNode<'_>]) {
    nodes.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    for node in nodes {
        sort_nodes(&mut node.children);
    }
}

/// Case-insensitive name ordering with a byte-order tie break, so that
/// `README.md` sorts among lowercase names but the result stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Depth-first, display-ordered walk of the forest with each node's depth.
pub fn flatten<'t, 'a>(nodes: &'t [TreeNode<'a>]) -> Vec<(usize, &'t TreeNode<'a>)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &TreeNode<'a>)> = nodes.iter().rev().map(|n| (0, n)).collect();
    while let Some((depth, node)) = stack.pop() {
        out.push((depth, node));
        stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
    }
    out
}
