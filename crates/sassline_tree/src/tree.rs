use log::{trace, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// One recorded import: `path` was reached from `parent_path` through the
/// `@import` argument `lookup_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub path: String,
    pub parent_path: String,
    pub lookup_path: String,
    /// Imports made by `path`, in order. Repeated imports are kept.
    pub children: Vec<String>,
}

/// A labelled node ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub nodes: Vec<TreeNode>,
}

/// Import graph of one top-level compile, kept for diagnostics.
///
/// Every parent referenced by an edge has its own entry. `root` follows the
/// most recent parent that had no entry when its first child was added.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyTree {
    paths: BTreeMap<String, DependencyEdge>,
    root: String,
    #[serde(skip)]
    slice_prefix: usize,
}

impl DependencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every edge; the slice prefix is kept.
    pub fn reset(&mut self) {
        self.paths.clear();
        self.root.clear();
    }

    /// Number of leading characters cut from each label by [`Self::render_sliced`].
    pub fn set_slice_prefix(&mut self, prefix: usize) {
        self.slice_prefix = prefix;
    }

    pub fn root(&self) -> Option<&str> {
        if self.root.is_empty() { None } else { Some(&self.root) }
    }

    pub fn path_list(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn get_path(&self, path: &str) -> Option<&DependencyEdge> {
        self.paths.get(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Record that `parent_path` imported `path` via `lookup_path`.
    ///
    /// An empty `path` means resolution upstream produced nothing; it is
    /// logged and ignored.
    pub fn add_path(
        &mut self,
        path: &str,
        parent_path: &str,
        lookup_path: &str,
    ) -> Option<&DependencyEdge> {
        if path.is_empty() {
            warn!("Ignoring invalid import edge: empty path under '{}'", parent_path);
            return None;
        }

        if !self.has_path(parent_path) {
            trace!("New root: {}", parent_path);
            self.root = parent_path.to_string();
        }

        self.paths.entry(path.to_string()).or_insert_with(|| DependencyEdge {
            path: path.to_string(),
            parent_path: parent_path.to_string(),
            lookup_path: lookup_path.to_string(),
            children: vec![],
        });
        self.paths
            .entry(parent_path.to_string())
            .or_insert_with(|| DependencyEdge {
                path: parent_path.to_string(),
                ..Default::default()
            })
            .children
            .push(path.to_string());

        self.paths.get(path)
    }

    /// Paths from the root down to `leaf`, ending with `leaf`. Empty when
    /// `leaf` was never recorded. Stops at the first repeated path.
    pub fn ancestry_of(&self, leaf: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut item = self.paths.get(leaf);

        while let Some(edge) = item {
            if !visited.insert(edge.path.as_str()) {
                trace!("Cycle in ancestry of {} at {}", leaf, edge.path);
                break;
            }
            chain.push(edge.path.clone());
            item = if edge.parent_path.is_empty() {
                None
            } else {
                self.paths.get(&edge.parent_path)
            };
        }

        chain.reverse();
        chain
    }

    /// Replay the ancestry of each leaf into `dest`, leaving it with only the
    /// paths between the root and those leaves.
    pub fn materialize<'a>(&self, leaves: impl IntoIterator<Item = &'a str>, dest: &mut Self) {
        for leaf in leaves {
            let chain = self.ancestry_of(leaf);
            for pair in chain.windows(2) {
                let (parent, path) = (&pair[0], &pair[1]);
                if dest.has_path(path) {
                    continue;
                }
                let lookup = self.paths.get(path).map_or("", |e| e.lookup_path.as_str());
                dest.add_path(path, parent, lookup);
            }
        }
    }

    /// Tree holding only the ancestors of `leaves`.
    pub fn pruned<'a>(&self, leaves: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dest = Self { slice_prefix: self.slice_prefix, ..Self::default() };
        self.materialize(leaves, &mut dest);
        dest
    }

    /// Build display nodes from `root` (the tree root when `None`) downwards,
    /// labelling each path with `label`. A path already on the current branch
    /// is shown once more, marked `(circular)`, without descending.
    pub fn render(&self, root: Option<&str>, label: impl Fn(&str) -> String) -> Option<TreeNode> {
        let root = root.or(self.root())?;
        let mut branch = Vec::new();
        Some(self.render_node(root, &label, &mut branch))
    }

    /// [`Self::render`] with the configured slice prefix.
    pub fn render_sliced(&self, root: Option<&str>) -> Option<TreeNode> {
        self.render(root, fixed_prefix(self.slice_prefix))
    }

    fn render_node<'a>(
        &'a self,
        path: &'a str,
        label: &dyn Fn(&str) -> String,
        branch: &mut Vec<&'a str>,
    ) -> TreeNode {
        if branch.contains(&path) {
            return TreeNode { label: format!("{} (circular)", label(path)), nodes: vec![] };
        }

        branch.push(path);
        let nodes = self
            .paths
            .get(path)
            .map(|edge| {
                edge.children.iter().map(|child| self.render_node(child, label, branch)).collect()
            })
            .unwrap_or_default();
        branch.pop();

        TreeNode { label: label(path), nodes }
    }
}

/// Label transform dropping the first `n` characters of each path.
pub fn fixed_prefix(n: usize) -> impl Fn(&str) -> String {
    move |path: &str| path.chars().skip(n).collect()
}
