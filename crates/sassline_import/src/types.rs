use sassline_tree::{DependencyTree, TreeNode};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of compiling one entry stylesheet.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub entry: PathBuf,
    pub tree: DependencyTree,
    /// Bytes of CSS produced, on success
    pub css_bytes: Option<usize>,
    /// Formatted compile error, on failure
    pub error: Option<String>,
    /// Pruned import chain leading to the failing file
    pub import_chain: Option<TreeNode>,
}

impl EntryReport {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub reports: Vec<EntryReport>,
    /// Distinct files registered as build dependencies across all entries
    pub dependencies: usize,
}

impl CheckResult {
    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }
}
