use serde::Serialize;
use std::{fmt, path::PathBuf};

/// One `@import` argument as handed to the import callback.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub raw_argument: String,
    pub importing_file: PathBuf,
}

impl ImportRequest {
    pub fn new(raw_argument: impl Into<String>, importing_file: impl Into<PathBuf>) -> Self {
        Self { raw_argument: raw_argument.into(), importing_file: importing_file.into() }
    }
}

/// What the import callback hands back to the compiler.
///
/// `file` is a real path for single imports and a synthetic identifier for
/// glob imports. Both fields empty means "not resolved by the pipeline".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedImport {
    pub file: Option<PathBuf>,
    pub contents: Option<String>,
}

impl ResolvedImport {
    pub fn is_unresolved(&self) -> bool {
        self.file.is_none() && self.contents.is_none()
    }
}

/// Identifies one step of a pipeline processor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProcessorId(String);

impl ProcessorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of evaluating an asset through a processor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedAsset {
    pub data: String,
}
