//! The preprocessor as seen from the import engine: a synchronous compile
//! call that asks an [`Importer`] about every `@import` it meets.

use sassline_core::{ResolvedImport, parent_dir};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Import callback handed to [`Compiler::compile`].
pub trait Importer {
    /// Resolve `url` as imported from `prev`. `None` defers to the compiler's
    /// native lookup.
    fn import(&mut self, url: &str, prev: &Path) -> Option<ResolvedImport>;
}

/// Input of one compile call.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    pub file: &'a Path,
    pub data: &'a str,
    pub include_paths: Vec<PathBuf>,
    pub indented_syntax: bool,
}

impl<'a> CompileRequest<'a> {
    /// Request for `file`: its own directory comes first in the include
    /// paths, then the pipeline's search roots. `.sass` files use the
    /// indented syntax.
    pub fn for_file(file: &'a Path, data: &'a str, search_roots: &[PathBuf]) -> Self {
        let mut include_paths = vec![parent_dir(file).to_path_buf()];
        include_paths.extend(search_roots.iter().cloned());
        let indented_syntax = file.extension().and_then(|e| e.to_str()) == Some("sass");
        Self { file, data, include_paths, indented_syntax }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub css: String,
}

pub trait Compiler {
    fn compile(
        &self,
        request: &CompileRequest<'_>,
        importer: &mut dyn Importer,
    ) -> Result<CompileOutput, CompileError>;
}

/// Failure reported by the compiler.
///
/// Displays as `<file>(<line>,<column>): <message>` when the location is
/// known. Otherwise the message is parsed as `path:line:level:message` and
/// shown as `Line <line>: <message>`, or shown as-is when that fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileError {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub message: String,
}

impl CompileError {
    pub fn at(file: &Path, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.display().to_string()),
            line: Some(line),
            column: Some(column),
            message: message.into(),
        }
    }

    /// Error carrying only an unstructured message.
    pub fn raw(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Default::default() }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(file), Some(line), Some(column)) = (&self.file, self.line, self.column) {
            return write!(f, "{file}({line},{column}): {}", self.message);
        }
        match parse_raw(&self.message) {
            Some((line, message)) => write!(f, "Line {line}: {message}"),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CompileError {}

/// `path:line:level:message` -> `(line, message)`
fn parse_raw(raw: &str) -> Option<(usize, &str)> {
    let mut parts = raw.splitn(4, ':').map(str::trim);
    let _path = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let (level, message) = (parts.next()?, parts.next()?);
    if level.is_empty() || message.is_empty() {
        return None;
    }
    Some((line, message))
}
