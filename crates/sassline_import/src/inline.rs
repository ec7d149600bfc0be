//! A compiler that understands nothing but `@import`.
//!
//! Each import is handed to the [`Importer`] and the returned stylesheet is
//! inlined in its place, recursively. Everything else passes through
//! untouched. It stands in for a real preprocessor when only the import graph
//! matters.

use log::trace;
use sassline_core::{STYLESHEET_EXTENSIONS, parent_dir, partialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::compiler::{CompileError, CompileOutput, CompileRequest, Compiler, Importer};

/// Nesting depth at which imports are considered a loop
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct ImportInliner {
    max_depth: usize,
}

impl Default for ImportInliner {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl ImportInliner {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn inline(
        &self,
        source: &str,
        file: &Path,
        request: &CompileRequest<'_>,
        importer: &mut dyn Importer,
        depth: usize,
    ) -> Result<String, CompileError> {
        let mut out = String::with_capacity(source.len());

        for (idx, line) in source.lines().enumerate() {
            let trimmed = line.trim_start();
            let args = match trimmed.strip_prefix("@import") {
                Some(rest) if !rest.contains("url(") => import_arguments(rest),
                _ => vec![],
            };
            if args.is_empty() {
                out.push_str(line);
                out.push('\n');
                continue;
            }

            let line_no = idx + 1;
            let column = line.len() - trimmed.len() + 1;
            for url in args {
                if is_plain_css(&url) {
                    out.push_str(&format!("@import \"{url}\";\n"));
                    continue;
                }
                if depth >= self.max_depth {
                    return Err(CompileError::at(
                        file,
                        line_no,
                        column,
                        format!("An @import loop has been found: '{url}' nested too deeply"),
                    ));
                }

                let (child, contents) = self.fetch(&url, file, request, importer).ok_or_else(|| {
                    CompileError::at(
                        file,
                        line_no,
                        column,
                        format!("File to import not found or unreadable: {url}"),
                    )
                })?;
                trace!("Inlining {} into {}", child.display(), file.display());
                out.push_str(&self.inline(&contents, &child, request, importer, depth + 1)?);
            }
        }

        Ok(out)
    }

    /// Ask the importer first; fall back to reading the file ourselves.
    fn fetch(
        &self,
        url: &str,
        prev: &Path,
        request: &CompileRequest<'_>,
        importer: &mut dyn Importer,
    ) -> Option<(PathBuf, String)> {
        let resolved = importer.import(url, prev).unwrap_or_default();
        match (resolved.file, resolved.contents) {
            (file, Some(contents)) => Some((file.unwrap_or_else(|| prev.to_path_buf()), contents)),
            (Some(file), None) => fs::read_to_string(&file).ok().map(|c| (file, c)),
            (None, None) => native_lookup(url, prev, &request.include_paths)
                .and_then(|file| fs::read_to_string(&file).ok().map(|c| (file, c))),
        }
    }
}

impl Compiler for ImportInliner {
    fn compile(
        &self,
        request: &CompileRequest<'_>,
        importer: &mut dyn Importer,
    ) -> Result<CompileOutput, CompileError> {
        let css = self.inline(request.data, request.file, request, importer, 0)?;
        Ok(CompileOutput { css })
    }
}

/// Quoted arguments of an `@import` statement, up to the closing `;`.
fn import_arguments(rest: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut quote = None;
    let mut current = String::new();

    for c in rest.chars() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (None, ';') => break,
            (None, _) => {}
            (Some(q), c) if c == q => {
                args.push(std::mem::take(&mut current));
                quote = None;
            }
            (Some(_), c) => current.push(c),
        }
    }
    args
}

fn is_plain_css(url: &str) -> bool {
    url.ends_with(".css")
        || url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
}

/// The preprocessor's own rules: the importing directory, then each include
/// path; exact name, then with each extension, plain before partial.
fn native_lookup(url: &str, prev: &Path, include_paths: &[PathBuf]) -> Option<PathBuf> {
    let names: Vec<String> = std::iter::once(url.to_string()).chain(partialize(url)).collect();
    std::iter::once(parent_dir(prev))
        .chain(include_paths.iter().map(PathBuf::as_path))
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find_map(|base| {
            if base.is_file() {
                return Some(base);
            }
            STYLESHEET_EXTENSIONS
                .iter()
                .map(|ext| PathBuf::from(format!("{}.{}", base.display(), ext)))
                .find(|candidate| candidate.is_file())
        })
}
