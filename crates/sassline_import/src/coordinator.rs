use log::{debug, error, trace, warn};
use sassline_core::{
    ImportRequest, Pipeline, ResolvedImport, expand_glob_import, is_glob, load, resolve,
    synthetic_file,
};
use sassline_tree::DependencyTree;
use std::path::Path;

use crate::compiler::Importer;

/// How an `@import` argument is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Wildcard: expanded into a synthetic stylesheet
    Glob,
    /// Resolved to one asset through the search roots
    Single,
}

pub fn classify(argument: &str) -> ImportKind {
    if is_glob(argument) { ImportKind::Glob } else { ImportKind::Single }
}

/// Import callback of one top-level compile.
///
/// Every import is answered; an import the pipeline cannot resolve gets an
/// empty [`ResolvedImport`] so the compiler can try its own lookup. Each
/// answer is recorded as an edge of `tree`.
pub struct ImportCoordinator<'a, P: Pipeline + ?Sized> {
    pipeline: &'a P,
    tree: &'a mut DependencyTree,
}

impl<'a, P: Pipeline + ?Sized> ImportCoordinator<'a, P> {
    pub fn new(pipeline: &'a P, tree: &'a mut DependencyTree) -> Self {
        Self { pipeline, tree }
    }

    pub fn dispatch(&mut self, request: &ImportRequest) -> ResolvedImport {
        let kind = classify(&request.raw_argument);
        trace!(
            "Dispatching {:?} import '{}' from {}",
            kind,
            request.raw_argument,
            request.importing_file.display()
        );

        let resolved = match kind {
            ImportKind::Glob => self.import_glob(request),
            ImportKind::Single => self.import_single(request),
        };

        let path = resolved.file.as_deref().map(|f| f.display().to_string()).unwrap_or_default();
        self.tree.add_path(
            &path,
            &request.importing_file.display().to_string(),
            &request.raw_argument,
        );
        resolved
    }

    fn import_glob(&self, request: &ImportRequest) -> ResolvedImport {
        match expand_glob_import(self.pipeline, &request.raw_argument, &request.importing_file) {
            Ok(resolved) => resolved,
            Err(e) => {
                // Still claimed: an empty unit rather than the compiler's own lookup.
                warn!("Cannot expand '{}': {}", request.raw_argument, e);
                ResolvedImport {
                    file: Some(synthetic_file(&request.raw_argument, &request.importing_file)),
                    contents: Some(String::new()),
                }
            }
        }
    }

    fn import_single(&self, request: &ImportRequest) -> ResolvedImport {
        let Some(file) = resolve(self.pipeline, &request.raw_argument, &request.importing_file)
        else {
            return ResolvedImport::default();
        };

        if let Err(e) = self.pipeline.register_dependency(&file) {
            if e.is_not_found() {
                warn!(
                    "{} will not change when {} changes, because the file could not be found.",
                    request.importing_file.display(),
                    request.raw_argument
                );
            } else {
                warn!("Cannot track {}: {}", file.display(), e);
            }
        }

        let contents = match load(self.pipeline, &file) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Failed to load {}: {}", file.display(), e);
                None
            }
        };
        debug!(
            "Imported '{}' as {} ({} bytes)",
            request.raw_argument,
            file.display(),
            contents.as_ref().map_or(0, String::len)
        );
        ResolvedImport { file: Some(file), contents }
    }
}

impl<P: Pipeline + ?Sized> Importer for ImportCoordinator<'_, P> {
    fn import(&mut self, url: &str, prev: &Path) -> Option<ResolvedImport> {
        Some(self.dispatch(&ImportRequest::new(url, prev)))
    }
}
