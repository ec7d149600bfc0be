//! The host asset pipeline as seen from the import engine.
//!
//! [`Pipeline`] is the seam: logical path lookup, the requirable-asset check,
//! dependency tracking and evaluation through a processor chain.
//! [`FsPipeline`] implements it on top of plain directories.

use dashmap::{DashMap, DashSet};
use log::{debug, trace};
use path_clean::clean;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    constants::{SASS_ENGINE, SASS_EXTENSIONS, STYLESHEET_EXTENSIONS},
    error::PipelineError,
    types::{EvaluatedAsset, ProcessorId},
};

pub trait Pipeline {
    /// Resolve a logical path to a concrete file, if the pipeline knows one.
    fn resolve_logical_path(&self, candidate: &str) -> Option<PathBuf>;

    /// Whether `path` is a valid, loadable build input.
    fn is_requirable_asset(&self, path: &Path) -> bool;

    /// Record that the current build depends on `path`.
    fn register_dependency(&self, path: &Path) -> Result<(), PipelineError>;

    /// The processor chain configured for `path`.
    fn processors_for(&self, path: &Path) -> Vec<ProcessorId>;

    /// Evaluate `path` through exactly the given processors.
    fn evaluate(
        &self,
        path: &Path,
        processors: &[ProcessorId],
    ) -> Result<Option<EvaluatedAsset>, PipelineError>;

    /// Search roots, in priority order.
    fn search_roots(&self) -> &[PathBuf];

    /// Project root used when no search root contains a file.
    fn root_path(&self) -> &Path;
}

/// A single text transformation step of a processor chain.
pub trait Processor: Send + Sync {
    fn process(&self, path: &Path, data: String) -> Result<String, PipelineError>;
}

impl<F> Processor for F
where
    F: Fn(&Path, String) -> Result<String, PipelineError> + Send + Sync,
{
    fn process(&self, path: &Path, data: String) -> Result<String, PipelineError> {
        self(path, data)
    }
}

/// Directory-backed pipeline.
///
/// Safe to share between threads; lookups are memoised.
pub struct FsPipeline {
    root: PathBuf,
    paths: Vec<PathBuf>,
    extensions: Vec<String>,
    engines: HashMap<String, Vec<ProcessorId>>,
    processors: HashMap<ProcessorId, Arc<dyn Processor>>,
    resolve_cache: DashMap<String, Option<PathBuf>>,
    dependencies: DashSet<PathBuf>,
}

impl FsPipeline {
    pub fn new(root: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
        let root = root.into();
        let paths = if paths.is_empty() { vec![root.clone()] } else { paths };

        let mut engines = HashMap::new();
        for ext in SASS_EXTENSIONS {
            engines.insert(ext.to_string(), vec![ProcessorId::from(SASS_ENGINE)]);
        }

        Self {
            root,
            paths,
            extensions: STYLESHEET_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            engines,
            processors: HashMap::new(),
            resolve_cache: DashMap::new(),
            dependencies: DashSet::new(),
        }
    }

    /// Append `processor` to the chain of files with extension `ext`.
    pub fn register_engine(&mut self, ext: &str, processor: impl Into<ProcessorId>) {
        let ext = ext.trim_start_matches('.').to_string();
        if !self.extensions.contains(&ext) {
            self.extensions.push(ext.clone());
        }
        self.engines.entry(ext).or_default().push(processor.into());
        self.resolve_cache.clear();
    }

    pub fn register_processor(
        &mut self,
        id: impl Into<ProcessorId>,
        processor: impl Processor + 'static,
    ) {
        self.processors.insert(id.into(), Arc::new(processor));
    }

    /// Dependencies registered so far, sorted.
    pub fn dependencies(&self) -> Vec<PathBuf> {
        let mut deps: Vec<PathBuf> = self.dependencies.iter().map(|p| p.key().clone()).collect();
        deps.sort();
        deps
    }

    fn resolve_file(&self, p: &Path) -> Option<PathBuf> {
        // Try exact path first
        if p.is_file() {
            return Some(p.to_path_buf());
        }

        // Try adding extensions
        for ext in &self.extensions {
            let candidate = PathBuf::from(format!("{}.{}", p.display(), ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }

    fn within_search_roots(&self, path: &Path) -> bool {
        self.paths.iter().any(|root| path.starts_with(root))
    }
}

impl Pipeline for FsPipeline {
    fn resolve_logical_path(&self, candidate: &str) -> Option<PathBuf> {
        if let Some(v) = self.resolve_cache.get(candidate) {
            trace!("Cache hit for logical path: '{}'", candidate);
            return v.clone();
        }

        let logical = Path::new(candidate);
        let resolved = if logical.is_absolute() {
            self.resolve_file(&clean(logical))
        } else {
            self.paths.iter().find_map(|root| {
                trace!("Looking for '{}' under {}", candidate, root.display());
                self.resolve_file(&clean(root.join(logical)))
            })
        };

        self.resolve_cache.insert(candidate.to_string(), resolved.clone());
        resolved
    }

    fn is_requirable_asset(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| n.starts_with('.'));
        let known_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|known| known == e));
        !hidden && known_ext && path.is_file()
    }

    fn register_dependency(&self, path: &Path) -> Result<(), PipelineError> {
        if !path.is_file() || !self.within_search_roots(path) {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }
        trace!("Registered dependency: {}", path.display());
        self.dependencies.insert(path.to_path_buf());
        Ok(())
    }

    fn processors_for(&self, path: &Path) -> Vec<ProcessorId> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.engines.get(e))
            .cloned()
            .unwrap_or_default()
    }

    fn evaluate(
        &self,
        path: &Path,
        processors: &[ProcessorId],
    ) -> Result<Option<EvaluatedAsset>, PipelineError> {
        let mut data = fs::read_to_string(path)
            .map_err(|source| PipelineError::Io { path: path.to_path_buf(), source })?;

        for id in processors {
            let processor = self.processors.get(id).ok_or_else(|| {
                PipelineError::UnknownProcessor { id: id.to_string(), path: path.to_path_buf() }
            })?;
            trace!("Applying processor '{}' to {}", id, path.display());
            data = processor.process(path, data)?;
        }

        debug!("Evaluated {} through {} processors", path.display(), processors.len());
        Ok(Some(EvaluatedAsset { data }))
    }

    fn search_roots(&self) -> &[PathBuf] {
        &self.paths
    }

    fn root_path(&self) -> &Path {
        &self.root
    }
}
