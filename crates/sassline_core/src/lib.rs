//! Core of pipeline-aware stylesheet import resolution.
//!
//! This crate maps `@import` arguments onto the assets of a host pipeline
//! instead of the preprocessor's own filesystem rules:
//! - Building partial and root-relative lookup candidates
//! - Resolving candidates through the pipeline's search roots
//! - Expanding wildcard imports into synthetic stylesheets
//! - Loading resolved files without re-entering the import engine
//! - A directory-backed pipeline, project configuration and entry collection

mod collector;
mod config;
mod constants;
mod error;
mod glob;
mod loader;
mod partial;
mod paths;
mod pipeline;
mod resolver;
mod types;

// Re-export public API
pub use collector::collect_entries;
pub use config::{find_git_root, read_load_paths, resolve_load_paths};
pub use constants::{
    CONFIG_FILE, PARTIAL_MARKER, SASS_ENGINE, SASS_EXTENSIONS, STYLESHEET_EXTENSIONS,
};
pub use error::PipelineError;
pub use glob::{expand as expand_glob_import, expand_glob, is_glob, synthetic_file};
pub use loader::load;
pub use partial::{candidates_for, is_absolute_import, partialize};
pub use paths::{display_unix, make_relative, parent_dir, to_unix_path};
pub use pipeline::{FsPipeline, Pipeline, Processor};
pub use resolver::resolve;
pub use types::{EvaluatedAsset, ImportRequest, ProcessorId, ResolvedImport};
