//! `@import` handling for stylesheet compilation.
//!
//! The [`ImportCoordinator`] answers a compiler's import callbacks: wildcard
//! imports are expanded into a synthetic stylesheet, everything else is
//! resolved through the asset pipeline, and every answer is recorded in a
//! per-compile [`DependencyTree`](sassline_tree::DependencyTree). When a
//! compile fails the tree is pruned to the chain of imports that reached the
//! failing file.
//!
//! # Examples
//!
//! ```no_run
//! use sassline_core::FsPipeline;
//! use sassline_import::{ImportInliner, SassEngine};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let pipeline = FsPipeline::new("/path/to/project", vec![]);
//! let compiler = ImportInliner::default();
//! let mut engine = SassEngine::new(&pipeline, &compiler);
//!
//! match engine.render(Path::new("/path/to/project/app.scss"), "@import \"vars/*\";") {
//!     Ok(css) => println!("{css}"),
//!     Err(e) => {
//!         eprintln!("{e}");
//!         if let Some(chain) = e.import_chain() {
//!             eprint!("{chain}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod compiler;
mod config;
mod coordinator;
mod engine;
mod error;
mod inline;
mod reporter;
mod types;

// Re-export public API
pub use checker::{run_resolve, run_tree_check};
pub use compiler::{CompileError, CompileOutput, CompileRequest, Compiler, Importer};
pub use config::{Config, ProjectArgs, ResolveConfig};
pub use coordinator::{ImportCoordinator, ImportKind, classify};
pub use engine::SassEngine;
pub use error::EngineError;
pub use inline::{DEFAULT_MAX_DEPTH, ImportInliner};
pub use reporter::{print_json, print_reports};
pub use types::{CheckResult, EntryReport};
