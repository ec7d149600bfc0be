use anyhow::{Result, anyhow};
use clap::{Args, Parser};
use log::{debug, info};
use std::path::PathBuf;

/// Where the project lives and which directories the pipeline searches.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Search root, in priority order (repeatable; defaults to `loadPaths` in
    /// sassline.json, else the project root)
    #[arg(long = "load-path")]
    pub load_paths: Vec<PathBuf>,

    #[clap(skip)]
    pub search_roots: Vec<PathBuf>,
}

impl ProjectArgs {
    /// Initialize by resolving the root directory and the search roots
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            sassline_core::find_git_root()?
        };
        info!("Using root directory: {}", root.display());

        self.search_roots = sassline_core::resolve_load_paths(&root, &self.load_paths)?;
        debug!("Search roots: {:?}", self.search_roots);

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "tree")]
#[command(about = "Compile stylesheets and show the import tree of each")]
pub struct Config {
    /// Entry stylesheets (defaults to every non-partial stylesheet under the root)
    pub entries: Vec<PathBuf>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only consider entries whose path relative to the root contains this
    #[arg(long)]
    pub entry_glob: Option<String>,

    /// Characters cut from the front of every path in trees (defaults to the root prefix)
    #[arg(long)]
    pub slice_prefix: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn initialize(&mut self) -> Result<()> {
        self.project.initialize()?;
        let root = self.project.root()?.clone();
        self.entries = self
            .entries
            .drain(..)
            .map(|e| if e.is_absolute() { e } else { root.join(e) })
            .collect();
        Ok(())
    }

    /// Characters to cut from labels: the explicit value, else `<root>/`.
    pub fn effective_slice_prefix(&self) -> usize {
        self.slice_prefix.unwrap_or_else(|| {
            self.project.root.as_ref().map_or(0, |r| r.display().to_string().chars().count() + 1)
        })
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "resolve")]
#[command(about = "Show what a single @import resolves to")]
pub struct ResolveConfig {
    /// The @import argument, e.g. `vars/*` or `buttons`
    pub url: String,

    /// The stylesheet containing the import
    #[arg(long)]
    pub from: PathBuf,

    #[command(flatten)]
    pub project: ProjectArgs,
}
