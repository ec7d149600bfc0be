use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use sassline_core::{FsPipeline, ResolvedImport, collect_entries};
use sassline_tree::DependencyTree;
use std::{fs, path::Path, thread};

use crate::{
    compiler::Importer,
    config::{Config, ResolveConfig},
    coordinator::ImportCoordinator,
    engine::SassEngine,
    error::EngineError,
    inline::ImportInliner,
    types::{CheckResult, EntryReport},
};

/// Compile every entry in parallel and collect each one's import tree.
///
/// Entries share the pipeline (and with it the synthetic glob counter) but
/// each compile owns its dependency tree.
pub fn run_tree_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting import tree check");
    cfg.initialize()?;
    let root = cfg.project.root()?.clone();

    let entries = if cfg.entries.is_empty() {
        debug!("Collecting entry files with glob: {:?}", cfg.entry_glob);
        collect_entries(&root, cfg.entry_glob.as_deref())?
    } else {
        cfg.entries.clone()
    };
    if entries.is_empty() {
        warn!("No entry stylesheets found under {}", root.display());
        return Err(anyhow!("No entry stylesheets found under {}", root.display()));
    }
    info!("Found {} entry files", entries.len());

    let pipeline = FsPipeline::new(&root, cfg.project.search_roots.clone());
    let compiler = ImportInliner::default();
    let slice_prefix = cfg.effective_slice_prefix();

    let reports: Vec<EntryReport> = entries
        .par_iter()
        .map(|entry| {
            debug!("Thread {:?} processing: {}", thread::current().id(), entry.display());
            compile_entry(&pipeline, &compiler, entry, slice_prefix)
        })
        .collect();

    let result = CheckResult { reports, dependencies: pipeline.dependencies().len() };
    info!(
        "Import tree check complete. {} entries, {} failures",
        result.reports.len(),
        result.failures()
    );
    Ok(result)
}

fn compile_entry(
    pipeline: &FsPipeline,
    compiler: &ImportInliner,
    entry: &Path,
    slice_prefix: usize,
) -> EntryReport {
    let mut report = EntryReport {
        entry: entry.to_path_buf(),
        tree: DependencyTree::new(),
        css_bytes: None,
        error: None,
        import_chain: None,
    };

    let data = match fs::read_to_string(entry) {
        Ok(data) => data,
        Err(e) => {
            warn!("Error reading {}: {}", entry.display(), e);
            report.error = Some(format!("Failed to read {}: {}", entry.display(), e));
            return report;
        }
    };

    let mut engine = SassEngine::new(pipeline, compiler).with_slice_prefix(slice_prefix);
    match engine.render(entry, &data) {
        Ok(css) => {
            trace!("Compiled {} to {} bytes", entry.display(), css.len());
            report.css_bytes = Some(css.len());
        }
        Err(e @ EngineError::Compile { .. }) => {
            warn!("Compile failed for {}: {}", entry.display(), e);
            report.import_chain = e.import_chain().cloned();
            report.error = Some(e.to_string());
        }
    }
    report.tree = engine.into_tree();
    report
}

/// Run the import coordinator once, the way the compiler would for one import.
pub fn run_resolve(mut cfg: ResolveConfig) -> Result<ResolvedImport> {
    cfg.project.initialize()?;
    let root = cfg.project.root()?.clone();
    let from = if cfg.from.is_absolute() { cfg.from.clone() } else { root.join(&cfg.from) };
    let from = from.canonicalize().with_context(|| format!("Cannot find {}", from.display()))?;

    let pipeline = FsPipeline::new(&root, cfg.project.search_roots.clone());
    let mut tree = DependencyTree::new();
    let resolved = ImportCoordinator::new(&pipeline, &mut tree)
        .import(&cfg.url, &from)
        .unwrap_or_default();
    debug!("Resolved '{}' from {}: {:?}", cfg.url, from.display(), resolved.file);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config_for(root: &Path, extra: &[&str]) -> Config {
        let mut args = vec!["tree", "--root", root.to_str().unwrap()];
        args.extend_from_slice(extra);
        Config::parse_from(args)
    }

    #[test]
    fn test_tree_check_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        create_test_file(&root, "styles/app.scss", "@import \"vars/*\";\n@import \"buttons\";");
        create_test_file(&root, "styles/vars/_colors.scss", "$red: #f00;");
        create_test_file(&root, "styles/vars/_sizes.scss", "$gap: 4px;");
        create_test_file(&root, "styles/_buttons.scss", "@import \"mixins\";\n.btn {}");
        create_test_file(&root, "lib/_mixins.scss", "@mixin m {}");

        let cfg = config_for(&root, &["--load-path", "styles", "--load-path", "lib"]);
        let result = run_tree_check(cfg).unwrap();

        assert_eq!(result.reports.len(), 1);
        let report = &result.reports[0];
        assert_eq!(report.error, None);
        assert!(report.css_bytes.unwrap() > 0);

        let rendered = report.tree.render_sliced(None).unwrap().to_string();
        assert!(rendered.starts_with("styles/app.scss\n"));
        assert!(rendered.contains("styles/vars/_colors.scss"));
        assert!(rendered.contains("styles/_buttons.scss"));
        assert!(rendered.contains("lib/_mixins.scss"));
        assert_eq!(result.dependencies, 4);
    }

    #[test]
    fn test_tree_check_reports_failure_chain() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        create_test_file(&root, "app.scss", "@import \"a\";\n@import \"ok\";");
        create_test_file(&root, "_ok.scss", "");
        create_test_file(&root, "_a.scss", "@import \"b\";");
        create_test_file(&root, "_b.scss", ".b {}\n@import \"missing\";");

        let result = run_tree_check(config_for(&root, &[])).unwrap();
        assert_eq!(result.failures(), 1);

        let report = &result.reports[0];
        let error = report.error.as_deref().unwrap();
        assert!(error.ends_with("_b.scss(2,1): File to import not found or unreadable: missing"));
        assert_eq!(
            report.import_chain.as_ref().unwrap().to_string(),
            "app.scss\n└── _a.scss\n    └── _b.scss\n"
        );
    }

    #[test]
    fn test_tree_check_independent_trees() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        create_test_file(&root, "one.scss", "@import \"shared\";");
        create_test_file(&root, "two.scss", "@import \"shared\";");
        create_test_file(&root, "_shared.scss", "");

        let result = run_tree_check(config_for(&root, &[])).unwrap();
        assert_eq!(result.reports.len(), 2);
        for report in &result.reports {
            let entry = report.entry.display().to_string();
            assert_eq!(report.tree.root(), Some(entry.as_str()));
            assert_eq!(report.tree.len(), 2);
            assert!(report.tree.has_path(&root.join("_shared.scss").display().to_string()));
        }
    }

    #[test]
    fn test_tree_check_no_entries() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "_only_partial.scss", "");
        assert!(run_tree_check(config_for(temp_dir.path(), &[])).is_err());
    }

    #[test]
    fn test_run_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        create_test_file(&root, "styles/main.scss", "");
        let partial = create_test_file(&root, "styles/_foo.scss", "a {}");

        let cfg = ResolveConfig::parse_from([
            "resolve",
            "foo",
            "--from",
            "styles/main.scss",
            "--root",
            root.to_str().unwrap(),
        ]);
        let resolved = run_resolve(cfg).unwrap();
        assert_eq!(resolved.file, Some(partial));
        assert_eq!(resolved.contents.as_deref(), Some("a {}"));
    }
}
