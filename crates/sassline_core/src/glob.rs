//! Wildcard imports.
//!
//! `@import "vars/*";` is expanded against the importing file's directory and
//! replaced by a synthetic stylesheet holding one `@import` per match:
//!
//! ```text
//! @import "vars/_colors.scss";
//! @import "vars/_spacing.scss";
//! ```

use globset::GlobBuilder;
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    error::PipelineError,
    paths::{display_unix, make_relative, parent_dir, to_unix_path},
    pipeline::Pipeline,
    types::ResolvedImport,
};

/// Process-wide counter behind synthetic glob file names. The compiler keys
/// its import cache on the returned file, so names must never repeat.
static GLOB_COUNTER: AtomicUsize = AtomicUsize::new(0);

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Whether an import argument is a wildcard: a `*` or a non-empty `[...]` class.
pub fn is_glob(argument: &str) -> bool {
    if argument.contains('*') {
        return true;
    }
    argument
        .find('[')
        .and_then(|open| argument[open + 1..].find(']'))
        .is_some_and(|close| close > 0)
}

/// Every requirable asset matching `pattern` relative to the directory of
/// `base_path`, in walk order (sorted by file name, depth first). The importing
/// file itself is never included.
pub fn expand_glob<P: Pipeline + ?Sized>(
    pipeline: &P,
    pattern: &str,
    base_path: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    let base_dir = parent_dir(base_path);
    let (walk_root, rest, max_depth) = walk_bounds(base_dir, pattern);
    let root_glob = globset::escape(display_unix(&walk_root).trim_end_matches('/'));
    let matcher = GlobBuilder::new(&format!("{root_glob}/{rest}"))
        .literal_separator(true)
        .build()
        .map_err(|e| PipelineError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })?
        .compile_matcher();

    trace!(
        "Expanding '{}' from {} (walk root {})",
        pattern,
        base_dir.display(),
        walk_root.display()
    );
    if !walk_root.is_dir() {
        debug!("Glob root {} does not exist", walk_root.display());
        return Ok(vec![]);
    }

    let importer = clean(base_path);
    let walker = WalkBuilder::new(&walk_root)
        .standard_filters(false)
        .max_depth(max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut matches = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Error walking {}: {}", walk_root.display(), e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let p = dent.path();
        if !matcher.is_match(p) {
            continue;
        }
        let is_valid = p != importer && pipeline.is_requirable_asset(p);
        trace!("Glob match {} (valid: {})", p.display(), is_valid);
        if is_valid {
            matches.push(p.to_path_buf());
        }
    }

    debug!("Glob '{}' matched {} assets", pattern, matches.len());
    Ok(matches)
}

/// Expand a wildcard import into a synthetic stylesheet.
///
/// The synthetic file lives next to the importer so relative imports inside
/// it resolve from the same directory. An empty match set still yields a
/// file with empty contents: the pipeline has claimed the import and the
/// compiler must not fall back to its own lookup.
pub fn expand<P: Pipeline + ?Sized>(
    pipeline: &P,
    pattern: &str,
    base_path: &Path,
) -> Result<ResolvedImport, PipelineError> {
    let base_dir = parent_dir(base_path);
    let matches = expand_glob(pipeline, pattern, base_path)?;

    let imports: Vec<String> = matches
        .iter()
        .map(|asset| {
            if let Err(e) = pipeline.register_dependency(asset) {
                warn!(
                    "{} will not change when {} changes: {}",
                    base_path.display(),
                    asset.display(),
                    e
                );
            }
            let relative = make_relative(asset, base_dir).unwrap_or_else(|| asset.clone());
            format!("@import \"{}\";", display_unix(&relative))
        })
        .collect();

    let file = synthetic_file(pattern, base_path);
    debug!("Synthesized {} with {} imports", file.display(), imports.len());
    Ok(ResolvedImport { file: Some(file), contents: Some(imports.join("\n")) })
}

/// A fresh synthetic file for `pattern` next to `base_path`.
pub fn synthetic_file(pattern: &str, base_path: &Path) -> PathBuf {
    parent_dir(base_path).join(synthetic_name(pattern))
}

/// `<counter>_<pattern>` with every character outside `[A-Za-z0-9._-]`
/// replaced by `_`.
fn synthetic_name(pattern: &str) -> String {
    let n = GLOB_COUNTER.fetch_add(1, Ordering::Relaxed);
    let sanitized: String = pattern
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    format!("{n}_{sanitized}")
}

/// Split `pattern` at its last literal directory: the walk starts from that
/// directory joined onto `base_dir`, and the remainder is matched below it
/// down to the returned depth (`None` for `**`). Only the pattern is searched
/// for metacharacters, so `base_dir` may contain any.
fn walk_bounds(base_dir: &Path, pattern: &str) -> (PathBuf, String, Option<usize>) {
    let pattern = to_unix_path(pattern);
    let first_meta = pattern.find(GLOB_META).unwrap_or(pattern.len());
    let split = pattern[..first_meta].rfind('/').map_or(0, |idx| idx + 1);
    let (literal, rest) = pattern.split_at(split);

    let root = clean(base_dir.join(literal));
    let depth = if rest.contains("**") { None } else { Some(rest.split('/').count()) };
    (root, rest.to_string(), depth)
}
