use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::{PARTIAL_MARKER, SASS_EXTENSIONS};

/// Stylesheets under `root` that compile to their own output: `.scss`/`.sass`
/// files that are not partials. Gitignored files are skipped.
pub fn collect_entries(root: &Path, entry_glob: Option<&str>) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let is_stylesheet = p
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SASS_EXTENSIONS.contains(&ext));
        let is_partial = p
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(PARTIAL_MARKER));
        if !is_stylesheet || is_partial {
            continue;
        }

        // If entry_glob is set, check if the relative path from root contains the pattern
        if let Some(gl) = entry_glob {
            let rel = p.strip_prefix(root).unwrap_or(p).to_string_lossy();
            if !rel.contains(gl) {
                trace!("Skipping {} (does not contain '{}')", rel, gl);
                continue;
            }
        }

        trace!("Found entry file: {}", p.display());
        files.push(p.to_path_buf());
    }

    files.sort();
    debug!("Collected {} entry files", files.len());
    Ok(files)
}
