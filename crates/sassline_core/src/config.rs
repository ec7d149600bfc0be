use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use path_clean::clean;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::CONFIG_FILE;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFile {
    #[serde(default)]
    load_paths: Vec<String>,
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(anyhow!("Could not find .git directory in any parent folder")),
        }
    }
}

/// Read `loadPaths` from the project file at `root`, if there is one.
pub fn read_load_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let file = root.join(CONFIG_FILE);
    if !file.is_file() {
        trace!("No {} at {:?}", CONFIG_FILE, root);
        return Ok(vec![]);
    }

    let content =
        fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let project: ProjectFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    debug!("Loaded {} load paths from {}", project.load_paths.len(), file.display());
    Ok(project.load_paths.iter().map(|p| absolutize(root, Path::new(p))).collect())
}

/// Search roots for `root`: explicit paths win, then the project file, then
/// the root itself.
pub fn resolve_load_paths(root: &Path, explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        return Ok(explicit.iter().map(|p| absolutize(root, p)).collect());
    }
    let from_file = read_load_paths(root)?;
    if !from_file.is_empty() {
        return Ok(from_file);
    }
    Ok(vec![root.to_path_buf()])
}

fn absolutize(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() { clean(p) } else { clean(root.join(p)) }
}
