use std::path::{Component, Path, PathBuf};

/// Rewrite backslash separators to forward slashes.
pub fn to_unix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lossy forward-slash rendering of a path.
pub fn display_unix(path: &Path) -> String {
    to_unix_path(&path.to_string_lossy())
}

/// Directory of `file`, or an empty path when it has none.
pub fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(Path::new(""))
}

/// Create a relative path from `base` to `target`
pub fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let mut target_components = target.components().peekable();
    let mut base_components = base.components().peekable();

    // Both sides must agree on being absolute
    if target.has_root() != base.has_root() {
        return None;
    }

    // Skip the common prefix
    while let (Some(t), Some(b)) = (target_components.peek(), base_components.peek()) {
        if t != b {
            break;
        }
        target_components.next();
        base_components.next();
    }

    let mut result = PathBuf::new();
    for component in base_components {
        match component {
            Component::Normal(_) | Component::ParentDir => result.push(".."),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    for component in target_components {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}
