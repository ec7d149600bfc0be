//! Turns an `@import` argument into the ordered list of logical paths the
//! pipeline is asked about.
//!
//! For `@import "foo"` from `<root>/styles/main.scss` the candidates are:
//!
//! ```text
//! styles/foo, styles/_foo, foo, _foo
//! ```
//!
//! Root-relative variants come first, and the non-partial form of each variant
//! is tried before the partial one.

use log::trace;
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::{
    constants::PARTIAL_MARKER,
    paths::{make_relative, parent_dir, to_unix_path},
};

/// Returns `path` with the partial marker prepended to its file name, or
/// `None` when the file name is empty or already marked.
pub fn partialize(path: &str) -> Option<String> {
    let path = to_unix_path(path);
    let (dir, name) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path.as_str()),
    };
    if name.is_empty() || name.starts_with(PARTIAL_MARKER) {
        return None;
    }
    Some(format!("{dir}{PARTIAL_MARKER}{name}"))
}

/// Whether an import argument names an absolute location.
pub fn is_absolute_import(argument: &str) -> bool {
    argument.starts_with('/') || Path::new(argument).is_absolute()
}

/// Candidate logical paths for `argument` imported from `base_path`.
///
/// `roots` are the pipeline's search roots in priority order; the first one
/// containing the importing file's directory is used to build root-relative
/// variants, else `fallback_root`. Never yields empty entries; an empty
/// argument has no candidates at all.
pub fn candidates_for(
    argument: &str,
    base_path: &Path,
    roots: &[PathBuf],
    fallback_root: &Path,
) -> Vec<String> {
    let base_dir = parent_dir(base_path);
    let root =
        roots.iter().find(|r| base_dir.starts_with(r)).map_or(fallback_root, |r| r.as_path());

    let mut candidates = Vec::with_capacity(4);
    if argument.trim().is_empty() {
        trace!("No candidates for an empty import from {}", base_path.display());
        return candidates;
    }

    if !is_absolute_import(argument)
        && base_dir != root
        && let Some(dir_from_root) = make_relative(base_dir, root)
    {
        let relative = to_unix_path(&clean(dir_from_root.join(argument)).to_string_lossy());
        let partial = partialize(&relative);
        if !relative.is_empty() {
            candidates.push(relative);
        }
        candidates.extend(partial);
    }

    candidates.push(to_unix_path(argument));
    candidates.extend(partialize(argument));

    trace!("Candidates for '{}' from {}: {:?}", argument, base_path.display(), candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partialize_bare_name() {
        assert_eq!(partialize("foo").as_deref(), Some("_foo"));
    }

    #[test]
    fn test_partialize_nested_path() {
        assert_eq!(partialize("vars/colors").as_deref(), Some("vars/_colors"));
        assert_eq!(partialize("vars/colors.scss").as_deref(), Some("vars/_colors.scss"));
    }

    #[test]
    fn test_partialize_already_partial() {
        assert_eq!(partialize("_foo"), None);
        assert_eq!(partialize("vars/_colors"), None);
    }

    #[test]
    fn test_partialize_twice_is_none() {
        let once = partialize("lib/buttons").unwrap();
        assert_eq!(partialize(&once), None);
    }

    #[test]
    fn test_partialize_windows_separators() {
        assert_eq!(partialize(r"vars\colors").as_deref(), Some("vars/_colors"));
    }

    #[test]
    fn test_partialize_single_marker() {
        let partial = partialize("a/b/c").unwrap();
        let name = partial.rsplit('/').next().unwrap();
        assert!(name.starts_with('_'));
        assert!(!name[1..].starts_with('_'));
    }

    #[test]
    fn test_partialize_empty_name() {
        assert_eq!(partialize(""), None);
        assert_eq!(partialize("vars/"), None);
    }

    #[test]
    fn test_candidates_base_at_root() {
        let roots = vec![PathBuf::from("/proj/styles")];
        let base = Path::new("/proj/styles/main.scss");
        let c = candidates_for("foo", base, &roots, Path::new("/proj"));
        assert_eq!(c, vec!["foo", "_foo"]);
    }

    #[test]
    fn test_candidates_root_relative_first() {
        let roots = vec![PathBuf::from("/proj")];
        let base = Path::new("/proj/styles/main.scss");
        let c = candidates_for("foo", base, &roots, Path::new("/proj"));
        assert_eq!(c, vec!["styles/foo", "styles/_foo", "foo", "_foo"]);
    }

    #[test]
    fn test_candidates_explicit_partial() {
        let roots = vec![PathBuf::from("/proj")];
        let c =
            candidates_for("_foo", Path::new("/proj/styles/main.scss"), &roots, Path::new("/proj"));
        assert_eq!(c, vec!["styles/_foo", "_foo"]);
    }

    #[test]
    fn test_candidates_parent_relative_is_cleaned() {
        let roots = vec![PathBuf::from("/proj")];
        let c = candidates_for(
            "../shared/mixins",
            Path::new("/proj/styles/main.scss"),
            &roots,
            Path::new("/proj"),
        );
        assert_eq!(c[0], "shared/mixins");
        assert_eq!(c[1], "shared/_mixins");
    }

    #[test]
    fn test_candidates_absolute_argument() {
        let roots = vec![PathBuf::from("/proj")];
        let c = candidates_for(
            "/proj/lib/grid",
            Path::new("/proj/styles/main.scss"),
            &roots,
            Path::new("/proj"),
        );
        assert_eq!(c, vec!["/proj/lib/grid", "/proj/lib/_grid"]);
    }

    #[test]
    fn test_candidates_fallback_root() {
        let roots = vec![PathBuf::from("/elsewhere")];
        let c = candidates_for("foo", Path::new("/proj/a/main.scss"), &roots, Path::new("/proj"));
        assert_eq!(c, vec!["a/foo", "a/_foo", "foo", "_foo"]);
    }

    #[test]
    fn test_candidates_never_empty_entries_and_deterministic() {
        let roots = vec![PathBuf::from("/proj")];
        let base = Path::new("/proj/x/y/main.scss");
        let first = candidates_for("_z", base, &roots, Path::new("/proj"));
        let second = candidates_for("_z", base, &roots, Path::new("/proj"));
        assert!(first.iter().all(|c| !c.is_empty()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidates_empty_argument() {
        let roots = vec![PathBuf::from("/proj")];
        let base = Path::new("/proj/styles/main.scss");
        assert!(candidates_for("", base, &roots, Path::new("/proj")).is_empty());
        assert!(candidates_for("  ", base, &roots, Path::new("/proj")).is_empty());
    }
}
