use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::{partial::candidates_for, pipeline::Pipeline};

/// Find the asset an `@import` argument refers to, following the pipeline's
/// search roots and the partial naming convention.
///
/// A miss is not an error: `None` tells the caller to report the import as
/// unresolved and let the compiler fall back to its own rules.
pub fn resolve<P: Pipeline + ?Sized>(
    pipeline: &P,
    argument: &str,
    base_path: &Path,
) -> Option<PathBuf> {
    trace!("Resolving: '{}' from {}", argument, base_path.display());
    let candidates =
        candidates_for(argument, base_path, pipeline.search_roots(), pipeline.root_path());

    for candidate in &candidates {
        let Some(found) = pipeline.resolve_logical_path(candidate) else {
            trace!("No asset for candidate '{}'", candidate);
            continue;
        };
        if pipeline.is_requirable_asset(&found) {
            debug!("Resolved '{}' from {} to {}", argument, base_path.display(), found.display());
            return Some(found);
        }
        trace!("Candidate '{}' found {} but it is not requirable", candidate, found.display());
    }

    warn!(
        "Unresolved import '{}' from {} (tried {})",
        argument,
        base_path.display(),
        candidates.join(", ")
    );
    None
}
