use log::{debug, warn};
use std::path::Path;

use crate::{constants::SASS_ENGINE, error::PipelineError, pipeline::Pipeline};

/// Evaluate a resolved import through its processor chain minus the
/// import-capable engine, returning the text the compiler should see.
///
/// Dropping the engine for this one call keeps the evaluation from
/// re-entering the import handler. `Ok(None)` means the pipeline produced
/// nothing for the file.
pub fn load<P: Pipeline + ?Sized>(
    pipeline: &P,
    resolved: &Path,
) -> Result<Option<String>, PipelineError> {
    let processors: Vec<_> = pipeline
        .processors_for(resolved)
        .into_iter()
        .filter(|id| id.as_str() != SASS_ENGINE)
        .collect();
    debug!("Loading {} with processors {:?}", resolved.display(), processors);

    match pipeline.evaluate(resolved, &processors)? {
        Some(asset) => Ok(Some(asset.data)),
        None => {
            warn!("Evaluating {} produced no content", resolved.display());
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::FsPipeline,
        types::{EvaluatedAsset, ProcessorId},
    };
    use std::{cell::RefCell, fs, path::PathBuf};
    use tempfile::TempDir;

    #[test]
    fn test_load_strips_sass_engine() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let file = root.join("_vars.scss");
        fs::write(&file, "$red: #f00;").unwrap();

        // Evaluating with the sass engine still in the chain would fail: no
        // processor is registered for it.
        let pipeline = FsPipeline::new(root, vec![]);
        assert_eq!(load(&pipeline, &file).unwrap().as_deref(), Some("$red: #f00;"));
    }

    #[test]
    fn test_load_keeps_other_processors() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let file = root.join("theme.scss.tpl");
        fs::write(&file, "$brand: BRAND;").unwrap();

        let mut pipeline = FsPipeline::new(root, vec![]);
        pipeline.register_engine("tpl", "tpl");
        pipeline.register_engine("tpl", SASS_ENGINE);
        pipeline.register_processor("tpl", |_: &Path, d: String| {
            Ok::<_, PipelineError>(d.replace("BRAND", "#0af"))
        });

        assert_eq!(load(&pipeline, &file).unwrap().as_deref(), Some("$brand: #0af;"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = FsPipeline::new(temp_dir.path(), vec![]);
        let err = load(&pipeline, &temp_dir.path().join("gone.scss")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    /// Pipeline that records the chain it was asked to run and produces nothing.
    struct RecordingPipeline {
        root: PathBuf,
        seen: RefCell<Vec<ProcessorId>>,
    }

    impl Pipeline for RecordingPipeline {
        fn resolve_logical_path(&self, _: &str) -> Option<PathBuf> {
            None
        }
        fn is_requirable_asset(&self, _: &Path) -> bool {
            true
        }
        fn register_dependency(&self, _: &Path) -> Result<(), PipelineError> {
            Ok(())
        }
        fn processors_for(&self, _: &Path) -> Vec<ProcessorId> {
            vec!["erb".into(), SASS_ENGINE.into(), "autoprefix".into()]
        }
        fn evaluate(
            &self,
            _: &Path,
            processors: &[ProcessorId],
        ) -> Result<Option<EvaluatedAsset>, PipelineError> {
            self.seen.borrow_mut().extend_from_slice(processors);
            Ok(None)
        }
        fn search_roots(&self) -> &[PathBuf] {
            std::slice::from_ref(&self.root)
        }
        fn root_path(&self) -> &Path {
            &self.root
        }
    }

    #[test]
    fn test_load_empty_evaluation() {
        let pipeline =
            RecordingPipeline { root: PathBuf::from("/proj"), seen: RefCell::new(vec![]) };
        assert_eq!(load(&pipeline, Path::new("/proj/_empty.scss")).unwrap(), None);
        assert_eq!(
            pipeline.seen.into_inner(),
            vec![ProcessorId::from("erb"), ProcessorId::from("autoprefix")]
        );
    }
}
