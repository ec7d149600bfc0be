use log::{debug, info};
use sassline_core::Pipeline;
use sassline_tree::DependencyTree;
use std::path::Path;

use crate::{
    compiler::{CompileError, CompileRequest, Compiler},
    coordinator::ImportCoordinator,
    error::EngineError,
};

/// Compiles stylesheets with imports resolved through the pipeline.
///
/// Each [`SassEngine::render`] starts from an empty dependency tree, so edges
/// from one document never leak into the diagnostics of another.
pub struct SassEngine<'a, P: Pipeline + ?Sized, C: Compiler + ?Sized> {
    pipeline: &'a P,
    compiler: &'a C,
    tree: DependencyTree,
}

impl<'a, P: Pipeline + ?Sized, C: Compiler + ?Sized> SassEngine<'a, P, C> {
    pub fn new(pipeline: &'a P, compiler: &'a C) -> Self {
        Self { pipeline, compiler, tree: DependencyTree::new() }
    }

    /// Cut this many leading characters from paths in rendered import chains.
    pub fn with_slice_prefix(mut self, prefix: usize) -> Self {
        self.tree.set_slice_prefix(prefix);
        self
    }

    /// Imports recorded by the last render.
    pub fn tree(&self) -> &DependencyTree {
        &self.tree
    }

    pub fn into_tree(self) -> DependencyTree {
        self.tree
    }

    /// Compile `data`, the contents of `file`, to CSS.
    pub fn render(&mut self, file: &Path, data: &str) -> Result<String, EngineError> {
        info!("Compiling {}", file.display());
        self.tree.reset();

        let request = CompileRequest::for_file(file, data, self.pipeline.search_roots());
        let result = {
            let mut coordinator = ImportCoordinator::new(self.pipeline, &mut self.tree);
            self.compiler.compile(&request, &mut coordinator)
        };

        match result {
            Ok(output) => {
                debug!("Compiled {} with {} recorded paths", file.display(), self.tree.len());
                Ok(output.css)
            }
            Err(error) => Err(self.failure(error)),
        }
    }

    fn failure(&self, error: CompileError) -> EngineError {
        let message = error.to_string();
        let import_chain = error
            .file
            .as_deref()
            .filter(|f| self.tree.has_path(f))
            .and_then(|f| self.tree.pruned([f]).render_sliced(None));
        debug!("Compile failed: {} (import chain: {})", message, import_chain.is_some());
        EngineError::Compile { message, error, import_chain }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileOutput, Importer};
    use sassline_core::FsPipeline;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Imports a fixed list of urls, then fails in the last imported file.
    struct ScriptedCompiler {
        imports: Vec<(&'static str, bool)>,
        fail: bool,
    }

    impl Compiler for ScriptedCompiler {
        fn compile(
            &self,
            request: &CompileRequest<'_>,
            importer: &mut dyn Importer,
        ) -> Result<CompileOutput, CompileError> {
            let mut prev = request.file.to_path_buf();
            let mut css = String::new();
            for (url, nested) in &self.imports {
                let resolved = importer.import(url, &prev).unwrap_or_default();
                css.push_str(resolved.contents.as_deref().unwrap_or(""));
                if *nested && let Some(file) = resolved.file {
                    prev = file;
                }
            }
            if self.fail {
                return Err(CompileError::at(&prev, 3, 7, "unexpected token"));
            }
            Ok(CompileOutput { css })
        }
    }

    #[test]
    fn test_render_success() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.scss", "");
        create_test_file(root, "_a.scss", "a{}");
        create_test_file(root, "_b.scss", "b{}");

        let pipeline = FsPipeline::new(root, vec![]);
        let compiler = ScriptedCompiler { imports: vec![("a", false), ("b", false)], fail: false };
        let mut engine = SassEngine::new(&pipeline, &compiler);

        assert_eq!(engine.render(&main, "").unwrap(), "a{}b{}");
        let root_children = &engine.tree().get_path(&main.display().to_string()).unwrap().children;
        assert_eq!(root_children.len(), 2);
    }

    #[test]
    fn test_render_resets_tree_between_documents() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let first = create_test_file(root, "first.scss", "");
        let second = create_test_file(root, "second.scss", "");
        create_test_file(root, "_a.scss", "");

        let pipeline = FsPipeline::new(root, vec![]);
        let compiler = ScriptedCompiler { imports: vec![("a", false)], fail: false };
        let mut engine = SassEngine::new(&pipeline, &compiler);

        engine.render(&first, "").unwrap();
        engine.render(&second, "").unwrap();
        assert!(!engine.tree().has_path(&first.display().to_string()));
        assert_eq!(engine.tree().root(), Some(second.display().to_string().as_str()));
    }

    #[test]
    fn test_render_failure_reports_import_chain() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.scss", "");
        create_test_file(root, "_a.scss", "");
        create_test_file(root, "_b.scss", "");
        create_test_file(root, "_other.scss", "");

        let pipeline = FsPipeline::new(root, vec![]);
        let compiler = ScriptedCompiler {
            imports: vec![("other", false), ("a", true), ("b", true)],
            fail: true,
        };
        let prefix = root.display().to_string().chars().count() + 1;
        let mut engine = SassEngine::new(&pipeline, &compiler).with_slice_prefix(prefix);

        let err = engine.render(&main, "").unwrap_err();
        let failing = root.join("_b.scss");
        assert_eq!(err.to_string(), format!("{}(3,7): unexpected token", failing.display()));

        let chain = err.import_chain().unwrap();
        assert_eq!(chain.to_string(), "main.scss\n└── _a.scss\n    └── _b.scss\n");
    }

    #[test]
    fn test_render_failure_in_document_itself() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.scss", "");

        let pipeline = FsPipeline::new(root, vec![]);
        let compiler = ScriptedCompiler { imports: vec![], fail: true };
        let mut engine = SassEngine::new(&pipeline, &compiler);

        let err = engine.render(&main, "").unwrap_err();
        assert!(err.import_chain().is_none());
    }
}
