use sassline_tree::TreeNode;
use thiserror::Error;

use crate::compiler::CompileError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The compiler rejected the document. `import_chain` shows how the
    /// failing file was reached, when it was reached through imports.
    #[error("{message}")]
    Compile {
        message: String,
        #[source]
        error: CompileError,
        import_chain: Option<TreeNode>,
    },
}

impl EngineError {
    pub fn import_chain(&self) -> Option<&TreeNode> {
        match self {
            EngineError::Compile { import_chain, .. } => import_chain.as_ref(),
        }
    }
}
