//! Import dependency tree for stylesheet compiles.
//!
//! Records which file imported which while a document compiles, and turns
//! that record into focused diagnostics when the compile fails:
//!
//! ```
//! use sassline_tree::DependencyTree;
//!
//! let mut tree = DependencyTree::new();
//! tree.add_path("/app/_vars.scss", "/app/main.scss", "vars");
//! tree.add_path("/app/_colors.scss", "/app/_vars.scss", "colors");
//! tree.add_path("/app/_grid.scss", "/app/main.scss", "grid");
//!
//! // Only the chain leading to the failing file
//! let chain = tree.pruned(["/app/_colors.scss"]);
//! let rendered = chain.render(None, |p| p.trim_start_matches("/app/").to_string()).unwrap();
//! assert_eq!(
//!     rendered.to_string(),
//!     "main.scss\n└── _vars.scss\n    └── _colors.scss\n"
//! );
//! ```

mod reporter;
mod tree;

// Re-export public API
pub use reporter::print_tree;
pub use tree::{DependencyEdge, DependencyTree, TreeNode, fixed_prefix};
