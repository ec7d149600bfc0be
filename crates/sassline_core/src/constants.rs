//! Constants shared by the resolver, the glob expander and the file pipeline.
//!
//! ## Partials
//!
//! A stylesheet whose file name starts with [`PARTIAL_MARKER`] is a partial: it
//! can be imported without the marker and is never compiled on its own.

/// File name prefix marking a stylesheet partial
pub const PARTIAL_MARKER: char = '_';

/// Stylesheet extensions the pipeline treats as requirable assets (in priority order)
pub const STYLESHEET_EXTENSIONS: &[&str] = &["scss", "sass", "css"];

/// Extensions compiled by the import-capable engine
pub const SASS_EXTENSIONS: &[&str] = &["scss", "sass"];

/// Processor id of the import-capable engine
pub const SASS_ENGINE: &str = "sass";

/// Name of the optional project file listing search roots
pub const CONFIG_FILE: &str = "sassline.json";
