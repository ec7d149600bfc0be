use colored::Colorize;
use log::debug;
use std::{
    fmt,
    io::{self, Write},
};

use crate::tree::TreeNode;

/// Plain box-drawing rendering, as used in error messages.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        fmt_children(f, &self.nodes, "")
    }
}

fn fmt_children(f: &mut fmt::Formatter<'_>, nodes: &[TreeNode], prefix: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let continuation = if is_last { "    " } else { "│   " };

        writeln!(f, "{prefix}{connector}{}", node.label)?;
        fmt_children(f, &node.nodes, &format!("{prefix}{continuation}"))?;
    }
    Ok(())
}

/// Print `node` with colours: the root bold, connectors dimmed and leaves
/// (files importing nothing) in blue.
pub fn print_tree<W: Write>(writer: &mut W, node: &TreeNode) -> io::Result<()> {
    debug!("Printing import tree rooted at {}", node.label);
    writeln!(writer, "{}", node.label.bright_white().bold())?;
    print_children(writer, &node.nodes, "")?;
    writer.flush()?;
    Ok(())
}

fn print_children<W: Write>(writer: &mut W, nodes: &[TreeNode], prefix: &str) -> io::Result<()> {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let connector = if is_last { "└──" } else { "├──" };
        let continuation = if is_last { "    " } else { "│   " };

        let label = if node.nodes.is_empty() {
            node.label.blue().to_string()
        } else {
            node.label.clone()
        };
        writeln!(writer, "{}{} {}", prefix.dimmed(), connector.dimmed(), label)?;
        print_children(writer, &node.nodes, &format!("{prefix}{continuation}"))?;
    }
    Ok(())
}
