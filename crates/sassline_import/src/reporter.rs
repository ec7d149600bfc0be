use std::{
    env,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::{debug, trace};
use sassline_core::{display_unix, make_relative};
use sassline_tree::print_tree;

use crate::types::{CheckResult, EntryReport};

/// Relativize an entry to the current working directory for clickable links
fn relativize_to_cwd(path: &Path) -> String {
    let Ok(cwd) = env::current_dir() else {
        debug!("Failed to get current directory");
        return display_unix(path);
    };
    match make_relative(path, &cwd) {
        Some(rel_path) => {
            let result = display_unix(&rel_path);
            trace!("Relativized '{}' to '{}'", path.display(), result);
            result
        }
        None => display_unix(path),
    }
}

/// Print one block per entry: a status line, then its import tree, or on
/// failure the error and the chain of imports that reached the failing file.
pub fn print_reports<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} entry reports", result.reports.len());
    for report in &result.reports {
        print_report(writer, report)?;
    }

    let failures = result.failures();
    if failures == 0 {
        writeln!(
            writer,
            "{} {} entries compiled, {} dependencies tracked",
            "✓".green().bold(),
            result.reports.len().to_string().cyan(),
            result.dependencies.to_string().cyan()
        )?;
    } else {
        writeln!(
            writer,
            "{} {} of {} entries failed to compile",
            "✗".red().bold(),
            failures.to_string().red(),
            result.reports.len().to_string().cyan()
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_report<W: Write>(writer: &mut W, report: &EntryReport) -> io::Result<()> {
    let entry = relativize_to_cwd(&report.entry);
    match (&report.error, report.css_bytes) {
        (Some(error), _) => {
            writeln!(writer, "{} {}", "✗".red().bold(), entry.bold())?;
            writeln!(writer, "  {}", error.red())?;
            if let Some(chain) = &report.import_chain {
                writeln!(writer, "\n  {}", "Imported via:".dimmed())?;
                print_tree(writer, chain)?;
            }
        }
        (None, bytes) => {
            writeln!(
                writer,
                "{} {} {}",
                "✓".green().bold(),
                entry.bold(),
                format!("({} bytes)", bytes.unwrap_or(0)).dimmed()
            )?;
            if let Some(tree) = report.tree.render_sliced(None) {
                print_tree(writer, &tree)?;
            }
        }
    }
    writeln!(writer)?;
    Ok(())
}

/// Machine-readable form of `result`.
pub fn print_json<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
