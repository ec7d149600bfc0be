use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use sassline_core::display_unix;
use sassline_import::{Config, ResolveConfig};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sassline")]
#[command(about = "Resolve and trace stylesheet @import graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compile entry stylesheets and print the import tree of each
    Tree(Config),
    /// Show what a single @import resolves to
    Resolve(ResolveConfig),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Tree(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running import tree check (using {} threads)", num_threads);
            debug!("Config: root={:?}, entry_glob={:?}", cfg.project.root, cfg.entry_glob);

            let json = cfg.json;
            let result = sassline_import::run_tree_check(cfg)?;
            debug!("{} of {} entries failed", result.failures(), result.reports.len());

            if json {
                sassline_import::print_json(&mut stdout, &result)?;
            } else {
                sassline_import::print_reports(&mut stdout, &result)?;
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} entries (using {} threads).",
                    "●".bright_blue(),
                    start.elapsed().as_millis().to_string().cyan(),
                    result.reports.len().to_string().cyan(),
                    num_threads.to_string().cyan()
                )?;
                stdout.flush()?;
            }

            if result.failures() > 0 {
                // Non-zero exit to fail CI
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Resolve(cfg) => {
            let url = cfg.url.clone();
            let resolved = sassline_import::run_resolve(cfg)?;

            match &resolved.file {
                Some(file) => {
                    writeln!(stdout, "{} {} -> {}", "●".bright_blue(), url, display_unix(file))?
                }
                None => writeln!(stdout, "{} {} is unresolved", "✗".red().bold(), url.yellow())?,
            }
            if let Some(contents) = &resolved.contents {
                writeln!(stdout, "{}", contents.dimmed())?;
            }
            stdout.flush()?;

            if resolved.is_unresolved() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
