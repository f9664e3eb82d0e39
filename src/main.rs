use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};

mod discover;
mod document;
mod normalize;
mod output;
mod run;

use output::OutputFormat;
use run::Mode;

#[derive(Parser)]
#[command(name = "tagnorm")]
#[command(version)]
#[command(about = "Normalize tag variants in markdown front matter")]
#[command(
    long_about = "tagnorm - Collapse spelling variants of the online-privacy tag.\n\nScans a content tree for markdown files with YAML front matter, rewrites\nrecognized variants of the tag to its canonical form, and deduplicates the\ntag list. Dry-run by default; --apply writes changes with a .bak backup\nper modified file."
)]
struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Preview changes without writing (default)
    #[arg(long)]
    dry_run: bool,

    /// Write changes and backups
    #[arg(long)]
    apply: bool,

    /// Output format (auto-detects TTY for pretty vs plain)
    #[arg(short = 'f', long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Generate shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    // Use try_parse to catch errors and normalize exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Exit with 0 for help/version, 1 for actual errors
            let exit_code = if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                0
            } else {
                1
            };
            process::exit(exit_code);
        }
    };

    // Handle completions before anything else (doesn't need a root)
    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "tagnorm", &mut io::stdout());
        return;
    }

    // Resolve the effective mode once; everything downstream takes it
    // explicitly rather than consulting flag state.
    let mode = Mode::resolve(cli.apply, cli.dry_run);
    let format = cli.format.resolve();

    if let Err(e) = run::run(&cli.root, mode, format) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
