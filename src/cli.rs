use clap::Parser;
use pkgtree::application::dto::OutputFormat;
use std::path::PathBuf;

/// Show the dependency tree of a Python project, with version conflicts and cycles
#[derive(Parser, Debug)]
#[command(name = "pkgtree")]
#[command(version)]
#[command(
    about = "Show the dependency tree of a Python project, with version conflicts and cycles",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Virtual environment to inspect (defaults to $VIRTUAL_ENV, then .venv or venv)
    #[arg(long, value_name = "DIR")]
    pub venv: Option<PathBuf>,

    /// Read installed packages from uv.lock instead of the virtual environment
    #[arg(long)]
    pub lockfile: bool,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also show requirements that close a dependency cycle
    #[arg(long)]
    pub show_cycles: bool,

    /// Also show requirements that are not installed
    #[arg(long)]
    pub show_absent: bool,

    /// Exit with code 1 when version conflicts are found
    #[arg(long)]
    pub strict: bool,

    /// Config file path (defaults to pkgtree.config.yml in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
