mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, Settings, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use pkgtree::prelude::*;
use pkgtree::shared::security::validate_not_symlink;
use pkgtree::shared::{DepTreeError, ExitCode};
use std::path::PathBuf;
use std::process;

fn main() {
    let args = Args::parse_args();

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let project_path = locate_project(args.path.clone())?;

    // Load config file: explicit --config, else auto-discovery
    let config = match &args.config {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Some(config)
        }
        None => {
            let config = discover_config(&project_path)?;
            if config.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    project_path.join(CONFIG_FILENAME).display()
                );
            }
            config
        }
    };
    let settings = Settings::resolve(&args, config, &project_path)?;

    // Create adapters (Dependency Injection)
    let package_reader: Box<dyn InstalledPackageReader> = if settings.lockfile {
        Box::new(UvLockReader::new())
    } else {
        Box::new(SitePackagesReader::new(settings.venv.clone()))
    };
    let project_config_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case =
        ShowDependenciesUseCase::new(package_reader, project_config_reader, progress_reporter);

    // Execute use case
    let response = use_case.execute(TreeRequest::new(project_path))?;

    // Format output
    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format, settings.render);
    let formatted_output = formatter.format(&response.tree, &response.metadata)?;

    settings.presenter().present(&formatted_output)?;

    if settings.strict && response.has_conflicts {
        eprintln!(
            "\n{} {} package(s) with version conflicts (--strict)",
            "⚠️  Conflicts:".yellow().bold(),
            response.tree.conflicts().len()
        );
        return Ok(ExitCode::ConflictsDetected);
    }

    Ok(ExitCode::Success)
}

/// Resolves the project directory (default `.`) to its canonical form
///
/// A symbolic link given as the project path is rejected before it is followed.
fn locate_project(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| PathBuf::from("."));
    let invalid = |reason: String| DepTreeError::InvalidProjectPath {
        path: path.clone(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }
    validate_not_symlink(&path, "project")?;

    let canonical = path
        .canonicalize()
        .map_err(|e| invalid(format!("Failed to canonicalize path: {}", e)))?;
    if !canonical.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }
    Ok(canonical)
}
