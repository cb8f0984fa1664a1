use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report printed, no conflicts or `--strict` not requested
    Success = 0,
    /// Version conflicts were found and `--strict` was requested
    ConflictsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing environment, unreadable metadata, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConflictsDetected => write!(f, "Conflicts Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency tree analysis.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum DepTreeError {
    #[error("Could not find virtual environment for project: {project_path}\n\n💡 Hint: Activate the environment (VIRTUAL_ENV), create a .venv folder, or pass --venv")]
    VirtualEnvNotFound { project_path: PathBuf },

    #[error("Could not find 'site-packages' subfolder in {venv_path}\n\n💡 Hint: Make sure the path points at the root of a Python virtual environment")]
    SitePackagesNotFound { venv_path: PathBuf },

    #[error("uv.lock file not found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("pyproject.toml not found in project directory: {path}\n\n💡 Hint: Run in the root directory of a Python project, or specify the correct path with the --path option")]
    ProjectConfigNotFound { path: PathBuf },

    #[error("Failed to parse package metadata: {path}\nDetails: {details}")]
    MetadataParseError { path: PathBuf, details: String },

    #[error("Conflicting records for installed package '{name}': {first} vs {second}\n\n💡 Hint: The environment contains two different distributions with the same name; remove the stale one")]
    ConflictingPackageRecords {
        name: String,
        first: String,
        second: String,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
