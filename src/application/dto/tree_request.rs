use std::path::PathBuf;

/// TreeRequest - Internal request DTO for the dependency tree use case
#[derive(Debug, Clone)]
pub struct TreeRequest {
    /// Path to the project directory containing pyproject.toml
    pub project_path: PathBuf,
}

impl TreeRequest {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }
}
