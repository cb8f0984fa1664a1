use crate::dependency_tree::domain::ProjectDefinition;
use crate::shared::Result;
use std::path::Path;

/// ProjectConfigReader port for reading project configuration
///
/// This port abstracts the file system operations needed to read
/// project metadata from configuration files (e.g., pyproject.toml).
pub trait ProjectConfigReader {
    /// Reads the project name from the project configuration
    ///
    /// # Errors
    /// Returns an error if the configuration file does not exist, cannot be
    /// parsed, or has no project name
    fn read_project_name(&self, project_path: &Path) -> Result<String>;

    /// Reads the requirement-bearing metadata fields of the project
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory
    ///
    /// # Returns
    /// The metadata fields in declaration order, named the way setuptools
    /// names them (`install_requires`, `extras_require`, ...)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The configuration file (pyproject.toml) does not exist
    /// - The file cannot be parsed
    fn read_definitions(&self, project_path: &Path) -> Result<Vec<ProjectDefinition>>;
}
