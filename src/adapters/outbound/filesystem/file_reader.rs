use crate::dependency_tree::domain::ProjectDefinition;
use crate::ports::outbound::ProjectConfigReader;
use crate::shared::error::DepTreeError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

/// Name of the setuptools field the PEP 621 `dependencies` list maps to
const INSTALL_REQUIRES: &str = "install_requires";
/// Name of the setuptools field `optional-dependencies` maps to
const EXTRAS_REQUIRE: &str = "extras_require";
/// Name used for PEP 735 `dependency-groups`
const DEPENDENCY_GROUPS: &str = "dependency_groups";

/// FileSystemReader adapter for reading project configuration
///
/// This adapter implements the ProjectConfigReader port on top of
/// `pyproject.toml`, translating PEP 621 / PEP 735 tables into the
/// setuptools field names the report uses as section titles.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read_pyproject(&self, project_path: &Path) -> Result<toml::Value> {
        let pyproject_path = project_path.join("pyproject.toml");

        if !pyproject_path.exists() {
            return Err(DepTreeError::ProjectConfigNotFound {
                path: project_path.to_path_buf(),
            }
            .into());
        }

        let content = read_regular_file(&pyproject_path, "pyproject.toml")?;

        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse pyproject.toml: {}", e))
    }

    /// String entries of a TOML array; anything else (e.g. PEP 735
    /// `{ include-group = "..." }` tables) is skipped
    fn string_list(value: &toml::Value) -> Vec<String> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn string_table(value: &toml::Value) -> Vec<(String, Vec<String>)> {
        value
            .as_table()
            .map(|table| {
                table
                    .iter()
                    .map(|(key, list)| (key.clone(), Self::string_list(list)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectConfigReader for FileSystemReader {
    fn read_project_name(&self, project_path: &Path) -> Result<String> {
        let pyproject = self.read_pyproject(project_path)?;

        let project_name = pyproject
            .get("project")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| anyhow::anyhow!("Project name not found in pyproject.toml"))?;

        Ok(project_name.to_string())
    }

    fn read_definitions(&self, project_path: &Path) -> Result<Vec<ProjectDefinition>> {
        let pyproject = self.read_pyproject(project_path)?;
        let mut definitions = Vec::new();

        if let Some(project) = pyproject.get("project") {
            if let Some(dependencies) = project.get("dependencies") {
                definitions.push(ProjectDefinition::list(
                    INSTALL_REQUIRES,
                    Self::string_list(dependencies),
                ));
            }
            if let Some(optional) = project.get("optional-dependencies") {
                definitions.push(ProjectDefinition::table(
                    EXTRAS_REQUIRE,
                    Self::string_table(optional),
                ));
            }
        }

        if let Some(groups) = pyproject.get("dependency-groups") {
            definitions.push(ProjectDefinition::table(
                DEPENDENCY_GROUPS,
                Self::string_table(groups),
            ));
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_tree::domain::DefinitionValue;
    use std::fs;
    use tempfile::TempDir;

    fn write_pyproject(content: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pyproject.toml"), content).unwrap();
        temp_dir
    }

    #[test]
    fn test_read_project_name_success() {
        let temp_dir = write_pyproject(
            r#"
[project]
name = "test-project"
version = "1.0.0"
"#,
        );

        let reader = FileSystemReader::new();
        let project_name = reader.read_project_name(temp_dir.path()).unwrap();

        assert_eq!(project_name, "test-project");
    }

    #[test]
    fn test_read_project_name_file_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_project_name(temp_dir.path());

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("pyproject.toml not found"));
    }

    #[test]
    fn test_read_project_name_invalid_toml() {
        let temp_dir = write_pyproject("invalid toml [[[");

        let reader = FileSystemReader::new();
        let result = reader.read_project_name(temp_dir.path());

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Failed to parse pyproject.toml"));
    }

    #[test]
    fn test_read_project_name_missing_name_field() {
        let temp_dir = write_pyproject(
            r#"
[project]
version = "1.0.0"
"#,
        );

        let reader = FileSystemReader::new();
        let err_string = format!("{}", reader.read_project_name(temp_dir.path()).unwrap_err());
        assert!(err_string.contains("Project name not found"));
    }

    #[test]
    fn test_read_definitions_all_tables() {
        let temp_dir = write_pyproject(
            r#"
[project]
name = "demo"
dependencies = ["mock>=2.0", "click"]

[project.optional-dependencies]
docs = ["sphinx"]
bonus = ["pbr"]

[dependency-groups]
dev = ["pytest", { include-group = "docs" }]
"#,
        );

        let reader = FileSystemReader::new();
        let definitions = reader.read_definitions(temp_dir.path()).unwrap();

        assert_eq!(definitions.len(), 3);
        assert_eq!(
            definitions[0],
            ProjectDefinition::list(
                "install_requires",
                vec!["mock>=2.0".to_string(), "click".to_string()]
            )
        );
        assert_eq!(definitions[1].name, "extras_require");
        match &definitions[1].value {
            DefinitionValue::Table(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["docs", "bonus"]);
            }
            other => panic!("expected a table, got {:?}", other),
        }
        assert_eq!(
            definitions[2],
            ProjectDefinition::table(
                "dependency_groups",
                vec![("dev".to_string(), vec!["pytest".to_string()])]
            )
        );
    }

    #[test]
    fn test_read_definitions_without_dependencies() {
        let temp_dir = write_pyproject(
            r#"
[project]
name = "demo"
"#,
        );

        let reader = FileSystemReader::new();
        assert!(reader.read_definitions(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_definitions_missing_pyproject() {
        let temp_dir = TempDir::new().unwrap();
        let reader = FileSystemReader::new();
        let err = reader.read_definitions(temp_dir.path()).unwrap_err();
        assert!(err.downcast_ref::<DepTreeError>().is_some());
    }
}
