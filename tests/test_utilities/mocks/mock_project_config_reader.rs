use pkgtree::prelude::*;
use std::path::Path;

/// Mock ProjectConfigReader for testing
pub struct MockProjectConfigReader {
    pub project_name: String,
    pub definitions: Vec<ProjectDefinition>,
    pub should_fail: bool,
}

impl MockProjectConfigReader {
    pub fn new(project_name: String) -> Self {
        Self {
            project_name,
            definitions: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_list(mut self, field: &str, requirements: &[&str]) -> Self {
        self.definitions.push(ProjectDefinition::list(
            field,
            requirements.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    pub fn with_table(mut self, field: &str, entries: &[(&str, &[&str])]) -> Self {
        self.definitions.push(ProjectDefinition::table(
            field,
            entries
                .iter()
                .map(|(key, requirements)| {
                    (
                        key.to_string(),
                        requirements.iter().map(|r| r.to_string()).collect(),
                    )
                })
                .collect(),
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            project_name: String::new(),
            definitions: Vec::new(),
            should_fail: true,
        }
    }
}

impl ProjectConfigReader for MockProjectConfigReader {
    fn read_project_name(&self, _project_path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock project config read failure");
        }
        Ok(self.project_name.clone())
    }

    fn read_definitions(&self, _project_path: &Path) -> Result<Vec<ProjectDefinition>> {
        if self.should_fail {
            anyhow::bail!("Mock project config read failure");
        }
        Ok(self.definitions.clone())
    }
}
