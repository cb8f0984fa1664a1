use chrono::Utc;

/// Tool name written into every report
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Tool version written into every report
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata describing one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    project: Option<String>,
    source: String,
}

impl ReportMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        project: Option<String>,
        source: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            project,
            source,
        }
    }

    /// Metadata stamped with the current time and this tool's name and version
    ///
    /// # Arguments
    /// * `project` - Project name, when the project configuration declares one
    /// * `source` - Where the installed packages were read from
    pub fn generate(project: Option<String>, source: impl Into<String>) -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            TOOL_NAME.to_string(),
            TOOL_VERSION.to_string(),
            project,
            source.into(),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
