use crate::application::read_models::ReportMetadata;
use crate::dependency_tree::services::DependencyTree;
use crate::shared::Result;

/// ReportFormatter port for formatting the dependency report
///
/// This port abstracts the formatting logic for the different output
/// formats (plain text tree, JSON document).
pub trait ReportFormatter {
    /// Formats the analyzed tree
    ///
    /// # Arguments
    /// * `tree` - The analyzed dependency tree
    /// * `metadata` - Report metadata (tool name, version, timestamp)
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, tree: &DependencyTree, metadata: &ReportMetadata) -> Result<String>;
}
