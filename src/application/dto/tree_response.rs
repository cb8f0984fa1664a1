use crate::application::read_models::ReportMetadata;
use crate::dependency_tree::services::DependencyTree;

/// TreeResponse - Internal response DTO from the dependency tree use case
///
/// Carries the analyzed tree; adapters format it into the requested output.
#[derive(Debug)]
pub struct TreeResponse {
    pub tree: DependencyTree,
    pub metadata: ReportMetadata,
    /// Whether any requirement is not satisfied by the installed version
    /// Used to determine exit code with `--strict`
    pub has_conflicts: bool,
}

impl TreeResponse {
    pub fn new(tree: DependencyTree, metadata: ReportMetadata) -> Self {
        let has_conflicts = tree.has_conflicts();
        Self {
            tree,
            metadata,
            has_conflicts,
        }
    }
}
