use super::node_view::SectionView;
use super::report_metadata::ReportMetadata;

/// Read model of a whole analysis
///
/// Only non-empty sections are kept. Cycles are rendered text, sorted.
#[derive(Debug, Clone)]
pub struct DependencyReport {
    pub metadata: ReportMetadata,
    pub sections: Vec<SectionView>,
    pub conflicts: Vec<String>,
    pub cycles: Vec<String>,
}

impl DependencyReport {
    /// Number of packages at the top of all sections
    pub fn root_count(&self) -> usize {
        self.sections.iter().map(|s| s.packages.len()).sum()
    }
}
