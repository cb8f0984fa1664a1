//! Tree view structs for the read model

/// View of one tree position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    /// Normalized package name
    pub name: String,
    /// Installed version, `None` when absent
    pub installed: Option<String>,
    /// Constraint the node was reached under, `None` for roots
    pub required: Option<String>,
    pub conflict: bool,
    pub cyclic: bool,
    /// Visible children, sorted by name
    pub dependencies: Vec<NodeView>,
}

/// View of one report section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub packages: Vec<NodeView>,
}
