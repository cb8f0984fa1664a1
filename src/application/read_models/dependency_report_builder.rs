//! Builder for constructing DependencyReport from the analyzed tree

use super::dependency_report::DependencyReport;
use super::node_view::{NodeView, SectionView};
use super::report_metadata::ReportMetadata;
use crate::dependency_tree::domain::NodeId;
use crate::dependency_tree::services::{DependencyTree, RenderOptions, TreeRenderer};

/// Builds a [`DependencyReport`] using the same visibility rules as the text report
pub struct DependencyReportBuilder;

impl DependencyReportBuilder {
    pub fn build(
        tree: &DependencyTree,
        metadata: &ReportMetadata,
        options: RenderOptions,
    ) -> DependencyReport {
        let sections = tree
            .sections()
            .iter()
            .filter(|section| !section.is_empty())
            .map(|section| SectionView {
                title: section.title().to_string(),
                packages: section
                    .roots()
                    .iter()
                    .map(|root| Self::build_node(tree, *root, options))
                    .collect(),
            })
            .collect();

        let mut cycles: Vec<String> = tree.cycles().iter().map(|c| c.to_string()).collect();
        cycles.sort();

        DependencyReport {
            metadata: metadata.clone(),
            sections,
            conflicts: tree.conflicts().iter().map(|n| n.to_string()).collect(),
            cycles,
        }
    }

    fn build_node(tree: &DependencyTree, id: NodeId, options: RenderOptions) -> NodeView {
        let node = tree.node(id);

        let dependencies = if node.is_cyclic() {
            Vec::new()
        } else {
            TreeRenderer::sorted_children(tree.nodes(), id)
                .into_iter()
                .filter(|child| options.includes(tree.node(*child)))
                .map(|child| Self::build_node(tree, child, options))
                .collect()
        };

        NodeView {
            name: node.package().to_string(),
            installed: node.installed().map(|v| v.to_string()),
            required: (!node.is_root()).then(|| node.constraint().to_string()),
            conflict: node.is_conflict(),
            cyclic: node.is_cyclic(),
            dependencies,
        }
    }
}
