use crate::application::read_models::{
    DependencyReport, DependencyReportBuilder, NodeView, ReportMetadata, SectionView,
};
use crate::dependency_tree::services::{DependencyTree, RenderOptions};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Report {
    metadata: Metadata,
    sections: Vec<Section>,
    conflicts: Vec<String>,
    cycles: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tool: Tool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    source: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct Section {
    name: String,
    packages: Vec<Node>,
}

#[derive(Debug, Serialize)]
struct Node {
    name: String,
    installed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    conflict: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    cyclic: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<Node>,
}

/// JsonFormatter adapter for the machine readable report
///
/// Nested nodes follow the text report: children sorted by name, cyclic
/// and absent nodes only when the render options ask for them.
pub struct JsonFormatter {
    options: RenderOptions,
}

impl JsonFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn convert_report(report: DependencyReport) -> Report {
        let metadata = &report.metadata;
        Report {
            metadata: Metadata {
                timestamp: metadata.timestamp().to_string(),
                tool: Tool {
                    name: metadata.tool_name().to_string(),
                    version: metadata.tool_version().to_string(),
                },
                project: metadata.project().map(String::from),
                source: metadata.source().to_string(),
            },
            sections: report
                .sections
                .into_iter()
                .map(Self::convert_section)
                .collect(),
            conflicts: report.conflicts,
            cycles: report.cycles,
        }
    }

    fn convert_section(section: SectionView) -> Section {
        Section {
            name: section.title,
            packages: section.packages.into_iter().map(Self::convert_node).collect(),
        }
    }

    fn convert_node(node: NodeView) -> Node {
        Node {
            name: node.name,
            installed: node.installed,
            required: node.required,
            conflict: node.conflict,
            cyclic: node.cyclic,
            dependencies: node
                .dependencies
                .into_iter()
                .map(Self::convert_node)
                .collect(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, tree: &DependencyTree, metadata: &ReportMetadata) -> Result<String> {
        let report = DependencyReportBuilder::build(tree, metadata, self.options);
        let json = serde_json::to_string_pretty(&Self::convert_report(report))?;
        Ok(json)
    }
}
