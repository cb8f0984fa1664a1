use crate::application::read_models::ReportMetadata;
use crate::dependency_tree::services::{DependencyTree, RenderOptions, TreeRenderer};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// TextFormatter adapter for the indented plain text report
pub struct TextFormatter {
    renderer: TreeRenderer,
}

impl TextFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: TreeRenderer::new(options),
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, tree: &DependencyTree, _metadata: &ReportMetadata) -> Result<String> {
        Ok(self.renderer.render(tree))
    }
}
