use super::dependency_tree::DependencyTree;
use crate::dependency_tree::domain::{GraphNode, NodeId};

const INDENT: &str = "  ";

/// Which normally hidden nodes the text report includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print cyclic back-edges with a `(cyclic)` suffix
    pub show_cycles: bool,
    /// Print requirements that are not installed as `installed: absent`
    pub show_absent: bool,
}

impl RenderOptions {
    /// Whether `node` is part of the rendered output
    pub fn includes(&self, node: &GraphNode) -> bool {
        (self.show_cycles || !node.is_cyclic()) && (self.show_absent || !node.is_absent())
    }
}

/// Renders a [`DependencyTree`] as the plain text report
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer {
    options: RenderOptions,
}

impl TreeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, tree: &DependencyTree) -> String {
        let mut lines = vec!["Dependency tree:".to_string()];

        let mut rendered_any = false;
        for section in tree.sections().iter().filter(|s| !s.is_empty()) {
            self.render_section(tree.nodes(), section.title(), section.roots(), &mut lines);
            rendered_any = true;
        }
        if !rendered_any {
            lines.push("- no dependencies -".to_string());
        }

        if tree.has_conflicts() {
            let names: Vec<&str> = tree.conflicts().iter().map(|n| n.as_str()).collect();
            lines.push(String::new());
            lines.push(format!("{} conflicts: {}", names.len(), names.join(", ")));
        }

        if !tree.cycles().is_empty() {
            let mut cycles: Vec<String> = tree.cycles().iter().map(|c| c.to_string()).collect();
            cycles.sort();
            lines.push(String::new());
            lines.push(format!("{} cycles found:", cycles.len()));
            lines.extend(cycles);
        }

        lines.join("\n")
    }

    /// Appends `title`, its underline, the trees below `roots` and a blank line
    ///
    /// Nothing is appended when `roots` is empty.
    pub fn render_section(
        &self,
        nodes: &[GraphNode],
        title: &str,
        roots: &[NodeId],
        lines: &mut Vec<String>,
    ) {
        if roots.is_empty() {
            return;
        }
        lines.push(format!("{}:", title));
        lines.push("-".repeat(title.chars().count()));
        for root in roots {
            self.render_node(nodes, *root, 1, lines);
        }
        lines.push(String::new());
    }

    fn render_node(&self, nodes: &[GraphNode], id: NodeId, depth: usize, lines: &mut Vec<String>) {
        let node = &nodes[id.index()];
        lines.push(format!("{}{}", INDENT.repeat(depth), Self::describe(node)));

        if node.is_cyclic() {
            return;
        }
        for child in Self::sorted_children(nodes, id) {
            if self.options.includes(&nodes[child.index()]) {
                self.render_node(nodes, child, depth + 1, lines);
            }
        }
    }

    fn describe(node: &GraphNode) -> String {
        let installed = node
            .installed()
            .map(|v| v.as_str())
            .unwrap_or("absent");

        if node.is_root() {
            return format!("{}=={}", node.package(), installed);
        }

        let mut line = format!(
            "{} [required: {}, installed: {}]",
            node.package(),
            node.constraint(),
            installed
        );
        if node.is_conflict() {
            line.push_str(" CONFLICT!");
        }
        if node.is_cyclic() {
            line.push_str(" (cyclic)");
        }
        line
    }

    /// Children of `id` ordered by package name
    pub fn sorted_children(nodes: &[GraphNode], id: NodeId) -> Vec<NodeId> {
        let mut children = nodes[id.index()].children().to_vec();
        children.sort_by(|a, b| nodes[a.index()].package().cmp(nodes[b.index()].package()));
        children
    }
}
