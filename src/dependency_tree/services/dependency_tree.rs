use super::tree_renderer::{RenderOptions, TreeRenderer};
use crate::dependency_tree::domain::{
    Constraint, Cycle, GraphNode, InstalledPackage, NodeId, PackageName, Pep440Scheme,
    RequirementGroup, VersionScheme,
};
use crate::shared::error::DepTreeError;
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// Title of the catch-all section listing packages no group reaches
pub const OTHER_GROUP: &str = "other";

/// One report section: a requirement group and the roots it resolved to
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    roots: Vec<NodeId>,
    absent_roots: Vec<PackageName>,
}

impl Section {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Declared roots with no installed package; never rendered
    pub fn absent_roots(&self) -> &[PackageName] {
        &self.absent_roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Dependency tree of a project, one subtree per requirement group
///
/// Built eagerly by [`DependencyTree::new`]: every group is expanded depth
/// first, cycles and conflicts are collected along the way, and a final
/// `other` section holds installed packages no group reached.
///
/// Absent packages, version conflicts and cycles are never errors; they are
/// recorded on the nodes and summarized by the report. The only failure is
/// an inconsistent package list.
#[derive(Debug)]
pub struct DependencyTree {
    packages: HashMap<PackageName, InstalledPackage>,
    scheme: Box<dyn VersionScheme>,
    nodes: Vec<GraphNode>,
    sections: Vec<Section>,
    seen: HashSet<PackageName>,
    conflicts: Vec<PackageName>,
    cycles: Vec<Cycle>,
}

impl DependencyTree {
    /// Builds the tree using PEP 440 version semantics
    ///
    /// # Errors
    /// Returns [`DepTreeError::ConflictingPackageRecords`] when two records
    /// share a name but differ in version or requirements.
    pub fn new(packages: Vec<InstalledPackage>, groups: Vec<RequirementGroup>) -> Result<Self> {
        Self::with_scheme(packages, groups, Box::new(Pep440Scheme::new()))
    }

    /// Builds the tree with a custom [`VersionScheme`]
    pub fn with_scheme(
        packages: Vec<InstalledPackage>,
        groups: Vec<RequirementGroup>,
        scheme: Box<dyn VersionScheme>,
    ) -> Result<Self> {
        let packages = Self::index_packages(packages)?;

        let mut tree = Self {
            packages,
            scheme,
            nodes: Vec::new(),
            sections: Vec::new(),
            seen: HashSet::new(),
            conflicts: Vec::new(),
            cycles: Vec::new(),
        };

        for group in &groups {
            tree.add_section(group.name(), group.roots());
        }

        let mut others: Vec<PackageName> = tree
            .packages
            .keys()
            .filter(|name| !tree.seen.contains(*name))
            .cloned()
            .collect();
        others.sort();
        tree.add_section(OTHER_GROUP, &others);

        Ok(tree)
    }

    fn index_packages(
        packages: Vec<InstalledPackage>,
    ) -> Result<HashMap<PackageName, InstalledPackage>> {
        let mut index: HashMap<PackageName, InstalledPackage> = HashMap::new();
        for package in packages {
            if let Some(existing) = index.get(package.name()) {
                if existing.is_same_record(&package) {
                    continue;
                }
                return Err(DepTreeError::ConflictingPackageRecords {
                    name: package.name().to_string(),
                    first: existing.version().to_string(),
                    second: package.version().to_string(),
                }
                .into());
            }
            index.insert(package.name().clone(), package);
        }
        Ok(index)
    }

    fn add_section(&mut self, title: &str, names: &[PackageName]) {
        let mut expansion = Expansion {
            packages: &self.packages,
            scheme: self.scheme.as_ref(),
            nodes: &mut self.nodes,
            seen: &mut self.seen,
            conflicts: &mut self.conflicts,
            cycles: &mut self.cycles,
        };

        let mut roots = Vec::new();
        let mut absent_roots = Vec::new();
        for name in names {
            match expansion.expand_root(name) {
                Some(id) => roots.push(id),
                None => absent_roots.push(name.clone()),
            }
        }

        self.sections.push(Section {
            title: title.to_string(),
            roots,
            absent_roots,
        });
    }

    /// Renders one ad-hoc section for `names` into `report`
    ///
    /// The section is expanded into scratch storage, so the tree's own
    /// sections, conflicts and cycles are left untouched. Every rendered
    /// package name is added to `seen`. Names that are not installed (or not
    /// valid package names) are skipped; if none remain, nothing is appended.
    pub fn render_section(
        &self,
        report: &mut Vec<String>,
        seen: &mut HashSet<PackageName>,
        title: &str,
        names: &[&str],
    ) {
        let mut nodes = Vec::new();
        let mut conflicts = Vec::new();
        let mut cycles = Vec::new();
        let mut expansion = Expansion {
            packages: &self.packages,
            scheme: self.scheme.as_ref(),
            nodes: &mut nodes,
            seen,
            conflicts: &mut conflicts,
            cycles: &mut cycles,
        };

        let roots: Vec<NodeId> = names
            .iter()
            .filter_map(|name| PackageName::new(name).ok())
            .filter_map(|name| expansion.expand_root(&name))
            .collect();

        TreeRenderer::default().render_section(&nodes, title, &roots, report);
    }

    /// Report with default options (cyclic and absent nodes hidden)
    pub fn rendered(&self) -> String {
        TreeRenderer::default().render(self)
    }

    pub fn rendered_with(&self, options: RenderOptions) -> String {
        TreeRenderer::new(options).render(self)
    }

    pub fn package(&self, name: &PackageName) -> Option<&InstalledPackage> {
        self.packages.get(name)
    }

    /// Installed packages sorted by name
    pub fn packages(&self) -> Vec<&InstalledPackage> {
        let mut packages: Vec<&InstalledPackage> = self.packages.values().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()));
        packages
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Every tree position holding `name`
    pub fn occurrences(&self, name: &PackageName) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.package() == name)
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Packages with at least one conflicting occurrence, in first-seen order
    pub fn conflicts(&self) -> &[PackageName] {
        &self.conflicts
    }

    /// Distinct cycles, in discovery order
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Depth-first expansion state shared by the tree and ad-hoc sections
struct Expansion<'a> {
    packages: &'a HashMap<PackageName, InstalledPackage>,
    scheme: &'a dyn VersionScheme,
    nodes: &'a mut Vec<GraphNode>,
    seen: &'a mut HashSet<PackageName>,
    conflicts: &'a mut Vec<PackageName>,
    cycles: &'a mut Vec<Cycle>,
}

impl<'a> Expansion<'a> {
    fn push(&mut self, node: GraphNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent() {
            self.nodes[parent.0].push_child(id);
        }
        self.nodes.push(node);
        id
    }

    fn expand_root(&mut self, name: &PackageName) -> Option<NodeId> {
        let packages = self.packages;
        let package = packages.get(name)?;

        let id = self.push(GraphNode::new(
            package.name().clone(),
            Some(package.version().clone()),
            Constraint::Any,
            None,
        ));
        self.seen.insert(name.clone());

        // The root is not part of the path: a package may appear once
        // beneath itself before a revisit counts as a cycle.
        let mut path = Vec::new();
        self.expand(id, package, &mut path);
        Some(id)
    }

    fn expand(&mut self, parent: NodeId, package: &'a InstalledPackage, path: &mut Vec<PackageName>) {
        let packages = self.packages;

        for requirement in package.requires() {
            let name = requirement.name();
            let target = packages.get(name);

            let child = self.push(GraphNode::new(
                name.clone(),
                target.map(|t| t.version().clone()),
                requirement.constraint().clone(),
                Some(parent),
            ));

            let Some(target) = target else {
                continue;
            };

            if let Some(start) = path.iter().position(|p| p == name) {
                self.nodes[child.0].mark_cyclic();
                self.record_cycle(Cycle::new(path[start..].to_vec()));
                continue;
            }

            self.seen.insert(name.clone());

            if !requirement
                .constraint()
                .allows(target.version().as_str(), self.scheme)
            {
                self.nodes[child.0].mark_conflict();
                if !self.conflicts.contains(name) {
                    self.conflicts.push(name.clone());
                }
            }

            path.push(name.clone());
            self.expand(child, target, path);
            path.pop();
        }
    }

    fn record_cycle(&mut self, cycle: Cycle) {
        if !self.cycles.iter().any(|known| known.is_rotation_of(&cycle)) {
            self.cycles.push(cycle);
        }
    }
}
