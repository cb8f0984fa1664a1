use super::{Constraint, PackageName, Version};
use std::fmt;

/// Index of a [`GraphNode`] inside the tree's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One occurrence of a package at a given position of the tree
///
/// The same package shows up as many nodes as there are paths requiring it,
/// each with its own flags. Equality only looks at the package name.
#[derive(Debug, Clone)]
pub struct GraphNode {
    package: PackageName,
    installed: Option<Version>,
    constraint: Constraint,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    cyclic: bool,
    conflict: bool,
}

impl GraphNode {
    pub(crate) fn new(
        package: PackageName,
        installed: Option<Version>,
        constraint: Constraint,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            package,
            installed,
            constraint,
            parent,
            children: Vec::new(),
            cyclic: false,
            conflict: false,
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn mark_cyclic(&mut self) {
        self.cyclic = true;
    }

    pub(crate) fn mark_conflict(&mut self) {
        self.conflict = true;
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    /// Installed version, `None` when the package is absent
    pub fn installed(&self) -> Option<&Version> {
        self.installed.as_ref()
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn is_conflict(&self) -> bool {
        self.conflict
    }

    pub fn is_absent(&self) -> bool {
        self.installed.is_none()
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)
    }
}

/// A dependency cycle, stored without the closing repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(Vec<PackageName>);

impl Cycle {
    pub fn new(path: Vec<PackageName>) -> Self {
        Self(path)
    }

    pub fn packages(&self) -> &[PackageName] {
        &self.0
    }

    /// `a -> b -> c` and `b -> c -> a` describe the same cycle
    pub fn is_rotation_of(&self, other: &Cycle) -> bool {
        let len = self.0.len();
        if len != other.0.len() {
            return false;
        }
        if len == 0 {
            return true;
        }
        (0..len).any(|shift| (0..len).all(|i| self.0[(i + shift) % len] == other.0[i]))
    }
}

impl fmt::Display for Cycle {
    /// Renders `a -> b -> c -> a`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.0.iter().map(PackageName::as_str).collect();
        if let Some(first) = names.first().copied() {
            names.push(first);
        }
        write!(f, "{}", names.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<PackageName> {
        list.iter().map(|n| PackageName::new(n).unwrap()).collect()
    }

    #[test]
    fn test_node_equality_is_name_based() {
        let mut a = GraphNode::new(
            PackageName::new("mock").unwrap(),
            Some(Version::new("2.0").unwrap()),
            Constraint::Any,
            None,
        );
        let b = GraphNode::new(
            PackageName::new("mock").unwrap(),
            Some(Version::new("2.0").unwrap()),
            Constraint::parse(">=3.0").unwrap(),
            Some(NodeId(0)),
        );
        a.mark_conflict();
        assert_eq!(a, b);
        assert!(a.is_conflict());
        assert!(!b.is_conflict());
        assert!(a.is_root());
        assert!(!b.is_root());
        assert_eq!(a.to_string(), "mock");
    }

    #[test]
    fn test_absent_node() {
        let node = GraphNode::new(PackageName::new("ghost").unwrap(), None, Constraint::Any, None);
        assert!(node.is_absent());
        assert!(node.installed().is_none());
    }

    #[test]
    fn test_cycle_display() {
        let cycle = Cycle::new(names(&["attrs", "six", "mock"]));
        assert_eq!(cycle.to_string(), "attrs -> six -> mock -> attrs");
    }

    #[test]
    fn test_cycle_rotation() {
        let a = Cycle::new(names(&["pbr", "attrs", "six", "mock"]));
        let b = Cycle::new(names(&["attrs", "six", "mock", "pbr"]));
        let c = Cycle::new(names(&["attrs", "mock", "six", "pbr"]));
        let d = Cycle::new(names(&["attrs", "six", "mock"]));
        assert!(a.is_rotation_of(&b));
        assert!(!a.is_rotation_of(&c));
        assert!(!a.is_rotation_of(&d));
    }
}
