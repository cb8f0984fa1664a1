pub mod dependency_tree;
pub mod group_collector;
pub mod tree_renderer;

pub use dependency_tree::{DependencyTree, Section, OTHER_GROUP};
pub use group_collector::RequirementGroupCollector;
pub use tree_renderer::{RenderOptions, TreeRenderer};
