pub mod graph_node;
pub mod package;
pub mod requirement;
pub mod requirement_group;
pub mod version;

pub use graph_node::{Cycle, GraphNode, NodeId};
pub use package::{InstalledPackage, PackageName, Version};
pub use requirement::RequirementSpec;
pub use requirement_group::{DefinitionValue, ProjectDefinition, RequirementGroup};
pub use version::{Constraint, Operator, Pep440Scheme, Specifier, VersionScheme};
