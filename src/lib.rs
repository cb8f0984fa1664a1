//! pkgtree - dependency tree inspector for Python projects
//!
//! This library builds the dependency tree of every requirement group a
//! Python project declares, from the packages installed in its virtual
//! environment (or locked in its `uv.lock`), and reports version conflicts
//! and dependency cycles. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_tree`): Pure analysis logic and domain models
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pkgtree::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let package_reader = SitePackagesReader::new(None);
//! let project_config_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case =
//!     ShowDependenciesUseCase::new(package_reader, project_config_reader, progress_reporter);
//!
//! // Execute
//! let response = use_case.execute(TreeRequest::new(PathBuf::from(".")))?;
//!
//! // Format output
//! println!("{}", response.tree.rendered());
//! # Ok(())
//! # }
//! ```
//!
//! The analyzer can also be used directly:
//!
//! ```
//! use pkgtree::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let packages = vec![
//!     InstalledPackage::parse("mock", "2.0", &["pbr>=0.11"])?,
//!     InstalledPackage::parse("pbr", "1.0", &[])?,
//! ];
//! let groups = vec![RequirementGroup::new(
//!     "install_requires",
//!     vec![PackageName::new("mock")?],
//! )];
//!
//! let tree = DependencyTree::new(packages, groups)?;
//! assert!(tree.rendered().contains("pbr [required: >=0.11, installed: 1.0]"));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_tree;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, SitePackagesReader, StdoutPresenter, UvLockReader,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::application::dto::{OutputFormat, TreeRequest, TreeResponse};
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::read_models::{DependencyReport, ReportMetadata};
    pub use crate::application::use_cases::ShowDependenciesUseCase;
    pub use crate::dependency_tree::domain::{
        Constraint, Cycle, GraphNode, InstalledPackage, NodeId, PackageName, Pep440Scheme,
        ProjectDefinition, RequirementGroup, RequirementSpec, Version, VersionScheme,
    };
    pub use crate::dependency_tree::services::{
        DependencyTree, RenderOptions, RequirementGroupCollector, TreeRenderer,
    };
    pub use crate::ports::outbound::{
        InstalledPackageReader, OutputPresenter, ProgressReporter, ProjectConfigReader,
        ReportFormatter,
    };
    pub use crate::shared::Result;
}
