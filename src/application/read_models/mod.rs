//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the analyzed tree for output.

pub mod dependency_report;
pub mod dependency_report_builder;
pub mod node_view;
pub mod report_metadata;

pub use dependency_report::DependencyReport;
pub use dependency_report_builder::DependencyReportBuilder;
pub use node_view::{NodeView, SectionView};
pub use report_metadata::ReportMetadata;
