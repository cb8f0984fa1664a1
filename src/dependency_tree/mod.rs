//! Dependency tree analysis: domain types and the services built on them
pub mod domain;
pub mod services;
