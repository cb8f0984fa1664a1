use crate::dependency_tree::domain::{
    Constraint, InstalledPackage, PackageName, Pep440Scheme, RequirementSpec, Version,
};
use crate::ports::outbound::InstalledPackageReader;
use crate::shared::error::DepTreeError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct UvLock {
    #[serde(default)]
    package: Vec<UvPackage>,
}

#[derive(Debug, Deserialize)]
struct UvPackage {
    name: String,
    version: Option<String>,
    #[serde(default)]
    dependencies: Vec<UvDependency>,
    #[serde(default)]
    metadata: Option<UvMetadata>,
}

#[derive(Debug, Deserialize)]
struct UvDependency {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UvMetadata {
    #[serde(default, rename = "requires-dist")]
    requires_dist: Vec<UvRequirement>,
}

#[derive(Debug, Deserialize)]
struct UvRequirement {
    name: String,
    #[serde(default)]
    specifier: Option<String>,
}

/// UvLockReader adapter reading the locked packages of a uv project
///
/// Every `[[package]]` with a version becomes an [`InstalledPackage`] whose
/// requirements are its `dependencies`. Locked dependencies carry no
/// constraint, except where the package's own `[package.metadata]
/// requires-dist` declares one (the project package).
pub struct UvLockReader;

impl UvLockReader {
    pub fn new() -> Self {
        Self
    }

    fn read_lockfile(&self, project_path: &Path) -> Result<String> {
        let lockfile_path = project_path.join("uv.lock");

        if !lockfile_path.exists() {
            return Err(DepTreeError::LockfileNotFound {
                path: lockfile_path,
                suggestion: format!(
                    "uv.lock file does not exist in project directory \"{}\".\n   \
                     Run `uv lock` first, or drop --lockfile to read the virtual environment.",
                    project_path.display()
                ),
            }
            .into());
        }

        read_regular_file(&lockfile_path, "uv.lock")
    }

    /// Parses lockfile content into installed-package records
    pub fn parse(content: &str, on_progress: &dyn Fn(usize, usize)) -> Result<Vec<InstalledPackage>> {
        let lockfile: UvLock = toml::from_str(content).context("Failed to parse uv.lock file")?;

        let total = lockfile.package.len();
        let mut packages = Vec::with_capacity(total);
        for (index, package) in lockfile.package.into_iter().enumerate() {
            if let Some(installed) = Self::convert_package(package)? {
                packages.push(installed);
            }
            on_progress(index + 1, total);
        }
        Ok(Self::select_versions(packages))
    }

    /// Keeps one record per name
    ///
    /// uv writes one `[[package]]` per version when the resolution forks on
    /// environment markers (e.g. `numpy` 2.0.2 below Python 3.10 and 2.2.1
    /// above). The highest version stands for the name; versions that do not
    /// compare keep the first entry.
    fn select_versions(packages: Vec<InstalledPackage>) -> Vec<InstalledPackage> {
        let scheme = Pep440Scheme::new();
        let mut positions: HashMap<PackageName, usize> = HashMap::new();
        let mut selected: Vec<InstalledPackage> = Vec::with_capacity(packages.len());

        for package in packages {
            match positions.get(package.name()) {
                Some(&position) => {
                    let newer = scheme.compare(
                        package.version().as_str(),
                        selected[position].version().as_str(),
                    ) == Some(Ordering::Greater);
                    if newer {
                        selected[position] = package;
                    }
                }
                None => {
                    positions.insert(package.name().clone(), selected.len());
                    selected.push(package);
                }
            }
        }
        selected
    }

    fn convert_package(package: UvPackage) -> Result<Option<InstalledPackage>> {
        // Dynamic-version projects are locked without a version
        let Some(version) = package.version else {
            return Ok(None);
        };

        let declared: HashMap<PackageName, Constraint> = package
            .metadata
            .map(|metadata| metadata.requires_dist)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|requirement| {
                let name = PackageName::new(&requirement.name).ok()?;
                let constraint = requirement
                    .specifier
                    .as_deref()
                    .and_then(|s| Constraint::parse(s).ok())
                    .unwrap_or_default();
                Some((name, constraint))
            })
            .collect();

        let mut requires: Vec<RequirementSpec> = Vec::with_capacity(package.dependencies.len());
        for dependency in &package.dependencies {
            let name = PackageName::new(&dependency.name)?;
            // The same name is listed once per marker variant
            if requires.iter().any(|r| r.name() == &name) {
                continue;
            }
            let constraint = declared.get(&name).cloned().unwrap_or_default();
            requires.push(RequirementSpec::new(name, constraint));
        }

        Ok(Some(InstalledPackage::new(
            PackageName::new(&package.name)?,
            Version::new(&version)?,
            requires,
        )))
    }
}

impl Default for UvLockReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InstalledPackageReader for UvLockReader {
    fn read_installed_packages(
        &self,
        project_path: &Path,
        on_progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<InstalledPackage>> {
        let content = self.read_lockfile(project_path)?;
        Self::parse(&content, on_progress).map_err(|e| {
            DepTreeError::MetadataParseError {
                path: project_path.join("uv.lock"),
                details: format!("{:#}", e),
            }
            .into()
        })
    }

    fn source_description(&self) -> &str {
        "uv.lock"
    }
}
