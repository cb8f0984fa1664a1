use pkgtree::prelude::*;
use std::path::Path;

/// Mock InstalledPackageReader serving a fixed package list
pub struct MockInstalledPackageReader {
    pub packages: Vec<(String, String, Vec<String>)>,
    pub should_fail: bool,
}

impl MockInstalledPackageReader {
    pub fn new() -> Self {
        Self {
            packages: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_package(mut self, name: &str, version: &str, requires: &[&str]) -> Self {
        self.packages.push((
            name.to_string(),
            version.to_string(),
            requires.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            packages: Vec::new(),
            should_fail: true,
        }
    }
}

impl InstalledPackageReader for MockInstalledPackageReader {
    fn read_installed_packages(
        &self,
        _project_path: &Path,
        on_progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<InstalledPackage>> {
        if self.should_fail {
            anyhow::bail!("Mock package read failure");
        }

        let total = self.packages.len();
        let mut packages = Vec::with_capacity(total);
        for (index, (name, version, requires)) in self.packages.iter().enumerate() {
            let requires: Vec<&str> = requires.iter().map(String::as_str).collect();
            packages.push(InstalledPackage::parse(name, version, &requires)?);
            on_progress(index + 1, total);
        }
        Ok(packages)
    }

    fn source_description(&self) -> &str {
        "mock"
    }
}
