use crate::dependency_tree::domain::InstalledPackage;
use crate::shared::Result;
use std::path::Path;

/// InstalledPackageReader port for loading the installed-package records
///
/// This port abstracts where the installed distributions of a project come
/// from (a virtual environment's site-packages, a uv.lock file, ...).
pub trait InstalledPackageReader {
    /// Reads every installed package of the project
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory
    /// * `on_progress` - Called with `(scanned, total)` while entries are read
    ///
    /// # Returns
    /// The installed packages, in the order they were found
    ///
    /// # Errors
    /// Returns an error if:
    /// - The package source (environment, lockfile) cannot be located
    /// - A metadata file cannot be read or parsed
    fn read_installed_packages(
        &self,
        project_path: &Path,
        on_progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<InstalledPackage>>;

    /// Human readable name of the package source, used in progress messages
    fn source_description(&self) -> &str;
}

impl<T: InstalledPackageReader + ?Sized> InstalledPackageReader for Box<T> {
    fn read_installed_packages(
        &self,
        project_path: &Path,
        on_progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<InstalledPackage>> {
        (**self).read_installed_packages(project_path, on_progress)
    }

    fn source_description(&self) -> &str {
        (**self).source_description()
    }
}
