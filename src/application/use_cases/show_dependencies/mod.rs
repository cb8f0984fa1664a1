use crate::application::dto::{TreeRequest, TreeResponse};
use crate::application::read_models::ReportMetadata;
use crate::dependency_tree::domain::{InstalledPackage, RequirementGroup};
use crate::dependency_tree::services::{DependencyTree, RequirementGroupCollector};
use crate::ports::outbound::{InstalledPackageReader, ProgressReporter, ProjectConfigReader};
use crate::shared::Result;

/// ShowDependenciesUseCase - Core use case for the dependency tree report
///
/// This use case orchestrates the analysis workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `IPR` - InstalledPackageReader implementation
/// * `PCR` - ProjectConfigReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ShowDependenciesUseCase<IPR, PCR, PR> {
    package_reader: IPR,
    project_config_reader: PCR,
    progress_reporter: PR,
}

impl<IPR, PCR, PR> ShowDependenciesUseCase<IPR, PCR, PR>
where
    IPR: InstalledPackageReader,
    PCR: ProjectConfigReader,
    PR: ProgressReporter,
{
    /// Creates a new ShowDependenciesUseCase with injected dependencies
    pub fn new(package_reader: IPR, project_config_reader: PCR, progress_reporter: PR) -> Self {
        Self {
            package_reader,
            project_config_reader,
            progress_reporter,
        }
    }

    /// Executes the analysis
    ///
    /// # Returns
    /// TreeResponse containing the analyzed tree and report metadata
    ///
    /// # Errors
    /// Returns an error if the packages or the project configuration cannot
    /// be read, or if the package list is inconsistent. Conflicts and cycles
    /// are part of the response, not errors.
    pub fn execute(&self, request: TreeRequest) -> Result<TreeResponse> {
        // Step 1: Read installed packages
        let packages = self.read_and_report_packages(&request)?;

        // Step 2: Read requirement groups from project metadata
        let groups = self.read_and_report_groups(&request)?;

        // Step 3: Analyze
        self.progress_reporter
            .report("🌳 Building dependency tree...");
        let tree = DependencyTree::new(packages, groups)?;
        self.report_findings(&tree);

        // Step 4: Build response
        let project = self
            .project_config_reader
            .read_project_name(&request.project_path)
            .ok();
        let metadata = ReportMetadata::generate(project, self.package_reader.source_description());

        Ok(TreeResponse::new(tree, metadata))
    }

    fn read_and_report_packages(&self, request: &TreeRequest) -> Result<Vec<InstalledPackage>> {
        self.progress_reporter.report(&format!(
            "📖 Reading installed packages from {}: {}",
            self.package_reader.source_description(),
            request.project_path.display()
        ));

        let on_progress = |current: usize, total: usize| {
            self.progress_reporter
                .report_progress(current, total, Some("Reading package metadata"));
        };
        let packages = self
            .package_reader
            .read_installed_packages(&request.project_path, &on_progress)?;

        self.progress_reporter.report(&format!(
            "📦 Detected {} installed package(s)",
            packages.len()
        ));

        Ok(packages)
    }

    fn read_and_report_groups(&self, request: &TreeRequest) -> Result<Vec<RequirementGroup>> {
        let definitions = self
            .project_config_reader
            .read_definitions(&request.project_path)?;
        let groups = RequirementGroupCollector::collect(&definitions)?;

        self.progress_reporter.report(&format!(
            "📊 Found {} requirement group(s)",
            groups.len()
        ));

        Ok(groups)
    }

    fn report_findings(&self, tree: &DependencyTree) {
        for section in tree.sections() {
            for absent in section.absent_roots() {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: '{}' is listed in {} but is not installed.",
                    absent,
                    section.title()
                ));
            }
        }

        if tree.has_conflicts() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} package(s) with version conflicts.",
                tree.conflicts().len()
            ));
        }
        if !tree.cycles().is_empty() {
            self.progress_reporter.report(&format!(
                "🔁 {} dependency cycle(s) found",
                tree.cycles().len()
            ));
        }

        self.progress_reporter
            .report_completion("✅ Dependency analysis complete");
    }
}
