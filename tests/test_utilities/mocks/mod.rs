/// Mock implementations for testing
mod mock_installed_package_reader;
mod mock_progress_reporter;
mod mock_project_config_reader;

pub use mock_installed_package_reader::MockInstalledPackageReader;
pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
pub use mock_project_config_reader::MockProjectConfigReader;
