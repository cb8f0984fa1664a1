/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, etc.).
pub mod formatter;
pub mod installed_package_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_config_reader;

pub use formatter::ReportFormatter;
pub use installed_package_reader::InstalledPackageReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_config_reader::ProjectConfigReader;
