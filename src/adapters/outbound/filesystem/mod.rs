/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod site_packages_reader;
mod uv_lock_reader;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use site_packages_reader::SitePackagesReader;
pub use uv_lock_reader::UvLockReader;
