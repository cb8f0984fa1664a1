/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod tree_request;
mod tree_response;

pub use output_format::OutputFormat;
pub use tree_request::TreeRequest;
pub use tree_response::TreeResponse;
