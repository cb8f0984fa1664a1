use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::dependency_tree::services::RenderOptions;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `options` - Which normally hidden nodes to include
    ///
    /// # Examples
    /// ```
    /// use pkgtree::application::dto::OutputFormat;
    /// use pkgtree::application::factories::FormatterFactory;
    /// use pkgtree::dependency_tree::services::RenderOptions;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, RenderOptions::default());
    /// ```
    pub fn create(format: OutputFormat, options: RenderOptions) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new(options)),
            OutputFormat::Json => Box::new(JsonFormatter::new(options)),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use pkgtree::application::dto::OutputFormat;
    /// use pkgtree::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating text report...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}
