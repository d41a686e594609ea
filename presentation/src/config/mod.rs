//! Presentation-level configuration
//!
//! Resolved output settings for the console.

use airline_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Command-line flags win over the config file, which wins over defaults.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            // JSON goes to stdout unmixed
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }

    /// Apply the color setting to terminal output.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_format_wins() {
        let config =
            OutputConfig::resolve(Some(OutputFormat::Full), Some(OutputFormat::Json), true, false);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.show_progress);
    }

    #[test]
    fn test_file_format_then_default() {
        let config = OutputConfig::resolve(None, Some(OutputFormat::Json), false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.show_progress);
        assert!(!config.color);

        let config = OutputConfig::resolve(None, None, true, true);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(!config.show_progress);
    }
}
