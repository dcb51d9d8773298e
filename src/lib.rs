pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::ExtractionConfig;
pub use error::{Result, SocError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    derive_output_path, ExtractionReport, MatchRecord, OutputRow, SocExtractor, SocPattern,
    NO_DATA_MARKER, TABLE_HEADER,
};
pub use ui::{OutputFormatter, OutputMode};

/// Main library interface: one configured extraction run with its diagnostics.
pub struct SocExtract {
    config: ExtractionConfig,
    extractor: SocExtractor,
    output_formatter: OutputFormatter,
}

impl SocExtract {
    pub fn new(config: ExtractionConfig, output_mode: OutputMode) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, config.verbose);

        Self {
            config,
            extractor: SocExtractor::new(),
            output_formatter,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.to_config(), cli.output_mode())
    }

    /// Run the scan, reporting matches as they are found in verbose mode.
    pub fn run(&self) -> Result<ExtractionReport> {
        log::info!(
            "extracting {} -> {}",
            self.config.input_path.display(),
            self.config.output_path.display()
        );

        let (reader, mut writer) = self.extractor.open(&self.config)?;
        self.output_formatter.start_processing(&self.config.input_path);

        let report = if self.output_formatter.is_verbose() {
            let on_match: &dyn Fn(&OutputRow) = &|row| self.output_formatter.found_match(row);
            self.extractor
                .extract_from(&self.config, reader, &mut writer, Some(on_match))?
        } else {
            self.extractor
                .extract_from(&self.config, reader, &mut writer, None)?
        };

        if report.is_empty() {
            log::info!("no SOC lines in {}", self.config.input_path.display());
        }

        Ok(report)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &SocError) {
        log::debug!("run failed: {:?}", error);
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function for simple extraction.
pub fn extract_soc_data<P: Into<std::path::PathBuf>>(
    input: P,
    verbose: bool,
) -> Result<ExtractionReport> {
    SocExtract::new(ExtractionConfig::new(input, verbose), OutputMode::Plain).run()
}
