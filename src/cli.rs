use crate::config::ExtractionConfig;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "socextract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract SOC data from a file and save the results to an output file")]
#[command(
    long_about = "Reads an input file with lines in the format\n  \
    <identifier1|Hso|identifier2,1,0,-1> (cm-1): value1 value2 value3 value4\n\
    and writes 'identifier1-identifier2' with the second numerical value as the SOC value. \
    The table is saved next to the input, named with '_soc_data.dat' in place of '.dat'."
)]
#[command(after_help = "EXAMPLES:\n  \
    socextract -i tddft_soc.dat\n  \
    socextract --input run.dat --verbose\n  \
    socextract -i run.dat --output-format json")]
pub struct Cli {
    /// Input file containing `<A|Hso|B,1,0,-1> (cm-1): ...` lines
    #[arg(short, long)]
    pub input: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for diagnostics
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn to_config(&self) -> ExtractionConfig {
        ExtractionConfig::new(self.input.clone(), self.verbose)
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }
}
