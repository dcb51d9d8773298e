use crate::extractor::derive_output_path;
use serde::Serialize;
use std::path::PathBuf;

/// Immutable settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub verbose: bool,
}

impl ExtractionConfig {
    /// The output path is always derived from the input path.
    pub fn new<P: Into<PathBuf>>(input_path: P, verbose: bool) -> Self {
        let input_path = input_path.into();
        let output_path = derive_output_path(&input_path);

        Self {
            input_path,
            output_path,
            verbose,
        }
    }
}
