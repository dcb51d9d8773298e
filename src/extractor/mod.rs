pub mod output_path;
pub mod pattern;
pub mod soc_extractor;

pub use output_path::derive_output_path;
pub use pattern::{MatchRecord, OutputRow, SocPattern};
pub use soc_extractor::{ExtractionReport, SocExtractor, NO_DATA_MARKER, TABLE_HEADER};
