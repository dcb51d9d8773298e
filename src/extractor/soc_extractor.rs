use crate::config::ExtractionConfig;
use crate::error::{Result, SocError};
use crate::extractor::pattern::{OutputRow, SocPattern};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

pub const TABLE_HEADER: &str = "Transition\tValue in cm-1";
pub const NO_DATA_MARKER: &str = "No data extracted.";

/// Outcome of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_scanned: usize,
    pub rows: Vec<OutputRow>,
}

impl ExtractionReport {
    pub fn matches(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

const BUFFER_SIZE: usize = 64 * 1024;

pub struct SocExtractor {
    pattern: SocPattern,
}

impl SocExtractor {
    pub fn new() -> Self {
        Self {
            pattern: SocPattern::new(),
        }
    }

    /// Scan the configured input and write the SOC table to the derived path.
    pub fn extract(
        &self,
        config: &ExtractionConfig,
        on_match: Option<&dyn Fn(&OutputRow)>,
    ) -> Result<ExtractionReport> {
        let (reader, mut writer) = self.open(config)?;
        self.extract_from(config, reader, &mut writer, on_match)
    }

    /// Open the input and create (truncate) the output.
    ///
    /// Nothing is created when the input is missing or cannot be opened.
    pub fn open(
        &self,
        config: &ExtractionConfig,
    ) -> Result<(BufReader<fs::File>, BufWriter<fs::File>)> {
        let input_path = &config.input_path;
        let output_path = &config.output_path;

        if !input_path.is_file() {
            return Err(SocError::missing_input(input_path));
        }

        let input = fs::File::open(input_path).map_err(|e| SocError::io(input_path, e))?;
        let output = fs::File::create(output_path).map_err(|e| SocError::io(output_path, e))?;
        log::debug!(
            "scanning {} into {}",
            input_path.display(),
            output_path.display()
        );

        Ok((
            BufReader::with_capacity(BUFFER_SIZE, input),
            BufWriter::with_capacity(BUFFER_SIZE, output),
        ))
    }

    /// Rows written before an I/O failure stay in `writer`.
    pub fn extract_from<R: BufRead, W: Write>(
        &self,
        config: &ExtractionConfig,
        reader: R,
        writer: &mut W,
        on_match: Option<&dyn Fn(&OutputRow)>,
    ) -> Result<ExtractionReport> {
        let (lines_scanned, rows) = self.scan(reader, writer, config, on_match)?;

        Ok(ExtractionReport {
            input_path: config.input_path.clone(),
            output_path: config.output_path.clone(),
            lines_scanned,
            rows,
        })
    }

    /// Header, one row per matching line in input order, then the no-data
    /// marker if nothing matched. `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn scan<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
        config: &ExtractionConfig,
        on_match: Option<&dyn Fn(&OutputRow)>,
    ) -> Result<(usize, Vec<OutputRow>)> {
        let read_err = |e: io::Error| SocError::io(&config.input_path, e);
        let write_err = |e: io::Error| SocError::io(&config.output_path, e);

        writeln!(writer, "{}", TABLE_HEADER).map_err(write_err)?;

        let mut lines_scanned = 0;
        let mut rows = Vec::new();
        let mut chunk = Vec::new();

        loop {
            chunk.clear();
            if reader.read_until(b'\n', &mut chunk).map_err(read_err)? == 0 {
                break;
            }

            for raw in split_lines(&chunk) {
                let line = std::str::from_utf8(raw)
                    .map_err(|e| read_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
                lines_scanned += 1;

                let Some(record) = self.pattern.parse_line(line) else {
                    continue;
                };

                let row = record.to_row();
                writeln!(writer, "{}", row).map_err(write_err)?;
                log::debug!("line {}: {} = {}", lines_scanned, row.transition, row.value);

                if let Some(callback) = on_match {
                    callback(&row);
                }
                rows.push(row);
            }
        }

        if rows.is_empty() {
            writeln!(writer, "{}", NO_DATA_MARKER).map_err(write_err)?;
        }

        writer.flush().map_err(write_err)?;

        Ok((lines_scanned, rows))
    }
}

/// Split a chunk ending at most once in `\n` into lines, treating `\r\n`
/// and lone `\r` as terminators too.
fn split_lines<'a>(chunk: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    body = body.strip_suffix(b"\r").unwrap_or(body);
    body.split(|&b| b == b'\r')
}

impl Default for SocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
 Spin-orbit coupling between states
<S0|Hso|T1,1,0,-1> (cm-1):   1.000   45.321   0.000   0.000
 some unrelated output line
<S0|Hso|T2,1,0,-1> (cm-1):   0.000   12.5   0.100   0.000
<S1|HSO|T1,1,0,-1> (cm-1):   0.000   99.9   0.000   0.000
  prefix <S1|Hso|T2,1,0,-1> (cm-1): 3.2 0.004 1 7 suffix
";

    fn write_input(dir: &Path, name: &str, content: &str) -> ExtractionConfig {
        let input = dir.join(name);
        fs::write(&input, content).unwrap();
        ExtractionConfig::new(input, false)
    }

    #[test]
    fn test_rows_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_input(temp_dir.path(), "run.dat", SAMPLE);

        let report = SocExtractor::new().extract(&config, None).unwrap();

        assert_eq!(report.matches(), 3);
        assert_eq!(report.lines_scanned, 6);
        assert_eq!(report.output_path, temp_dir.path().join("run_soc_data.dat"));

        let content = fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(
            content,
            "Transition\tValue in cm-1\n\
             S0-T1\t\t45.321\n\
             S0-T2\t\t12.5\n\
             S1-T2\t\t0.004\n"
        );
    }

    #[test]
    fn test_no_matches_writes_marker() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_input(temp_dir.path(), "empty.dat", "nothing here\n");

        let report = SocExtractor::new().extract(&config, None).unwrap();

        assert!(report.is_empty());
        let content = fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(content, "Transition\tValue in cm-1\nNo data extracted.\n");
    }

    #[test]
    fn test_empty_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_input(temp_dir.path(), "blank.dat", "");

        let report = SocExtractor::new().extract(&config, None).unwrap();

        assert_eq!(report.lines_scanned, 0);
        let content = fs::read_to_string(&report.output_path).unwrap();
        assert!(content.ends_with("No data extracted.\n"));
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = ExtractionConfig::new(temp_dir.path().join("absent.dat"), false);

        let err = SocExtractor::new().extract(&config, None).unwrap_err();

        assert!(matches!(err, SocError::MissingInput { .. }));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("folder.dat");
        fs::create_dir(&dir).unwrap();
        let config = ExtractionConfig::new(dir, false);

        let err = SocExtractor::new().extract(&config, None).unwrap_err();
        assert!(matches!(err, SocError::MissingInput { .. }));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_input(temp_dir.path(), "run.dat", SAMPLE);
        let extractor = SocExtractor::new();

        extractor.extract(&config, None).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        extractor.extract(&config, None).unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_on_match_callback_sees_each_row() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_input(temp_dir.path(), "run.dat", SAMPLE);
        let seen = RefCell::new(Vec::new());
        let callback: &dyn Fn(&OutputRow) =
            &|row| seen.borrow_mut().push(row.transition.clone());

        SocExtractor::new().extract(&config, Some(callback)).unwrap();

        assert_eq!(seen.into_inner(), vec!["S0-T1", "S0-T2", "S1-T2"]);
    }

    #[test]
    fn test_invalid_utf8_is_io_failure() {
        let config = ExtractionConfig::new(PathBuf::from("bad.dat"), false);
        let reader = Cursor::new(vec![0xff, 0xfe, b'\n']);
        let mut sink = Vec::new();

        let err = SocExtractor::new()
            .scan(reader, &mut sink, &config, None)
            .unwrap_err();

        match err {
            SocError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("bad.dat"));
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Header was already written when the read failed.
        assert_eq!(sink, b"Transition\tValue in cm-1\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_names_output() {
        let config = ExtractionConfig::new(PathBuf::from("run.dat"), false);
        let err = SocExtractor::new()
            .scan(Cursor::new(SAMPLE), &mut FailingWriter, &config, None)
            .unwrap_err();

        match err {
            SocError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("run_soc_data.dat"));
                assert!(source.to_string().contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let config = ExtractionConfig::new(PathBuf::from("cr.dat"), false);
        let input = "header\r\
<S0|Hso|T1,1,0,-1> (cm-1): 1.0 45.321 0.0 0.0\r\
<S0|Hso|T2,1,0,-1> (cm-1): 1.0 3.07 0.0 0.0\r\n\
<S1|Hso|T2,1,0,-1> (cm-1): 1.0 0.5 0.0 0.0\r";
        let mut sink = Vec::new();

        let (lines_scanned, rows) = SocExtractor::new()
            .scan(Cursor::new(input), &mut sink, &config, None)
            .unwrap();

        assert_eq!(lines_scanned, 4);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "Transition\tValue in cm-1\nS0-T1\t\t45.321\nS0-T2\t\t3.07\nS1-T2\t\t0.5\n"
        );
    }

    #[test]
    fn test_split_lines_terminators() {
        let collect = |chunk: &'static [u8]| split_lines(chunk).collect::<Vec<_>>();

        assert_eq!(collect(b"a\n"), vec![&b"a"[..]]);
        assert_eq!(collect(b"a\r\n"), vec![&b"a"[..]]);
        assert_eq!(collect(b"a\rb\n"), vec![&b"a"[..], &b"b"[..]]);
        assert_eq!(collect(b"a\r\r"), vec![&b"a"[..], &b""[..]]);
        assert_eq!(collect(b"\n"), vec![&b""[..]]);
        assert_eq!(collect(b"tail"), vec![&b"tail"[..]]);
    }
}
