use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const INPUT_MARKER: &str = ".dat";
pub const OUTPUT_SUFFIX: &str = "_soc_data.dat";

/// Derive the table path from the input path.
///
/// The path text is cut at the last `.dat` (wherever it sits, not only at the
/// end) and `_soc_data.dat` is appended to what precedes it. Without any
/// `.dat` the whole path is kept.
pub fn derive_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let mut output = stem_before_marker(input.as_ref());
    output.push(OUTPUT_SUFFIX);
    PathBuf::from(output)
}

// Bytes that are not valid UTF-8 are carried through unchanged.
#[cfg(unix)]
fn stem_before_marker(input: &Path) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = input.as_os_str().as_bytes();
    let marker = INPUT_MARKER.as_bytes();
    let stem = match bytes.windows(marker.len()).rposition(|w| w == marker) {
        Some(pos) => &bytes[..pos],
        None => bytes,
    };

    OsString::from_vec(stem.to_vec())
}

#[cfg(not(unix))]
fn stem_before_marker(input: &Path) -> OsString {
    let os = input.as_os_str();
    match os.to_str() {
        Some(text) => match text.rfind(INPUT_MARKER) {
            Some(pos) => OsString::from(&text[..pos]),
            None => os.to_os_string(),
        },
        None => os.to_os_string(),
    }
}
