use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Matches `<S0|Hso|T1,1,0,-1> (cm-1): v1 v2 v3 v4` anywhere in a line.
const SOC_LINE_PATTERN: &str =
    r"<(\w+)\|Hso\|(\w+),1,0,-1> \(cm-1\):\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)";

lazy_static! {
    static ref SOC_LINE_RE: Regex = Regex::new(SOC_LINE_PATTERN).expect("Regex pattern invalid.");
}

/// One spin-orbit coupling line as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub identifier1: String,
    pub identifier2: String,
    pub values: [String; 4],
}

impl MatchRecord {
    pub fn transition(&self) -> String {
        format!("{}-{}", self.identifier1, self.identifier2)
    }

    /// The second numeric field is the reported coupling.
    pub fn coupling(&self) -> &str {
        &self.values[1]
    }

    pub fn to_row(&self) -> OutputRow {
        OutputRow {
            transition: self.transition(),
            value: self.coupling().to_string(),
        }
    }
}

/// A data row of the extracted table. The value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub transition: String,
    pub value: String,
}

impl fmt::Display for OutputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t\t{}", self.transition, self.value)
    }
}

pub struct SocPattern {
    regex: &'static Regex,
}

impl SocPattern {
    pub fn new() -> Self {
        Self {
            regex: &SOC_LINE_RE,
        }
    }

    pub fn parse_line(&self, line: &str) -> Option<MatchRecord> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

        Some(MatchRecord {
            identifier1: group(1),
            identifier2: group(2),
            values: [group(3), group(4), group(5), group(6)],
        })
    }
}

impl Default for SocPattern {
    fn default() -> Self {
        Self::new()
    }
}
