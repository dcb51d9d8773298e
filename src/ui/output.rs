use crate::error::{SocError, UserFriendlyError};
use crate::extractor::{ExtractionReport, OutputRow};
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

/// Renders run diagnostics. Errors go to stderr, everything else to stdout.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported(),
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    /// Shown only in verbose mode.
    pub fn info(&self, message: &str) {
        if !self.verbose {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Info, message),
            OutputMode::Json => self.print_json_message("info", message),
            OutputMode::Plain => println!("INFO: {}", message),
        }
    }

    pub fn start_processing(&self, input: &Path) {
        if !self.verbose {
            return;
        }
        let message = format!("Processing file: {}", input.display());
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", ROCKET, style(&message).bold());
                } else {
                    println!("> {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("operation_start", &message),
            OutputMode::Plain => println!("STARTING: {}", message),
        }
    }

    pub fn found_match(&self, row: &OutputRow) {
        if !self.verbose {
            return;
        }
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "match",
                "transition": row.transition,
                "value": row.value,
            })),
            _ => self.info(&format!(
                "Found match: Transition={}, Value={}",
                row.transition, row.value
            )),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &SocError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// Completion notice, preceded by the no-match warning when nothing was found.
    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        if report.is_empty() {
            self.warning("No matching lines found in the input file.");
        }

        match self.mode {
            OutputMode::Json => {
                let json_output = serde_json::to_string_pretty(&serde_json::json!({
                    "type": "report",
                    "report": report,
                }))
                .unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                if self.verbose {
                    self.info(&format!(
                        "{} of {} lines matched",
                        report.matches(),
                        report.lines_scanned
                    ));
                }
                self.success(&format!(
                    "Data has been extracted to {}",
                    report.output_path.display()
                ));
            }
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Warning => (&WARNING, style(message).yellow().bold()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "Error:",
                MessageType::Warning => "Warning:",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
