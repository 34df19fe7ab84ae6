use colored::*;
use preflight_core::error::{CheckResult, Severity};
use preflight_core::exec::{ActionStatus, InvocationResult, RunReport};
use serde::Serialize;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
}

/// Reporter handles all output formatting.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
        }
    }

    /// Returns the current output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "ERROR:".red(), message);
            }
            OutputMode::Json => {
                self.json_results.push(JsonResultEntry {
                    result_type: "error".to_string(),
                    message: message.to_string(),
                    details: None,
                });
            }
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {}", "WARNING:".yellow(), message);
            }
            OutputMode::Json => {
                self.json_results.push(JsonResultEntry {
                    result_type: "warning".to_string(),
                    message: message.to_string(),
                    details: None,
                });
            }
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => {
                self.json_results.push(JsonResultEntry {
                    result_type: "success".to_string(),
                    message: message.to_string(),
                    details: None,
                });
            }
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "INFO:".blue(), message);
            }
            OutputMode::Json => {
                self.json_results.push(JsonResultEntry {
                    result_type: "info".to_string(),
                    message: message.to_string(),
                    details: None,
                });
            }
            OutputMode::Quiet => {}
        }
    }

    /// One line per configured action for `preflight list`.
    pub fn action_line(&mut self, name: &str, details: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", name.bold(), details);
            }
            OutputMode::Json => {
                self.json_results.push(JsonResultEntry {
                    result_type: "action".to_string(),
                    message: name.to_string(),
                    details: Some(details.to_string()),
                });
            }
            OutputMode::Quiet => {}
        }
    }

    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    pub fn report_check(&mut self, result: &CheckResult) {
        for diagnostic in &result.diagnostics {
            let mut msg = diagnostic.message.clone();
            if let Some(action) = &diagnostic.action {
                msg = format!("{action}: {msg}");
            }
            match diagnostic.severity {
                Severity::Error => self.error(&msg),
                Severity::Warning => self.warning(&msg),
            }
        }
    }

    /// Reports a completed run: per-action entries in JSON mode, captured
    /// output of non-passing actions plus a summary line in human mode.
    pub fn report_run(&mut self, report: &RunReport) {
        if self.mode == OutputMode::Json {
            for result in &report.results {
                self.json_results.push(json_entry(result));
            }
        } else {
            for result in report.failures() {
                self.error(&format!(
                    "{}: {}",
                    result.action,
                    status_message(&result.status)
                ));
                dump_output(result);
            }
        }

        let invoked = report.invoked_count();
        let skipped = report.results.len() - invoked;
        if report.interrupted {
            self.error(&format!(
                "Interrupted; {invoked} action(s) ran before cancellation"
            ));
        } else if report.success() {
            self.success(&format!(
                "All actions passed ({invoked} run, {skipped} skipped)"
            ));
        } else {
            self.error(&format!(
                "{} of {invoked} invoked action(s) failed",
                report.failures().count()
            ));
        }
    }

    pub fn finish(&self) {
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: self.json_results.clone(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{json}");
            }
        }
    }
}

fn status_message(status: &ActionStatus) -> String {
    match status {
        ActionStatus::Passed => "passed".to_string(),
        ActionStatus::Failed { code: Some(code) } => format!("failed (exit {code})"),
        ActionStatus::Failed { code: None } => "terminated by signal".to_string(),
        ActionStatus::Error { message } => message.clone(),
        ActionStatus::Skipped => "skipped (no matching files)".to_string(),
        ActionStatus::Interrupted => "interrupted".to_string(),
    }
}

fn json_entry(result: &InvocationResult) -> JsonResultEntry {
    let result_type = match &result.status {
        ActionStatus::Passed => "success",
        ActionStatus::Skipped => "skipped",
        _ => "error",
    };
    let details = if result.passed() {
        None
    } else {
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&result.stdout),
            String::from_utf8_lossy(&result.stderr)
        );
        if combined.is_empty() {
            None
        } else {
            Some(combined)
        }
    };
    JsonResultEntry {
        result_type: result_type.to_string(),
        message: format!(
            "{}: {} ({} file(s))",
            result.action,
            status_message(&result.status),
            result.files.len()
        ),
        details,
    }
}

fn dump_output(result: &InvocationResult) {
    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);
    for line in stdout.lines().chain(stderr.lines()) {
        eprintln!("  {line}");
    }
}
