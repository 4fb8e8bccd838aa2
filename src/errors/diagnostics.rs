//! Collects semantic errors and renders them against the source text.

use super::errors::Error;

#[derive(Debug, Default)]
pub struct Diagnostics {
    lines: Vec<String>,
    errors: Vec<Error>,
    echo: bool,
}

impl Diagnostics {
    /// Creates a sink that echoes every report to stderr.
    pub fn new(source: &str) -> Self {
        Diagnostics {
            lines: source.lines().map(String::from).collect(),
            errors: Vec::new(),
            echo: true,
        }
    }

    /// Creates a silent sink with no source text, errors are only collected.
    pub fn without_source() -> Self {
        Diagnostics::default()
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn report(&mut self, error: Error) {
        if self.echo {
            eprint!("{}", self.render(&error));
        }
        self.errors.push(error);
    }

    /// Formats `error` as a header line, the offending source line and a caret.
    ///
    /// A location outside the known source renders an empty source line.
    pub fn render(&self, error: &Error) -> String {
        let location = error.get_location();
        format!(
            "<Error> Found in line {}, column {}: {}\n{}\n{}^\n",
            location.line,
            location.col,
            error,
            self.source_line(location.line),
            " ".repeat(location.col.saturating_sub(1) as usize),
        )
    }

    pub fn source_line(&self, line: u32) -> &str {
        (line as usize)
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
