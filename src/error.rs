/*!
Error types and diagnostics shared by the reader, writer and inferrer.
*/
use std::error::Error;
use std::fmt;
use std::io;

/// The category of failure a reader or writer operation can report.
///
/// Kept as a flat enum (rather than one error type per component) because
/// the reader, the writer and the inferrer all funnel into the same five
/// buckets, and callers generally want to `match` on the bucket rather than
/// on which subsystem raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A delimiter is a prefix of another, an escape scalar collides with a
    /// delimiter or the trim set, or an inference slot was given no
    /// candidates.
    InvalidConfiguration,
    /// A row's field count disagrees with the width fixed by the first row,
    /// a field carries a raw delimiter while escaping is disabled, or an
    /// escaped field is left open at end of input.
    InvalidInput,
    /// No inference candidate produced a positive pattern score.
    InferenceFailure,
    /// The underlying decoder or sink reported a failure.
    StreamFailure,
    /// The writer was asked to do something its current state forbids.
    InvalidOperation,
}

/// An error produced while reading, writing or inferring the dialect of CSV
/// data, carrying a human-readable reason plus auxiliary diagnostics (the
/// offending delimiter, escape scalar, row/field index, ...).
#[derive(Debug, Clone)]
pub struct CsvCoreError {
    kind: ErrorKind,
    reason: String,
    diagnostics: Vec<(&'static str, String)>,
}

impl CsvCoreError {
    /// Builds a new error of `kind` with a human-readable `reason`.
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        CsvCoreError {
            kind,
            reason: reason.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Attaches a diagnostic key/value pair, returning `self` for chaining.
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.diagnostics.push((key, value.to_string()));
        self
    }

    /// The category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable reason passed at construction time.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Auxiliary key/value diagnostics attached to this error.
    pub fn diagnostics(&self) -> &[(&'static str, String)] {
        &self.diagnostics
    }
}

impl fmt::Display for CsvCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.reason)?;
        for (key, value) in &self.diagnostics {
            write!(f, " ({key}={value})")?;
        }
        Ok(())
    }
}

impl Error for CsvCoreError {}

impl From<io::Error> for CsvCoreError {
    fn from(err: io::Error) -> CsvCoreError {
        CsvCoreError::new(ErrorKind::StreamFailure, err.to_string())
    }
}

/// Ease-of-use `Result` type with a [`CsvCoreError`].
pub type Result<T> = std::result::Result<T, CsvCoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_diagnostics() {
        let err = CsvCoreError::new(ErrorKind::InvalidInput, "row too short")
            .with("row", 3)
            .with("expected_fields", 4);
        let rendered = err.to_string();
        assert!(rendered.contains("row too short"));
        assert!(rendered.contains("row=3"));
        assert!(rendered.contains("expected_fields=4"));
    }
}
