/*!
The tokenizer: a row-oriented parse loop over a lazy scalar source, with
field assembly, escaping, trimming and delimiter dispatch.
*/
use crate::buffer::ScalarBuffer;
use crate::config::{HeaderStrategy, InferenceOption, ReaderConfig};
use crate::error::{CsvCoreError, ErrorKind, Result};
use crate::inferrer::DelimiterInferrer;
use crate::matcher::{matches_delimiter, matches_row_delimiter, pull};
use crate::sample::take_sample;
use crate::settings::DelimitersPair;

/// A source of Unicode scalars a reader consumes from.
///
/// A blanket implementation covers any `char` iterator. Implement this
/// directly over a fallible decoder (for instance one doing its own
/// byte-encoding detection) to surface `StreamFailure` from `next_scalar`
/// instead of panicking or losing the error.
pub trait ScalarSource {
    fn next_scalar(&mut self) -> Result<Option<char>>;
}

impl<I: Iterator<Item = char>> ScalarSource for I {
    fn next_scalar(&mut self) -> Result<Option<char>> {
        Ok(self.next())
    }
}

/// The lifecycle state of a reader.
#[derive(Debug, Clone)]
pub enum ReaderStatus {
    Active,
    Finished,
    Failed(CsvCoreError),
}

enum FieldResult {
    /// A field was read; more fields follow in this row.
    Continue(String),
    /// A field was read and it closes the row (row delimiter or EOF).
    RowEnd(String),
    /// No scalar was available at field-start; the row-assembly loop
    /// decides what this means (clean EOF, or the end of a partial row).
    EndOfInput,
}

/// A streaming CSV reader over an abstract source of Unicode scalars.
#[derive(Debug)]
pub struct CsvReader<S> {
    source: S,
    buffer: ScalarBuffer,
    delimiters: DelimitersPair,
    escape: Option<char>,
    trim: Vec<char>,
    headers: Vec<String>,
    row_index: usize,
    expected_fields: usize,
    status: ReaderStatus,
}

impl<S: ScalarSource> CsvReader<S> {
    /// Builds a reader over `source`. Runs dialect inference first if
    /// either delimiter slot is configured as `Infer`, then validates
    /// prefix-disjointness and escape/trim disjointness, then consumes the
    /// header row if configured to.
    pub fn from_scalars(mut source: S, config: ReaderConfig) -> Result<CsvReader<S>> {
        let mut buffer = ScalarBuffer::new();
        let escape = config.escape.resolve();

        let (field, row) = if config.field.is_infer() || config.row.is_infer() {
            let sample = take_sample(&mut source, config.sample_size)?;
            let field_candidates = match &config.field {
                InferenceOption::Use(d) => vec![d.clone()],
                InferenceOption::Infer(candidates) => candidates.clone(),
            };
            let row_candidates = match &config.row {
                InferenceOption::Use(r) => vec![r.clone()],
                InferenceOption::Infer(candidates) => candidates.clone(),
            };
            let dialect = DelimiterInferrer::infer(
                &sample,
                &field_candidates,
                &row_candidates,
                escape,
                &config.trim,
            )?;
            buffer.push_all(&sample);
            (dialect.field, dialect.row)
        } else {
            let field = match config.field {
                InferenceOption::Use(d) => d,
                InferenceOption::Infer(_) => unreachable!("checked above"),
            };
            let row = match config.row {
                InferenceOption::Use(r) => r,
                InferenceOption::Infer(_) => unreachable!("checked above"),
            };
            (field, row)
        };

        let delimiters = DelimitersPair::new(field, row)?;
        if let Some(e) = escape {
            delimiters.validate_escape(e)?;
        }
        if !config.trim.is_empty() {
            delimiters.validate_trim(&config.trim, escape)?;
        }

        let mut reader = CsvReader {
            source,
            buffer,
            delimiters,
            escape,
            trim: config.trim,
            headers: Vec::new(),
            row_index: 0,
            expected_fields: 0,
            status: ReaderStatus::Active,
        };

        if config.header == HeaderStrategy::FirstLine {
            if let Some(headers) = reader.read_row_internal()? {
                reader.headers = headers;
            }
        }

        Ok(reader)
    }

    /// The captured header row, empty if no header strategy was configured.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The reader's current lifecycle state.
    pub fn status(&self) -> &ReaderStatus {
        &self.status
    }

    /// Reads the next row, or `None` once the stream is exhausted.
    ///
    /// Errors are sticky: once any call returns `Err`, every subsequent
    /// call returns a clone of that same error.
    pub fn read_row(&mut self) -> Option<Result<Vec<String>>> {
        if let ReaderStatus::Failed(err) = &self.status {
            return Some(Err(err.clone()));
        }
        if let ReaderStatus::Finished = self.status {
            return None;
        }

        match self.read_row_internal() {
            Ok(None) => {
                self.status = ReaderStatus::Finished;
                None
            }
            Ok(Some(fields)) => {
                if self.expected_fields == 0 {
                    self.expected_fields = fields.len();
                } else if fields.len() != self.expected_fields {
                    let err = CsvCoreError::new(
                        ErrorKind::InvalidInput,
                        "row field count does not match the width fixed by the first row",
                    )
                    .with("row", self.row_index.to_string())
                    .with("expected_fields", self.expected_fields.to_string())
                    .with("actual_fields", fields.len().to_string());
                    self.status = ReaderStatus::Failed(err.clone());
                    return Some(Err(err));
                }
                self.row_index += 1;
                Some(Ok(fields))
            }
            Err(err) => {
                self.status = ReaderStatus::Failed(err.clone());
                Some(Err(err))
            }
        }
    }

    fn read_row_internal(&mut self) -> Result<Option<Vec<String>>> {
        let mut fields = Vec::new();
        loop {
            match self.read_field()? {
                FieldResult::Continue(value) => fields.push(value),
                FieldResult::RowEnd(value) => {
                    fields.push(value);
                    return Ok(Some(fields));
                }
                FieldResult::EndOfInput => {
                    if fields.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(fields));
                }
            }
        }
    }

    fn read_field(&mut self) -> Result<FieldResult> {
        let first = if self.trim.is_empty() {
            self.pull()?
        } else {
            self.skip_leading_trim()?
        };

        let s = match first {
            Some(s) => s,
            None => return Ok(FieldResult::EndOfInput),
        };

        if self.escape == Some(s) {
            return self.read_escaped_field();
        }
        if self.is_field_delim(s)? {
            return Ok(FieldResult::Continue(String::new()));
        }
        if self.is_row_delim(s)? {
            return Ok(FieldResult::RowEnd(String::new()));
        }
        self.read_unescaped_field(s)
    }

    fn read_unescaped_field(&mut self, first: char) -> Result<FieldResult> {
        let mut value = String::new();
        value.push(first);
        loop {
            match self.pull()? {
                None => return Ok(FieldResult::RowEnd(self.trim_trailing(value))),
                Some(c) => {
                    if self.is_field_delim(c)? {
                        return Ok(FieldResult::Continue(self.trim_trailing(value)));
                    }
                    if self.is_row_delim(c)? {
                        return Ok(FieldResult::RowEnd(self.trim_trailing(value)));
                    }
                    value.push(c);
                }
            }
        }
    }

    fn read_escaped_field(&mut self) -> Result<FieldResult> {
        let escape = self.escape.expect("read_escaped_field requires an escape scalar");
        let mut value = String::new();
        loop {
            match self.pull()? {
                None => {
                    return Err(CsvCoreError::new(
                        ErrorKind::InvalidInput,
                        "escaped field left open at end of input",
                    )
                    .with("row", self.row_index.to_string()));
                }
                Some(c) if c == escape => match self.pull()? {
                    Some(next) if next == escape => value.push(escape),
                    Some(next) => {
                        self.buffer.push(next);
                        return self.read_after_escape(value);
                    }
                    None => return self.read_after_escape(value),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn read_after_escape(&mut self, mut value: String) -> Result<FieldResult> {
        loop {
            match self.pull()? {
                None => return Ok(FieldResult::RowEnd(value)),
                Some(s) => {
                    if self.is_field_delim(s)? {
                        return Ok(FieldResult::Continue(value));
                    }
                    if self.is_row_delim(s)? {
                        return Ok(FieldResult::RowEnd(value));
                    }
                    // Lenient: malformed trailing content is kept as
                    // literal content rather than raised as an error.
                    value.push(s);
                }
            }
        }
    }

    fn skip_leading_trim(&mut self) -> Result<Option<char>> {
        loop {
            match self.pull()? {
                Some(c) if self.trim.contains(&c) => continue,
                other => return Ok(other),
            }
        }
    }

    fn trim_trailing(&self, value: String) -> String {
        if self.trim.is_empty() {
            return value;
        }
        value.trim_end_matches(|c| self.trim.contains(&c)).to_string()
    }

    fn pull(&mut self) -> Result<Option<char>> {
        let buffer = &mut self.buffer;
        let source = &mut self.source;
        pull(buffer, &mut || source.next_scalar())
    }

    fn is_field_delim(&mut self, s: char) -> Result<bool> {
        let buffer = &mut self.buffer;
        let source = &mut self.source;
        let field = self.delimiters.field();
        matches_delimiter(s, field, buffer, &mut || source.next_scalar())
    }

    fn is_row_delim(&mut self, s: char) -> Result<bool> {
        let buffer = &mut self.buffer;
        let source = &mut self.source;
        let row = self.delimiters.row();
        matches_row_delimiter(s, row, buffer, &mut || source.next_scalar())
    }
}

impl CsvReader<std::vec::IntoIter<char>> {
    /// Builds a reader over an in-memory string. Used pervasively by tests
    /// and by the inferrer's speculative sub-readers.
    pub fn from_str(s: &str, config: ReaderConfig) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        CsvReader::from_scalars(chars.into_iter(), config)
    }
}

impl<S: ScalarSource> Iterator for CsvReader<S> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row()
    }
}
