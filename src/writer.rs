/*!
The writer: symmetric escaping, row-width padding and the BOM policy that
mirror the reader's tokenization rules.
*/
use crate::config::{BomStrategy, WriterConfig};
use crate::delimiter::Delimiter;
use crate::error::{CsvCoreError, ErrorKind, Result};

/// A destination a writer emits scalars into.
pub trait ScalarSink {
    fn write_scalar(&mut self, scalar: char) -> Result<()>;
}

impl ScalarSink for String {
    fn write_scalar(&mut self, scalar: char) -> Result<()> {
        self.push(scalar);
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into a [`ScalarSink`], encoding each
/// scalar as UTF-8. Byte-encoding choice beyond UTF-8 is an external
/// collaborator's concern (see crate docs).
pub struct IoSink<W: std::io::Write>(pub W);

impl<W: std::io::Write> ScalarSink for IoSink<W> {
    fn write_scalar(&mut self, scalar: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.0.write_all(scalar.encode_utf8(&mut buf).as_bytes())?;
        Ok(())
    }
}

/// The in-memory sink backing [`CsvWriter::to_string_sink`].
pub type StringSink = String;

/// A streaming CSV writer over an abstract scalar sink.
pub struct CsvWriter<W> {
    sink: W,
    field: Delimiter,
    row: Delimiter,
    escape: Option<char>,
    bom: BomStrategy,
    bom_written: bool,
    /// `None` until the first row fixes the width; distinct from
    /// `Some(0)`, which means the width was fixed at zero fields.
    expected_fields: Option<usize>,
    fields_in_row: usize,
}

impl<W: ScalarSink> CsvWriter<W> {
    /// Builds a writer over `sink`.
    pub fn new(sink: W, config: WriterConfig) -> Self {
        CsvWriter {
            sink,
            field: config.field,
            row: config.row,
            escape: config.escape.resolve(),
            bom: config.bom,
            bom_written: false,
            expected_fields: None,
            fields_in_row: 0,
        }
    }

    /// Writes a single field, escaping it if escaping is configured and the
    /// field's content requires it (contains the field delimiter, the row
    /// delimiter, the escape scalar itself, or a newline). Fails with
    /// `invalidOperation` if the row width is already fixed and this row
    /// has already written that many fields.
    pub fn write_field(&mut self, value: &str) -> Result<()> {
        if let Some(expected) = self.expected_fields {
            if self.fields_in_row >= expected {
                return Err(CsvCoreError::new(
                    ErrorKind::InvalidOperation,
                    "cannot write more fields than the width fixed by the first row",
                )
                .with("expected_fields", expected.to_string()));
            }
        }
        self.maybe_write_bom()?;
        if self.fields_in_row > 0 {
            self.write_raw(self.field.scalars().to_vec().into_iter())?;
        }
        self.write_value(value)?;
        self.fields_in_row += 1;
        Ok(())
    }

    /// Writes every field in `values`, then ends the row.
    pub fn write_row<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        for v in values {
            self.write_field(v.as_ref())?;
        }
        self.end_row()
    }

    /// Ends the current row, padding with empty fields if fewer fields were
    /// written than the width fixed by the first row. Never truncates: a
    /// row can never have more fields than the fixed width, since
    /// `write_field` itself rejects any field past that width.
    pub fn end_row(&mut self) -> Result<()> {
        match self.expected_fields {
            None => self.expected_fields = Some(self.fields_in_row),
            Some(expected) => {
                for _ in self.fields_in_row..expected {
                    self.write_field("")?;
                }
            }
        }
        self.write_raw(self.row.scalars().to_vec().into_iter())?;
        self.fields_in_row = 0;
        Ok(())
    }

    /// Writes a bare row delimiter with no fields, bypassing the row-width
    /// invariant entirely. Rejected before the row width is known, since
    /// at that point there is no invariant yet to bypass.
    pub fn write_empty_row(&mut self) -> Result<()> {
        if self.expected_fields.is_none() {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidOperation,
                "cannot write an empty row before the row width is known",
            ));
        }
        if self.fields_in_row != 0 {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidOperation,
                "cannot write an empty row in the middle of a row already in progress",
            ));
        }
        self.maybe_write_bom()?;
        self.write_raw(self.row.scalars().to_vec().into_iter())
    }

    /// Flushes any buffered state. Currently a no-op beyond sink
    /// responsibilities, kept as an explicit lifecycle method so adding
    /// trailer scalars later doesn't change the public API.
    pub fn end_file(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_value(&mut self, value: &str) -> Result<()> {
        match self.escape {
            Some(escape) => {
                let needs_escape = value.contains(escape)
                    || self.field_delimiter_in(value)
                    || self.row_delimiter_in(value)
                    || value.contains('\n')
                    || value.contains('\r');
                if needs_escape {
                    self.write_escaped(value)
                } else {
                    self.write_raw(value.chars())
                }
            }
            None => {
                if self.field_delimiter_in(value) || self.row_delimiter_in(value) {
                    return Err(CsvCoreError::new(
                        ErrorKind::InvalidInput,
                        "field contains a delimiter sequence but no escape scalar is configured",
                    )
                    .with("value", value));
                }
                self.write_raw(value.chars())
            }
        }
    }

    fn field_delimiter_in(&self, value: &str) -> bool {
        let field: String = self.field.scalars().iter().collect();
        value.contains(field.as_str())
    }

    fn row_delimiter_in(&self, value: &str) -> bool {
        let row: String = self.row.scalars().iter().collect();
        value.contains(row.as_str())
    }

    fn write_escaped(&mut self, value: &str) -> Result<()> {
        let escape = self.escape.expect("write_escaped requires an escape scalar");
        self.sink.write_scalar(escape)?;
        for c in value.chars() {
            if c == escape {
                self.sink.write_scalar(escape)?;
            }
            self.sink.write_scalar(c)?;
        }
        self.sink.write_scalar(escape)?;
        Ok(())
    }

    fn write_raw(&mut self, scalars: impl Iterator<Item = char>) -> Result<()> {
        for c in scalars {
            self.sink.write_scalar(c)?;
        }
        Ok(())
    }

    fn maybe_write_bom(&mut self) -> Result<()> {
        if self.bom_written {
            return Ok(());
        }
        self.bom_written = true;
        if self.bom == BomStrategy::Always {
            self.sink.write_scalar('\u{feff}')?;
        }
        Ok(())
    }
}

impl CsvWriter<StringSink> {
    /// Builds a writer over a fresh, in-memory `String` sink.
    pub fn to_string_sink(config: WriterConfig) -> Self {
        CsvWriter::new(String::new(), config)
    }

    /// The sink's contents so far.
    pub fn as_str(&self) -> &str {
        &self.sink
    }

    /// Consumes the writer, returning the sink's contents.
    pub fn into_inner(self) -> String {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EscapeStrategy;

    #[test]
    fn writes_basic_row() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        writer.write_row(&["a", "b", "c"]).unwrap();
        assert_eq!(writer.as_str(), "a,b,c\n");
    }

    #[test]
    fn escapes_field_containing_delimiter() {
        let config = WriterConfig::default().escape(EscapeStrategy::DOUBLE_QUOTE);
        let mut writer = CsvWriter::to_string_sink(config);
        writer.write_row(&["a", "b,c", "d"]).unwrap();
        assert_eq!(writer.as_str(), "a,\"b,c\",d\n");
    }

    #[test]
    fn doubles_escape_scalar_inside_escaped_field() {
        let config = WriterConfig::default().escape(EscapeStrategy::DOUBLE_QUOTE);
        let mut writer = CsvWriter::to_string_sink(config);
        writer.write_row(&["he said \"hi\""]).unwrap();
        assert_eq!(writer.as_str(), "\"he said \"\"hi\"\"\"\n");
    }

    #[test]
    fn pads_short_rows_to_fixed_width() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        writer.write_row(&["a", "b", "c"]).unwrap();
        writer.write_row(&["d"]).unwrap();
        assert_eq!(writer.as_str(), "a,b,c\nd,,\n");
    }

    #[test]
    fn rejects_row_wider_than_fixed_width() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        writer.write_row(&["a", "b"]).unwrap();
        let err = writer.write_row(&["c", "d", "e"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn write_field_rejects_once_fixed_width_is_reached() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        writer.write_row(&["a"]).unwrap();
        writer.write_field("b").unwrap();
        let err = writer.write_field("c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn unescaped_field_containing_field_delimiter_is_invalid_input() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        let err = writer.write_field("a,b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn unescaped_field_containing_row_delimiter_is_invalid_input() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        let err = writer.write_field("a\nb").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn multi_scalar_field_delimiter_only_escapes_on_the_full_sequence() {
        let config = WriterConfig::default()
            .field_delimiter(Delimiter::try_from("::").unwrap())
            .escape(EscapeStrategy::DOUBLE_QUOTE);
        let mut writer = CsvWriter::to_string_sink(config);
        // Contains one scalar of the delimiter but not the full sequence.
        writer.write_row(&["a:b"]).unwrap();
        assert_eq!(writer.as_str(), "a:b\n");
    }

    #[test]
    fn empty_row_before_width_known_is_invalid_operation() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        let err = writer.write_empty_row().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn always_bom_is_written_once_before_first_scalar() {
        let config = WriterConfig::default().bom(BomStrategy::Always);
        let mut writer = CsvWriter::to_string_sink(config);
        writer.write_row(&["a"]).unwrap();
        writer.write_row(&["b"]).unwrap();
        assert_eq!(writer.as_str(), "\u{feff}a\nb\n");
    }

    #[test]
    fn empty_row_after_width_known_writes_bare_delimiter() {
        let mut writer = CsvWriter::to_string_sink(WriterConfig::default());
        writer.write_row(&["a", "b"]).unwrap();
        writer.write_empty_row().unwrap();
        writer.write_row(&["c", "d"]).unwrap();
        assert_eq!(writer.as_str(), "a,b\n\nc,d\n");
    }

    #[test]
    fn never_bom_is_never_written() {
        let config = WriterConfig::default().bom(BomStrategy::Never);
        let mut writer = CsvWriter::to_string_sink(config);
        writer.write_row(&["a"]).unwrap();
        assert!(!writer.as_str().starts_with('\u{feff}'));
    }
}
