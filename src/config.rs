/*!
Configuration surfaces: the small enumerations and builder-style config
structs that select header, escape, trim, BOM and inference behavior for a
reader or writer.
*/
use crate::delimiter::{Delimiter, RowDelimiterSet};

/// Either a concrete value for a delimiter slot, or a list of candidates the
/// inferrer should choose among.
#[derive(Debug, Clone)]
pub enum InferenceOption<T> {
    /// Use this delimiter, skipping inference for this slot.
    Use(T),
    /// Infer the delimiter for this slot from these candidates.
    Infer(Vec<T>),
}

impl<T> InferenceOption<T> {
    pub fn is_infer(&self) -> bool {
        matches!(self, InferenceOption::Infer(_))
    }
}

/// Whether the first row read is a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStrategy {
    #[default]
    None,
    FirstLine,
}

/// The field-escaping character, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeStrategy {
    #[default]
    None,
    Scalar(char),
}

impl EscapeStrategy {
    /// The conventional CSV escape: a double quote.
    pub const DOUBLE_QUOTE: EscapeStrategy = EscapeStrategy::Scalar('"');

    pub(crate) fn resolve(self) -> Option<char> {
        match self {
            EscapeStrategy::None => None,
            EscapeStrategy::Scalar(c) => Some(c),
        }
    }
}

/// Whether a writer emits a byte-order-mark scalar before its first write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BomStrategy {
    /// Defer to the target encoding's convention. Byte-encoding is an
    /// external collaborator (see crate docs), so this core treats
    /// `Convention` as a no-op.
    #[default]
    Convention,
    Always,
    Never,
}

/// The default field-delimiter inference candidates: comma, semicolon, tab.
pub fn default_field_candidates() -> Vec<Delimiter> {
    [",", ";", "\t"]
        .iter()
        .map(|s| Delimiter::try_from(*s).expect("non-empty literal"))
        .collect()
}

/// The default row-delimiter inference candidates: `"\n"` and `"\r\n"`,
/// each as its own single-element candidate (inference only exercises
/// multi-alternative row delimiter sets when the caller passes one
/// explicitly).
pub fn default_row_candidates() -> Vec<RowDelimiterSet> {
    vec![
        RowDelimiterSet::single(Delimiter::try_from("\n").expect("non-empty literal")),
        RowDelimiterSet::single(Delimiter::try_from("\r\n").expect("non-empty literal")),
    ]
}

/// Configuration for a [`crate::reader::CsvReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub(crate) field: InferenceOption<Delimiter>,
    pub(crate) row: InferenceOption<RowDelimiterSet>,
    pub(crate) escape: EscapeStrategy,
    pub(crate) header: HeaderStrategy,
    pub(crate) trim: Vec<char>,
    pub(crate) sample_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            field: InferenceOption::Use(Delimiter::try_from(",").expect("non-empty literal")),
            row: InferenceOption::Use(RowDelimiterSet::standard()),
            escape: EscapeStrategy::None,
            header: HeaderStrategy::None,
            trim: Vec::new(),
            sample_size: 500,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        ReaderConfig::default()
    }

    /// Use a concrete field delimiter.
    pub fn field_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.field = InferenceOption::Use(delimiter);
        self
    }

    /// Infer the field delimiter from `candidates`.
    pub fn infer_field_delimiter(mut self, candidates: Vec<Delimiter>) -> Self {
        self.field = InferenceOption::Infer(candidates);
        self
    }

    /// Infer the field delimiter from the default candidates (`,`, `;`, tab).
    pub fn infer_field_delimiter_default(self) -> Self {
        self.infer_field_delimiter(default_field_candidates())
    }

    /// Use a concrete row delimiter set.
    pub fn row_delimiter(mut self, row: RowDelimiterSet) -> Self {
        self.row = InferenceOption::Use(row);
        self
    }

    /// Infer the row delimiter from `candidates`.
    pub fn infer_row_delimiter(mut self, candidates: Vec<RowDelimiterSet>) -> Self {
        self.row = InferenceOption::Infer(candidates);
        self
    }

    /// Infer the row delimiter from the default candidates (`\n`, `\r\n`).
    pub fn infer_row_delimiter_default(self) -> Self {
        self.infer_row_delimiter(default_row_candidates())
    }

    pub fn escape(mut self, escape: EscapeStrategy) -> Self {
        self.escape = escape;
        self
    }

    pub fn header(mut self, header: HeaderStrategy) -> Self {
        self.header = header;
        self
    }

    pub fn trim(mut self, trim: impl Into<Vec<char>>) -> Self {
        self.trim = trim.into();
        self
    }

    /// The size of the leading sample examined during inference, in
    /// scalars. Defaults to 500.
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }
}

/// Configuration for a [`crate::writer::CsvWriter`].
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub(crate) field: Delimiter,
    pub(crate) row: Delimiter,
    pub(crate) escape: EscapeStrategy,
    pub(crate) bom: BomStrategy,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            field: Delimiter::try_from(",").expect("non-empty literal"),
            row: Delimiter::try_from("\n").expect("non-empty literal"),
            escape: EscapeStrategy::None,
            bom: BomStrategy::Convention,
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        WriterConfig::default()
    }

    pub fn field_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.field = delimiter;
        self
    }

    /// The single delimiter written at the end of each row. Unlike the
    /// reader's `RowDelimiterSet`, a writer always commits to one concrete
    /// terminator.
    pub fn row_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.row = delimiter;
        self
    }

    pub fn escape(mut self, escape: EscapeStrategy) -> Self {
        self.escape = escape;
        self
    }

    pub fn bom(mut self, bom: BomStrategy) -> Self {
        self.bom = bom;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reader_config_uses_comma_and_standard_row_set() {
        let config = ReaderConfig::default();
        assert!(!config.field.is_infer());
        assert!(!config.row.is_infer());
    }

    #[test]
    fn default_field_candidates_match_spec() {
        let candidates = default_field_candidates();
        let rendered: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![",", ";", "\t"]);
    }
}
