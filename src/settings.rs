/*!
The validated `(field, row)` delimiter pair a tokenizer runs against, plus
the disjointness checks that keep matching unambiguous.
*/
use crate::delimiter::{Delimiter, RowDelimiterSet};
use crate::error::{CsvCoreError, ErrorKind, Result};

/// A field delimiter and row delimiter set that have been checked for
/// prefix-disjointness against one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitersPair {
    field: Delimiter,
    row: RowDelimiterSet,
}

impl DelimitersPair {
    /// Validates that `field` and every member of `row` are pairwise
    /// prefix-disjoint, and builds the pair if so.
    pub fn new(field: Delimiter, row: RowDelimiterSet) -> Result<Self> {
        for row_delim in row.delimiters() {
            if field.overlaps(row_delim) {
                return Err(CsvCoreError::new(
                    ErrorKind::InvalidConfiguration,
                    "field delimiter and row delimiter must not be prefixes of one another",
                )
                .with("field_delimiter", &field)
                .with("row_delimiter", row_delim));
            }
        }
        Ok(DelimitersPair { field, row })
    }

    /// The field delimiter.
    pub fn field(&self) -> &Delimiter {
        &self.field
    }

    /// The row delimiter set.
    pub fn row(&self) -> &RowDelimiterSet {
        &self.row
    }

    /// Validates that `escape` does not occur inside any delimiter scalar.
    pub fn validate_escape(&self, escape: char) -> Result<()> {
        let collides = self.field.contains_scalar(escape)
            || self.row.delimiters().iter().any(|d| d.contains_scalar(escape));
        if collides {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidConfiguration,
                "escape scalar collides with a configured delimiter",
            )
            .with("escape", escape));
        }
        Ok(())
    }

    /// Validates that no scalar in `trim` occurs inside any delimiter, nor
    /// equals `escape`.
    pub fn validate_trim(&self, trim: &[char], escape: Option<char>) -> Result<()> {
        for &t in trim {
            let collides = self.field.contains_scalar(t)
                || self.row.delimiters().iter().any(|d| d.contains_scalar(t))
                || escape == Some(t);
            if collides {
                return Err(CsvCoreError::new(
                    ErrorKind::InvalidConfiguration,
                    "trim scalar collides with a configured delimiter or the escape scalar",
                )
                .with("trim_scalar", t));
            }
        }
        Ok(())
    }
}
