/*!
Delimiter values: non-empty Unicode scalar sequences recognized atomically
wherever a field or row boundary may occur.
*/
use std::fmt;

use crate::error::{CsvCoreError, ErrorKind, Result};

/// A non-empty, ordered sequence of Unicode scalars.
///
/// Equality and hashing are by scalar sequence. Delimiters are created at
/// configuration time and are immutable from then on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter(Vec<char>);

impl Delimiter {
    /// Builds a delimiter from a non-empty scalar sequence.
    pub fn new(scalars: impl Into<Vec<char>>) -> Result<Self> {
        let scalars = scalars.into();
        if scalars.is_empty() {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidConfiguration,
                "a delimiter must contain at least one scalar",
            ));
        }
        Ok(Delimiter(scalars))
    }

    /// The scalars making up this delimiter, in order.
    pub fn scalars(&self) -> &[char] {
        &self.0
    }

    /// Number of scalars in this delimiter.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A `Delimiter` is never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first scalar, used as the cheap dispatch key in matching.
    pub fn first(&self) -> char {
        self.0[0]
    }

    /// `true` if `self` is a prefix of `other`, or vice versa.
    pub fn overlaps(&self, other: &Delimiter) -> bool {
        let (shorter, longer) = if self.0.len() <= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        longer.starts_with(shorter.as_slice())
    }

    /// `true` if `scalar` occurs anywhere in this delimiter.
    pub fn contains_scalar(&self, scalar: char) -> bool {
        self.0.contains(&scalar)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Delimiter {
    type Error = CsvCoreError;

    fn try_from(s: &str) -> Result<Self> {
        Delimiter::new(s.chars().collect::<Vec<_>>())
    }
}

impl TryFrom<char> for Delimiter {
    type Error = CsvCoreError;

    fn try_from(c: char) -> Result<Self> {
        Delimiter::new(vec![c])
    }
}

/// A non-empty set of delimiters, any of which terminates a row.
///
/// A single-element set is the common case; a multi-element set lets a
/// reader accept, say, both `"\n"` and `"\r\n"` as row terminators in the
/// same stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDelimiterSet(Vec<Delimiter>);

impl RowDelimiterSet {
    /// Builds a row delimiter set from a non-empty list of delimiters.
    pub fn new(delimiters: impl Into<Vec<Delimiter>>) -> Result<Self> {
        let delimiters = delimiters.into();
        if delimiters.is_empty() {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidConfiguration,
                "a row delimiter set must contain at least one delimiter",
            ));
        }
        Ok(RowDelimiterSet(delimiters))
    }

    /// A set containing exactly one delimiter.
    pub fn single(delimiter: Delimiter) -> Self {
        RowDelimiterSet(vec![delimiter])
    }

    /// The set `{"\n", "\r\n"}`, recognizing both Unix and Windows line
    /// endings in the same stream.
    pub fn standard() -> Self {
        RowDelimiterSet(vec![
            Delimiter::new(vec!['\n']).expect("non-empty"),
            Delimiter::new(vec!['\r', '\n']).expect("non-empty"),
        ])
    }

    /// The delimiters making up this set.
    pub fn delimiters(&self) -> &[Delimiter] {
        &self.0
    }

    /// Sum of scalar lengths across all delimiters in the set, used as a
    /// tie-breaker during dialect inference.
    pub fn total_scalar_len(&self) -> usize {
        self.0.iter().map(Delimiter::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_delimiter() {
        let err = Delimiter::new(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn overlaps_is_symmetric_prefix_test() {
        let short = Delimiter::try_from("-").unwrap();
        let long = Delimiter::try_from("--").unwrap();
        assert!(short.overlaps(&long));
        assert!(long.overlaps(&short));

        let unrelated = Delimiter::try_from(";").unwrap();
        assert!(!short.overlaps(&unrelated));
    }

    #[test]
    fn standard_row_set_has_lf_and_crlf() {
        let set = RowDelimiterSet::standard();
        assert_eq!(set.delimiters().len(), 2);
        assert_eq!(set.total_scalar_len(), 3);
    }
}
