use scalar_csv::config::{EscapeStrategy, HeaderStrategy, ReaderConfig};
use scalar_csv::delimiter::{Delimiter, RowDelimiterSet};
use scalar_csv::error::ErrorKind;
use scalar_csv::reader::CsvReader;

#[test]
fn reads_comma_separated_rows_with_header() {
    let config = ReaderConfig::default().header(HeaderStrategy::FirstLine);
    let mut reader = CsvReader::from_str("name,age\nAda,36\nGrace,85\n", config).unwrap();
    assert_eq!(reader.headers(), &["name".to_string(), "age".to_string()]);
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["Ada", "36"]);
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["Grace", "85"]);
    assert!(reader.read_row().is_none());
}

#[test]
fn multi_scalar_field_delimiter_is_matched_atomically() {
    let config = ReaderConfig::default().field_delimiter(Delimiter::try_from("::").unwrap());
    let mut reader = CsvReader::from_str("a::b::c\n", config).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn single_colon_is_not_mistaken_for_double_colon_delimiter() {
    let config = ReaderConfig::default().field_delimiter(Delimiter::try_from("::").unwrap());
    let mut reader = CsvReader::from_str("a:b::c\n", config).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a:b", "c"]);
}

#[test]
fn both_lf_and_crlf_are_accepted_within_the_standard_row_set() {
    let mut reader =
        CsvReader::from_str("a,b\r\nc,d\ne,f\r\n", ReaderConfig::default()).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a", "b"]);
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["c", "d"]);
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["e", "f"]);
}

#[test]
fn row_width_is_fixed_by_the_first_row_and_then_enforced() {
    let mut reader = CsvReader::from_str("a,b,c\nd,e\n", ReaderConfig::default()).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a", "b", "c"]);
    let err = reader.read_row().unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn sticky_failure_repeats_the_same_error_on_further_reads() {
    let mut reader = CsvReader::from_str("a\nb,c\n", ReaderConfig::default()).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a"]);
    let first = reader.read_row().unwrap().unwrap_err().to_string();
    let second = reader.read_row().unwrap().unwrap_err().to_string();
    let third = reader.read_row().unwrap().unwrap_err().to_string();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn overlapping_field_and_row_delimiters_are_rejected_at_construction() {
    let config = ReaderConfig::default()
        .field_delimiter(Delimiter::try_from("--").unwrap())
        .row_delimiter(RowDelimiterSet::single(Delimiter::try_from("--").unwrap()));
    let err = CsvReader::from_str("a--b\n", config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn row_delimiter_as_prefix_of_field_delimiter_is_rejected() {
    let config = ReaderConfig::default()
        .field_delimiter(Delimiter::try_from("**").unwrap())
        .row_delimiter(RowDelimiterSet::single(Delimiter::try_from("**~").unwrap()));
    let err = CsvReader::from_str("a**b\n", config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn escape_scalar_colliding_with_field_delimiter_is_rejected() {
    let config = ReaderConfig::default()
        .field_delimiter(Delimiter::try_from(",").unwrap())
        .escape(EscapeStrategy::Scalar(','));
    let err = CsvReader::from_str("a,b\n", config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn trim_scalar_colliding_with_delimiter_is_rejected() {
    let config = ReaderConfig::default().trim(vec![',']);
    let err = CsvReader::from_str("a, b\n", config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}
