use scalar_csv::config::{EscapeStrategy, ReaderConfig};
use scalar_csv::delimiter::Delimiter;
use scalar_csv::reader::CsvReader;

#[test]
fn multi_byte_scalars_are_treated_as_single_content_units() {
    let mut reader = CsvReader::from_str("café,日本語,emoji🎉\n", ReaderConfig::default()).unwrap();
    assert_eq!(
        reader.read_row().unwrap().unwrap(),
        vec!["café", "日本語", "emoji🎉"]
    );
}

#[test]
fn non_ascii_scalar_can_be_configured_as_the_field_delimiter() {
    let config = ReaderConfig::default().field_delimiter(Delimiter::try_from("→").unwrap());
    let mut reader = CsvReader::from_str("a→b→c\n", config).unwrap();
    assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn escaped_field_preserves_multi_byte_content_verbatim() {
    let config = ReaderConfig::default().escape(EscapeStrategy::DOUBLE_QUOTE);
    let mut reader = CsvReader::from_str("\"héllo, wörld\",b\n", config).unwrap();
    assert_eq!(
        reader.read_row().unwrap().unwrap(),
        vec!["héllo, wörld", "b"]
    );
}
