/*!
A streaming, Unicode-scalar CSV tokenizer, writer and dialect inferrer.

This crate works over an abstract source of Unicode scalars (`char`), not
bytes: byte-encoding detection and decoding happen upstream of it. This
keeps the tokenizer's rules (delimiter matching, escaping, trimming,
row-width enforcement) independent of any particular text encoding.

# Overview

[`reader::CsvReader`] reads rows from anything implementing
[`reader::ScalarSource`] (a blanket impl covers any `char` iterator).
[`writer::CsvWriter`] writes rows to anything implementing
[`writer::ScalarSink`] (covering `String` and, via [`writer::IoSink`], any
[`std::io::Write`]). [`inferrer::DelimiterInferrer`] chooses a field and
row delimiter for a reader when the caller doesn't already know them.

# Example

```
use scalar_csv::config::ReaderConfig;
use scalar_csv::reader::CsvReader;

let mut reader = CsvReader::from_str("a,b,c\n1,2,3\n", ReaderConfig::default())
    .expect("valid configuration");
while let Some(row) = reader.read_row() {
    let row = row.expect("well-formed row");
    println!("{row:?}");
}
```

# Dialect inference

```
use scalar_csv::config::ReaderConfig;
use scalar_csv::reader::CsvReader;

let config = ReaderConfig::new()
    .infer_field_delimiter_default()
    .infer_row_delimiter_default();
let mut reader = CsvReader::from_str("a;b;c\n1;2;3\n", config).expect("a dialect was found");
assert_eq!(reader.read_row().unwrap().unwrap(), vec!["a", "b", "c"]);
```
*/

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod delimiter;
pub mod dialect;
pub mod error;
pub mod inferrer;
pub mod matcher;
pub mod reader;
pub mod sample;
pub mod settings;
pub mod writer;

pub use config::{BomStrategy, EscapeStrategy, HeaderStrategy, ReaderConfig, WriterConfig};
pub use delimiter::{Delimiter, RowDelimiterSet};
pub use dialect::Dialect;
pub use error::{CsvCoreError, ErrorKind, Result};
pub use inferrer::DelimiterInferrer;
pub use reader::{CsvReader, ReaderStatus, ScalarSource};
pub use writer::{CsvWriter, IoSink, ScalarSink};
