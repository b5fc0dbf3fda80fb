/*!
Delimiter matching: given a scalar already pulled by the caller, decide
whether a delimiter begins there, consuming lookahead from the buffer or the
decoder and restoring it on a mismatch.
*/
use crate::buffer::ScalarBuffer;
use crate::delimiter::{Delimiter, RowDelimiterSet};
use crate::error::Result;

/// Pulls the next scalar, preferring anything already pushed back over the
/// decoder.
pub fn pull(
    buffer: &mut ScalarBuffer,
    decode: &mut impl FnMut() -> Result<Option<char>>,
) -> Result<Option<char>> {
    if let Some(c) = buffer.next() {
        return Ok(Some(c));
    }
    decode()
}

/// Does `delimiter` begin at `s`?
///
/// `s` has already been consumed by the caller. On a `false` result, every
/// scalar pulled here has been restored to `buffer` in original order,
/// leaving the caller free to treat `s` as ordinary content.
pub fn matches_delimiter(
    s: char,
    delimiter: &Delimiter,
    buffer: &mut ScalarBuffer,
    decode: &mut impl FnMut() -> Result<Option<char>>,
) -> Result<bool> {
    let scalars = delimiter.scalars();
    if scalars[0] != s {
        return Ok(false);
    }
    if scalars.len() == 1 {
        return Ok(true);
    }
    if scalars.len() == 2 {
        return match pull(buffer, decode)? {
            Some(next) if next == scalars[1] => Ok(true),
            Some(next) => {
                buffer.push(next);
                Ok(false)
            }
            None => Ok(false),
        };
    }

    let mut pulled = Vec::with_capacity(scalars.len() - 1);
    for &expected in &scalars[1..] {
        match pull(buffer, decode)? {
            Some(next) if next == expected => pulled.push(next),
            Some(mismatch) => {
                pulled.push(mismatch);
                buffer.push_all(&pulled);
                return Ok(false);
            }
            None => {
                buffer.push_all(&pulled);
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Does some row delimiter in `row` begin at `s`?
///
/// Tries the candidates that start with `s`, longest first, reusing
/// lookahead pulled for a longer candidate when trying a shorter one. On
/// overall mismatch all lookahead is restored to `buffer` and `false` is
/// returned, leaving `s` for the caller to treat as content.
pub fn matches_row_delimiter(
    s: char,
    row: &RowDelimiterSet,
    buffer: &mut ScalarBuffer,
    decode: &mut impl FnMut() -> Result<Option<char>>,
) -> Result<bool> {
    let delimiters = row.delimiters();
    if delimiters.len() == 1 {
        return matches_delimiter(s, &delimiters[0], buffer, decode);
    }

    let mut candidates: Vec<&Delimiter> = delimiters.iter().filter(|d| d.first() == s).collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut lookahead: Vec<char> = Vec::new();
    for candidate in candidates {
        let needed = candidate.len() - 1;
        while lookahead.len() < needed {
            match pull(buffer, decode)? {
                Some(c) => lookahead.push(c),
                None => break,
            }
        }
        if lookahead.len() >= needed && candidate.scalars()[1..] == lookahead[..needed] {
            if lookahead.len() > needed {
                buffer.push_all(&lookahead[needed..]);
            }
            return Ok(true);
        }
    }
    buffer.push_all(&lookahead);
    Ok(false)
}
