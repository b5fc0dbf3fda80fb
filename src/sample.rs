/*!
Sampling: pulling a bounded prefix of scalars from a source for dialect
inference, generalized from the reference crate's byte-oriented line
sampling (`SampleIter`/`SampleSize`) to a Unicode-scalar source.
*/
use crate::error::Result;
use crate::reader::ScalarSource;

/// Pulls up to `max_scalars` scalars from `source`, stopping early at end of
/// input. Used both to build the leading sample handed to the inferrer and,
/// via `ScalarBuffer::push_all`, to restore that sample once a dialect has
/// been chosen.
pub fn take_sample<S: ScalarSource>(source: &mut S, max_scalars: usize) -> Result<Vec<char>> {
    let mut sample = Vec::with_capacity(max_scalars.min(4096));
    for _ in 0..max_scalars {
        match source.next_scalar()? {
            Some(c) => sample.push(c),
            None => break,
        }
    }
    Ok(sample)
}
