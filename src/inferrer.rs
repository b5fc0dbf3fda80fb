/*!
Dialect inference: trying candidate `(field, row)` pairs against a leading
sample and scoring each by how consistently it partitions the sample into
repeating cell/delimiter patterns.
*/
use hashbrown::HashMap;
use itertools::iproduct;

use crate::config::{EscapeStrategy, HeaderStrategy, ReaderConfig};
use crate::delimiter::{Delimiter, RowDelimiterSet};
use crate::dialect::Dialect;
use crate::error::{CsvCoreError, ErrorKind, Result};
use crate::reader::CsvReader;

const SCORE_EPSILON: f64 = 0.001;

/// Tries every candidate `(field, row)` pair against a sample and returns
/// the best-scoring dialect.
pub struct DelimiterInferrer;

impl DelimiterInferrer {
    /// Scores every candidate pair drawn from `field_candidates` ×
    /// `row_candidates` against `sample`, returning the highest-scoring
    /// dialect. Ties break first on row delimiter set cardinality (fewer
    /// wins), then on total row delimiter scalar length (shorter wins).
    pub fn infer(
        sample: &[char],
        field_candidates: &[Delimiter],
        row_candidates: &[RowDelimiterSet],
        escape: Option<char>,
        trim: &[char],
    ) -> Result<Dialect> {
        if field_candidates.is_empty() || row_candidates.is_empty() {
            return Err(CsvCoreError::new(
                ErrorKind::InvalidConfiguration,
                "inference requires at least one candidate per delimiter slot",
            ));
        }

        let field_candidates = dedup_delimiters(field_candidates);
        let row_candidates = dedup_row_sets(row_candidates);

        let mut best: Option<(Dialect, f64)> = None;
        for (field, row) in iproduct!(field_candidates.iter(), row_candidates.iter()) {
            if field.overlaps_any(row) {
                continue;
            }
            let dialect = Dialect::new(field.clone(), row.clone(), escape);
            let score = match score_dialect(&dialect, sample, trim) {
                Ok(score) => score,
                Err(_) => continue,
            };
            if score <= 0.0 {
                continue;
            }
            best = match best {
                None => Some((dialect, score)),
                Some((current, current_score)) => {
                    if is_better(score, &dialect, current_score, &current) {
                        Some((dialect, score))
                    } else {
                        Some((current, current_score))
                    }
                }
            };
        }

        best.map(|(dialect, _)| dialect).ok_or_else(|| {
            CsvCoreError::new(
                ErrorKind::InferenceFailure,
                "no candidate delimiter pair produced a positive pattern score",
            )
        })
    }
}

trait OverlapsRow {
    fn overlaps_any(&self, row: &RowDelimiterSet) -> bool;
}

impl OverlapsRow for Delimiter {
    fn overlaps_any(&self, row: &RowDelimiterSet) -> bool {
        row.delimiters().iter().any(|d| self.overlaps(d))
    }
}

fn dedup_delimiters(candidates: &[Delimiter]) -> Vec<Delimiter> {
    let mut seen = Vec::new();
    for c in candidates {
        if !seen.contains(c) {
            seen.push(c.clone());
        }
    }
    seen
}

fn dedup_row_sets(candidates: &[RowDelimiterSet]) -> Vec<RowDelimiterSet> {
    let mut seen = Vec::new();
    for c in candidates {
        if !seen.contains(c) {
            seen.push(c.clone());
        }
    }
    seen
}

/// Tokenizes `sample` under `dialect`, reduces each row to a `(cell count,
/// delimiter count)` pattern, and scores the result per
/// `Σ c·max(ε, f-1)/f / num_distinct_patterns`, where `c` is a pattern's
/// occurrence count and `f` its cell count.
fn score_dialect(dialect: &Dialect, sample: &[char], trim: &[char]) -> Result<f64> {
    let text: String = sample.iter().collect();
    let mut config = ReaderConfig::new()
        .field_delimiter(dialect.field.clone())
        .row_delimiter(dialect.row.clone())
        .header(HeaderStrategy::None);
    config = match dialect.escape {
        Some(e) => config.escape(EscapeStrategy::Scalar(e)),
        None => config,
    };
    if !trim.is_empty() {
        config = config.trim(trim.to_vec());
    }

    let mut reader = CsvReader::from_str(&text, config)?;
    let mut patterns: HashMap<(usize, usize), usize> = HashMap::new();

    loop {
        match reader.read_row() {
            None => break,
            Some(Err(_)) => break,
            Some(Ok(fields)) => {
                let cells = fields.len();
                if cells == 0 {
                    continue;
                }
                let delimiters = cells.saturating_sub(1);
                *patterns.entry((cells, delimiters)).or_insert(0) += 1;
            }
        }
    }

    if patterns.is_empty() {
        return Ok(0.0);
    }

    let num_distinct_patterns = patterns.len() as f64;
    let total: f64 = patterns
        .iter()
        .map(|(&(cells, _), &count)| {
            let c = count as f64;
            let f = cells as f64;
            c * (f - 1.0).max(SCORE_EPSILON) / f
        })
        .sum();

    Ok(total / num_distinct_patterns)
}

fn is_better(score: f64, dialect: &Dialect, best_score: f64, best: &Dialect) -> bool {
    if score != best_score {
        return score > best_score;
    }
    let candidate_cardinality = dialect.row.delimiters().len();
    let best_cardinality = best.row.delimiters().len();
    if candidate_cardinality != best_cardinality {
        return candidate_cardinality < best_cardinality;
    }
    dialect.row.total_scalar_len() > best.row.total_scalar_len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_comma_over_semicolon_for_comma_separated_sample() {
        let sample: Vec<char> = "a,b,c\nd,e,f\ng,h,i\n".chars().collect();
        let field_candidates = vec![
            Delimiter::try_from(",").unwrap(),
            Delimiter::try_from(";").unwrap(),
        ];
        let row_candidates = vec![RowDelimiterSet::standard()];
        let dialect =
            DelimiterInferrer::infer(&sample, &field_candidates, &row_candidates, None, &[])
                .unwrap();
        assert_eq!(dialect.field, Delimiter::try_from(",").unwrap());
    }

    #[test]
    fn scores_uniform_pattern_per_documented_formula() {
        // Both rows reduce to the same 3-cell pattern occurring twice, so
        // this is the single-pattern case of `Σ c·max(ε,f−1)/f / num_patterns`:
        // 2 · max(ε,2)/3 / 1 = 4/3.
        let sample: Vec<char> = "7,5; Mon, Jan 12;6,40\n8,0; Tue, Jan 13;7,10\n".chars().collect();
        let dialect = Dialect::new(
            Delimiter::try_from(";").unwrap(),
            RowDelimiterSet::single(Delimiter::try_from("\n").unwrap()),
            None,
        );
        let score = score_dialect(&dialect, &sample, &[]).unwrap();
        assert!((score - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_candidates_is_invalid_configuration() {
        let err = DelimiterInferrer::infer(&[], &[], &[RowDelimiterSet::standard()], None, &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn no_positive_score_is_inference_failure() {
        let sample: Vec<char> = Vec::new();
        let field_candidates = vec![Delimiter::try_from(",").unwrap()];
        let row_candidates = vec![RowDelimiterSet::standard()];
        let err =
            DelimiterInferrer::infer(&sample, &field_candidates, &row_candidates, None, &[])
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InferenceFailure);
    }
}
