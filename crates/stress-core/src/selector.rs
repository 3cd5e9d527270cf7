//! Weighted random statement selection.

use crate::error::StressError;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A weighted collection of SQL statements.
///
/// `draw` picks a statement with probability proportional to its weight in
/// O(log n) per call. The RNG is seeded from the OS once at construction;
/// statistical quality, not cryptographic strength, is what matters here.
pub struct WeightedChoice {
    statements: Vec<String>,
    index: WeightedIndex<u64>,
    rng: StdRng,
}

impl WeightedChoice {
    /// Build a selector from `(statement, weight)` pairs.
    ///
    /// Fails if the set is empty, any weight is zero, or any statement text
    /// is blank.
    pub fn load(entries: Vec<(String, u64)>) -> Result<Self, StressError> {
        if entries.is_empty() {
            return Err(StressError::InvalidInput(
                "no statements provided".to_string(),
            ));
        }
        for (statement, weight) in &entries {
            if statement.trim().is_empty() {
                return Err(StressError::InvalidInput(
                    "empty statement text".to_string(),
                ));
            }
            if *weight == 0 {
                return Err(StressError::InvalidInput(format!(
                    "statement {statement:?} has weight 0, weights must be positive"
                )));
            }
        }

        let weights: Vec<u64> = entries.iter().map(|(_, w)| *w).collect();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| StressError::InvalidInput(e.to_string()))?;
        let statements = entries.into_iter().map(|(s, _)| s).collect();

        Ok(Self {
            statements,
            index,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Parse `statement;weight` lines into entries suitable for [`load`].
    ///
    /// Exactly one `;` per line; the weight is a non-negative integer after
    /// trimming. Any malformed line is an error (line numbers are 1-based).
    ///
    /// [`load`]: WeightedChoice::load
    pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<(String, u64)>, StressError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let parts: Vec<&str> = line.split(';').collect();
            if parts.len() != 2 {
                return Err(StressError::MalformedLine {
                    line: line_no,
                    reason: "expected exactly one ';' separating statement and weight".to_string(),
                });
            }
            let weight: u64 =
                parts[1]
                    .trim()
                    .parse()
                    .map_err(|_| StressError::MalformedLine {
                        line: line_no,
                        reason: format!("weight {:?} is not a non-negative integer", parts[1]),
                    })?;
            entries.push((parts[0].to_string(), weight));
        }
        Ok(entries)
    }

    /// Draw one statement, biased by weight.
    pub fn draw(&mut self) -> &str {
        let i = self.index.sample(&mut self.rng);
        &self.statements[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_respects_weights() {
        let mut wc = WeightedChoice::load(vec![
            ("select a".to_string(), 1),
            ("select b".to_string(), 3),
        ])
        .unwrap();

        let mut b_count = 0;
        for _ in 0..10_000 {
            if wc.draw() == "select b" {
                b_count += 1;
            }
        }
        // Expected 7500 draws of b; allow a generous +/-10% band.
        assert!(
            (6_750..=8_250).contains(&b_count),
            "b drawn {b_count} times out of 10000"
        );
    }

    #[test]
    fn load_rejects_empty_set() {
        assert!(matches!(
            WeightedChoice::load(vec![]),
            Err(StressError::InvalidInput(_))
        ));
    }

    #[test]
    fn load_rejects_zero_weight() {
        let res = WeightedChoice::load(vec![
            ("select 1".to_string(), 1),
            ("select 2".to_string(), 0),
        ]);
        assert!(matches!(res, Err(StressError::InvalidInput(_))));
    }

    #[test]
    fn load_rejects_blank_statement() {
        let res = WeightedChoice::load(vec![("   ".to_string(), 5)]);
        assert!(matches!(res, Err(StressError::InvalidInput(_))));
    }

    #[test]
    fn parse_lines_accepts_trimmed_weights() {
        let entries =
            WeightedChoice::parse_lines(["select 1; 10 ", "select 2;3"]).unwrap();
        assert_eq!(
            entries,
            vec![
                ("select 1".to_string(), 10),
                ("select 2".to_string(), 3)
            ]
        );
    }

    #[test]
    fn parse_lines_rejects_missing_separator() {
        let err = WeightedChoice::parse_lines(["select 1"]).unwrap_err();
        assert!(matches!(err, StressError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn parse_lines_rejects_extra_separator() {
        let err = WeightedChoice::parse_lines(["select 1; select 2;3"]).unwrap_err();
        assert!(matches!(err, StressError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn parse_lines_rejects_bad_weight() {
        let err = WeightedChoice::parse_lines(["select 1;x"]).unwrap_err();
        assert!(matches!(err, StressError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn zero_weight_parses_but_fails_load() {
        let entries = WeightedChoice::parse_lines(["select 1;0"]).unwrap();
        assert!(WeightedChoice::load(entries).is_err());
    }
}
