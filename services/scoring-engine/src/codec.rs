//! Vector codec
//!
//! Encodes a selection into the canonical `CVSS:4.0/...` string and decodes
//! arbitrary input back into a validated candidate.
//!
//! Decoding walks the input tokens against the catalog's canonical order with
//! a cursor that only moves forward. Input may skip optional metrics but must
//! respect the order and carry every metric of the mandatory prefix. Nothing
//! is written to a selection here: the caller commits the returned
//! [`Candidate`] only once the whole string has been accepted.

use tracing::debug;
use types::catalog::{MetricCatalog, VECTOR_PREFIX};
use types::errors::VectorError;
use types::metric::{MetricDef, NOT_DEFINED};
use types::selection::Selection;

/// Fragment marker carried by deep links
const FRAGMENT_MARKER: char = '#';

/// Encode a selection in canonical order, omitting "not defined" metrics.
pub fn encode(selection: &Selection, catalog: &MetricCatalog) -> String {
    let mut vector = String::from(VECTOR_PREFIX);
    for metric in catalog.metrics() {
        match selection.get(metric.code) {
            Some(value) if value != NOT_DEFINED => {
                vector.push('/');
                vector.push_str(metric.code);
                vector.push(':');
                vector.push_str(value);
            }
            _ => {}
        }
    }
    vector
}

/// Fully validated metric values decoded from a vector string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidate {
    entries: Vec<(&'static str, String)>,
}

impl Candidate {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }

    /// Decoded pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, v)| (*c, v.as_str()))
    }

    /// Write every decoded value into `selection`
    pub fn commit(&self, selection: &mut Selection) {
        selection.apply(self.iter());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of seeking the expected-order cursor to one input key
#[derive(Debug)]
enum MatchState<'c> {
    Scanning,
    Matched(&'c MetricDef),
    Rejected(VectorError),
}

/// Forward-only cursor into the canonical metric order
struct OrderCursor<'c> {
    order: &'c [MetricDef],
    position: usize,
    mandatory: usize,
}

impl<'c> OrderCursor<'c> {
    fn new(catalog: &'c MetricCatalog) -> Self {
        Self {
            order: catalog.metrics(),
            position: 0,
            mandatory: catalog.mandatory_count(),
        }
    }

    /// Advance past omitted entries until `key` is reached.
    ///
    /// Skipping is only legal once the cursor has left the mandatory prefix.
    fn seek(&mut self, key: &str) -> Result<&'c MetricDef, VectorError> {
        loop {
            match self.step(key) {
                MatchState::Scanning => continue,
                MatchState::Matched(metric) => return Ok(metric),
                MatchState::Rejected(err) => return Err(err),
            }
        }
    }

    /// Consume one expected entry
    fn step(&mut self, key: &str) -> MatchState<'c> {
        let Some(expected) = self.order.get(self.position) else {
            return MatchState::Rejected(VectorError::UnexpectedMetric {
                key: key.to_string(),
            });
        };

        self.position += 1;
        if expected.code == key {
            MatchState::Matched(expected)
        } else if self.position <= self.mandatory {
            MatchState::Rejected(VectorError::MissingMandatory {
                expected: expected.code.to_string(),
                found: Some(key.to_string()),
            })
        } else {
            MatchState::Scanning
        }
    }

    /// Check the token stream did not end inside the mandatory prefix
    fn finish(&self) -> Result<(), VectorError> {
        if self.position < self.mandatory {
            return Err(VectorError::MissingMandatory {
                expected: self.order[self.position].code.to_string(),
                found: None,
            });
        }
        Ok(())
    }
}

/// Decode and validate a vector string, optionally prefixed with `#`.
///
/// Returns the decoded values on success. Any error means the whole input is
/// rejected; no partial result is produced.
pub fn decode(input: &str, catalog: &MetricCatalog) -> Result<Candidate, VectorError> {
    let body = input.strip_prefix(FRAGMENT_MARKER).unwrap_or(input);
    let mut tokens = body.split('/');

    match tokens.next() {
        Some(VECTOR_PREFIX) => {}
        other => {
            return Err(VectorError::MalformedPrefix {
                found: other.unwrap_or_default().to_string(),
            })
        }
    }

    let mut cursor = OrderCursor::new(catalog);
    let mut candidate = Candidate::default();

    for token in tokens {
        // Split once: "AV:N:X" yields the value "N:X", which no metric accepts
        let (key, value) = match token.split_once(':') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        let metric = cursor.seek(key)?;

        match value {
            Some(value) if metric.accepts(value) => {
                candidate.entries.push((metric.code, value.to_string()));
            }
            _ => {
                return Err(VectorError::IllegalValue {
                    metric: metric.code.to_string(),
                    value: value.map(str::to_string),
                    allowed: metric.values.iter().map(|v| v.to_string()).collect(),
                })
            }
        }
    }

    cursor.finish()?;

    debug!(metrics = candidate.len(), "Vector decoded");
    Ok(candidate)
}
