use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::outcome::normalize_line;

/// Label to weight, in payload order.
pub type Histogram = IndexMap<String, f64>;

/// What to do when two payload labels normalize to the same canonical label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateLabels {
    /// The later entry replaces the earlier weight; the key keeps its first position.
    #[default]
    Overwrite,
    /// Weights of colliding labels are summed.
    Accumulate,
}

#[derive(Debug, Deserialize)]
struct ExecutionResponse {
    #[serde(rename = "Histogram")]
    histogram: Vec<Value>,
}

/// Best-effort extraction: any [`ParseError`] is logged and yields an empty histogram.
pub fn extract_histogram(raw: &str, duplicates: DuplicateLabels) -> Histogram {
    match try_extract_histogram(raw, duplicates) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(error.kind = "response.parse", error.message = %e, "discarding runner response");
            Histogram::new()
        }
    }
}

/// Locates the JSON object between the first `{` and the last `}` and decodes its `Histogram`.
///
/// Output without any `{` is not an error: the runner simply printed no payload.
pub fn try_extract_histogram(
    raw: &str,
    duplicates: DuplicateLabels,
) -> Result<Histogram, ParseError> {
    let Some(from) = raw.find('{') else {
        tracing::debug!("runner output carries no json payload");
        return Ok(Histogram::new());
    };
    let to = match raw.rfind('}') {
        Some(to) if to > from => to,
        _ => return Err(ParseError::MissingPayloadEnd),
    };

    let response: ExecutionResponse =
        serde_json::from_str(&raw[from..=to]).map_err(ParseError::InvalidJson)?;

    let mut out = Histogram::with_capacity(response.histogram.len() / 2);
    for (pair_idx, pair) in response.histogram.chunks(2).enumerate() {
        let index = pair_idx * 2;
        let (label, weight) = match pair {
            [Value::String(label), Value::Number(n)] => match n.as_f64() {
                Some(w) => (label, w),
                None => {
                    skip_entry(index);
                    continue;
                }
            },
            _ => {
                skip_entry(index);
                continue;
            }
        };

        let key = normalize_line(label);
        match duplicates {
            DuplicateLabels::Overwrite => {
                out.insert(key, weight);
            }
            DuplicateLabels::Accumulate => {
                *out.entry(key).or_insert(0.0) += weight;
            }
        }
    }

    Ok(out)
}

fn skip_entry(index: usize) {
    let e = ParseError::MalformedEntry { index };
    tracing::warn!(error.kind = "response.entry", error.message = %e, "skipping histogram entry");
}
