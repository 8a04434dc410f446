use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::{Map, Value as JsonValue, json};

use crate::consts;
use crate::dataset::{Column, DType, Dataset, Value, float_repr};

const STAT_LABELS: [&str; 7] = ["mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SummaryOptions {
    pub max_columns: usize,
    pub max_value_chars: usize,
    pub max_numeric_columns: usize,
    /// Hard cap on the whole summary, ellipsis included.
    pub max_chars: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_columns: consts::SUMMARY_MAX_COLUMNS,
            max_value_chars: consts::SUMMARY_MAX_VALUE_CHARS,
            max_numeric_columns: consts::SUMMARY_MAX_NUMERIC_COLUMNS,
            max_chars: consts::SUMMARY_MAX_CHARS,
        }
    }
}

/// Builds the compact, single-line JSON description of a dataset that is fed
/// to the first agent.
///
/// Keys are emitted in a fixed order: `rows`, `cols`, `columns`, `dtypes`,
/// `missing`, `sample`, `numeric_stats`. When the serialized text is longer
/// than `max_chars` it is cut and terminated with `...`, which can leave the
/// JSON unbalanced. Non-ASCII characters are written as `\uXXXX` escapes
/// and count toward `max_chars` in that form.
pub fn build_csv_summary(dataset: &Dataset, options: &SummaryOptions) -> String {
    let shown = &dataset.columns()[..dataset.cols().min(options.max_columns)];

    let mut columns: Vec<JsonValue> = shown.iter().map(|c| json!(c.name)).collect();
    if dataset.cols() > options.max_columns {
        columns.push(json!(consts::ELLIPSIS));
    }

    let dtypes: Map<String, JsonValue> = shown
        .iter()
        .map(|c| (c.name.clone(), json!(c.dtype.as_str())))
        .collect();

    let missing: Map<String, JsonValue> = shown
        .iter()
        .filter_map(|c| match c.missing_count() {
            0 => None,
            count => Some((c.name.clone(), json!(count))),
        })
        .collect();

    // A row of an all-numeric frame with any float column is read back as floats.
    let upcast_ints = dataset.columns().iter().all(|c| c.dtype.is_numeric())
        && dataset.columns().iter().any(|c| c.dtype == DType::Float64);

    let sample: Map<String, JsonValue> = dataset
        .row(0)
        .map(|row| {
            row.into_iter()
                .take(options.max_columns)
                .map(|(name, value)| {
                    let text = sample_text(value, upcast_ints);
                    (
                        name.to_string(),
                        json!(truncate_chars(&text, options.max_value_chars)),
                    )
                })
                .collect::<Map<String, JsonValue>>()
        })
        .unwrap_or_default();

    let numeric_stats: Map<String, JsonValue> = dataset
        .columns()
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .take(options.max_numeric_columns)
        .map(|c| (c.name.clone(), numeric_preview(c, options.max_value_chars)))
        .collect();

    let summary = json!({
        "rows": dataset.rows(),
        "cols": dataset.cols(),
        "columns": columns,
        "dtypes": dtypes,
        "missing": missing,
        "sample": sample,
        "numeric_stats": numeric_stats,
    });

    cap_length(to_ascii_json(&summary), options.max_chars)
}

fn sample_text(value: &Value, upcast_ints: bool) -> String {
    match value {
        Value::Int(v) if upcast_ints => float_repr(*v as f64),
        other => other.to_string(),
    }
}

/// Compact JSON formatter that escapes every non-ASCII character as
/// `\uXXXX`, using surrogate pairs outside the basic plane.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn to_ascii_json(value: &JsonValue) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
    if let Err(e) = value.serialize(&mut serializer) {
        log::warn!("ascii serialization failed, falling back to raw JSON: {}", e);
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

fn numeric_preview(column: &Column, max_value_chars: usize) -> JsonValue {
    let stats = describe(&column.numeric_values());
    let preview: Map<String, JsonValue> = STAT_LABELS
        .iter()
        .zip(stats)
        .map(|(label, value)| {
            let text = float_repr(round3(value));
            (
                label.to_string(),
                json!(truncate_chars(&text, max_value_chars)),
            )
        })
        .collect();
    JsonValue::Object(preview)
}

/// mean, sample std, min, quartiles (linear interpolation), max.
fn describe(values: &[f64]) -> [f64; 7] {
    if values.is_empty() {
        return [f64::NAN; 7];
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        f64::NAN
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    [
        mean,
        std,
        sorted[0],
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
        sorted[sorted.len() - 1],
    ]
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn round3(value: f64) -> f64 {
    if value.is_finite() {
        (value * 1000.0).round_ties_even() / 1000.0
    } else {
        value
    }
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn cap_length(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    if max_chars < consts::ELLIPSIS.len() {
        return truncate_chars(&text, max_chars).to_string();
    }
    let keep = max_chars - consts::ELLIPSIS.len();
    format!("{}{}", truncate_chars(&text, keep), consts::ELLIPSIS)
}
