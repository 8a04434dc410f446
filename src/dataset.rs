use std::collections::{HashMap, HashSet};
use std::fmt;

use phf::{phf_map, phf_set};

use crate::errors::AnalysisError;

/// Tokens read as missing values, matching pandas' `read_csv` defaults.
static NA_VALUES: phf::Set<&'static str> = phf_set! {
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
};

static BOOL_VALUES: phf::Map<&'static str, bool> = phf_map! {
    "True" => true,
    "TRUE" => true,
    "true" => true,
    "False" => false,
    "FALSE" => false,
    "false" => false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    Object,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Object => "object",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int64 | DType::Float64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }
}

/// Renders values in pandas notation (`nan`, `True`, `2.0`, `1e+20`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str("nan"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&float_repr(*v)),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

pub(crate) fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let formatted = format!("{:e}", value);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return formatted;
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing values as floats; empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        if !self.dtype.is_numeric() {
            return vec![];
        }
        self.values.iter().filter_map(Value::as_f64).collect()
    }
}

/// An uploaded CSV file held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(AnalysisError::InvalidCsv(
                "No columns to parse from file".to_string(),
            ));
        }
        let names = column_names(&headers);

        let mut cells: Vec<Vec<Option<String>>> = vec![vec![]; names.len()];
        for record in reader.records() {
            let record = record?;
            if record.len() > names.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(AnalysisError::InvalidCsv(format!(
                    "Expected {} fields in line {}, saw {}",
                    names.len(),
                    line,
                    record.len()
                )));
            }
            for (idx, column) in cells.iter_mut().enumerate() {
                column.push(record.get(idx).map(str::to_string));
            }
        }

        let rows = cells.first().map(Vec::len).unwrap_or_default();
        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        log::debug!("parsed csv: {} rows", rows);

        Ok(Self { columns, rows })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<Vec<(&str, &Value)>> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.as_str(), &c.values[index]))
                .collect(),
        )
    }
}

/// Blank headers become `Unnamed: {i}`, repeats get `.1`, `.2`, ... suffixes.
fn column_names(headers: &csv::StringRecord) -> Vec<String> {
    let mut names = Vec::with_capacity(headers.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let header = if idx == 0 {
            header.trim_start_matches('\u{feff}')
        } else {
            header
        };
        let base = if header.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        if seen.contains(&name) {
            let mut n = counts.get(&base).copied().unwrap_or_default();
            loop {
                n += 1;
                name = format!("{}.{}", base, n);
                if !seen.contains(&name) {
                    break;
                }
            }
            counts.insert(base, n);
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn is_na(cell: &Option<String>) -> bool {
    match cell {
        None => true,
        Some(s) => NA_VALUES.contains(s.as_str()),
    }
}

fn infer_column(name: String, raw: Vec<Option<String>>) -> Column {
    if raw.is_empty() {
        return Column {
            name,
            dtype: DType::Object,
            values: vec![],
        };
    }

    let present: Vec<&str> = raw
        .iter()
        .filter(|cell| !is_na(cell))
        .filter_map(|cell| cell.as_deref())
        .collect();
    let has_missing = present.len() < raw.len();

    let dtype = if present.is_empty() {
        DType::Float64
    } else if present.iter().all(|s| s.trim().parse::<i64>().is_ok()) {
        if has_missing { DType::Float64 } else { DType::Int64 }
    } else if present.iter().all(|s| s.trim().parse::<f64>().is_ok()) {
        DType::Float64
    } else if !has_missing && present.iter().all(|s| BOOL_VALUES.contains_key(*s)) {
        DType::Bool
    } else {
        DType::Object
    };

    let values = raw
        .into_iter()
        .map(|cell| {
            if is_na(&cell) {
                return Value::Missing;
            }
            let cell = cell.unwrap_or_default();
            match dtype {
                DType::Int64 => cell.trim().parse().map(Value::Int).unwrap_or(Value::Missing),
                DType::Float64 => cell
                    .trim()
                    .parse()
                    .map(Value::Float)
                    .unwrap_or(Value::Missing),
                DType::Bool => BOOL_VALUES
                    .get(cell.as_str())
                    .map(|b| Value::Bool(*b))
                    .unwrap_or(Value::Missing),
                DType::Object => Value::Text(cell),
            }
        })
        .collect();

    Column {
        name,
        dtype,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(csv: &str) -> Dataset {
        Dataset::from_csv_bytes(csv.as_bytes()).expect("csv should parse")
    }

    #[rstest]
    #[case("x\n1\n2\n3\n", DType::Int64)]
    #[case("x\n1\nNA\n3\n", DType::Float64)]
    #[case("x\n1.5\n2\n-3e2\n", DType::Float64)]
    #[case("x\nTrue\nfalse\nTRUE\n", DType::Bool)]
    #[case("x\nTrue\nNA\n", DType::Object)]
    #[case("x\napple\n2\n", DType::Object)]
    #[case("x,y\nNA,1\nnull,2\n", DType::Float64)]
    fn test_dtype_inference(#[case] csv: &str, #[case] expected: DType) {
        let dataset = parse(csv);
        assert_eq!(dataset.columns()[0].dtype, expected);
    }

    #[test]
    fn test_header_only_is_object_with_zero_rows() {
        let dataset = parse("a,b,c\n");
        assert_eq!(dataset.rows(), 0);
        assert_eq!(dataset.cols(), 3);
        assert!(dataset.columns().iter().all(|c| c.dtype == DType::Object));
        assert!(dataset.row(0).is_none());
    }

    #[test]
    fn test_missing_counts_and_padding() {
        let dataset = parse("a,b,c\n1,,x\n2,3\n");
        let missing: Vec<usize> = dataset.columns().iter().map(Column::missing_count).collect();
        assert_eq!(missing, vec![0, 1, 1]);
        assert_eq!(dataset.columns()[1].dtype, DType::Float64);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let dataset = parse("a,a,,a\n1,2,3,4\n");
        let names: Vec<&str> = dataset.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let dataset = parse("\u{feff}id,name\n1,x\n");
        assert_eq!(dataset.columns()[0].name, "id");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Dataset::from_csv_bytes(b"").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCsv(_)));
        assert_eq!(err.to_string(), "Invalid CSV: No columns to parse from file");
    }

    #[test]
    fn test_too_many_fields_is_rejected() {
        let err = Dataset::from_csv_bytes(b"a,b\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCsv(_)));
        assert!(err.to_string().contains("Expected 2 fields in line 3, saw 3"));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = Dataset::from_csv_bytes(b"a,b\n\xff\xfe,1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCsv(_)));
    }

    #[test]
    fn test_first_row_values() {
        let dataset = parse("id,score,label,ok\n7,2.50,cat,true\n");
        let row = dataset.row(0).unwrap();
        let rendered: Vec<(String, String)> = row
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("id".to_string(), "7".to_string()),
                ("score".to_string(), "2.5".to_string()),
                ("label".to_string(), "cat".to_string()),
                ("ok".to_string(), "True".to_string()),
            ]
        );
    }

    #[rstest]
    #[case(3.0, "3.0")]
    #[case(0.1, "0.1")]
    #[case(-2.25, "-2.25")]
    #[case(1e20, "1e+20")]
    #[case(1.5e-5, "1.5e-05")]
    #[case(0.0001, "0.0001")]
    #[case(f64::NAN, "nan")]
    #[case(f64::NEG_INFINITY, "-inf")]
    fn test_float_repr(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(float_repr(value), expected);
    }
}
