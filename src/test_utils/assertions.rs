use serde_json::Value;

pub const SUMMARY_KEYS: [&str; 7] = [
    "rows",
    "cols",
    "columns",
    "dtypes",
    "missing",
    "sample",
    "numeric_stats",
];

pub fn assert_summary_keys(summary: &Value) {
    let keys: Vec<&str> = summary
        .as_object()
        .expect("summary should be a JSON object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, SUMMARY_KEYS);
}
