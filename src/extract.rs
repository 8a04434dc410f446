use std::sync::LazyLock;

use regex::Regex;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:python)?\s*(.*?)```").expect("code block pattern is valid")
});

/// Returns the last fenced block of `text`, or all of it when there is none.
pub fn extract_code(text: &str) -> String {
    CODE_BLOCK
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|block| block.as_str().trim().to_string())
        .unwrap_or_else(|| text.trim().to_string())
}
