use std::collections::BTreeSet;

/// Lowercases OCR output and splits it on whitespace into a token set.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
