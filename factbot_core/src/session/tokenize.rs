/// Split a typed question into tokens: lowercase, drop every `?`, split on
/// whitespace.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    line.replace('?', "")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
