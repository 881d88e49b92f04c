//! Comma-separated label editing helpers.

/// Separator used when rendering labels into the editor field.
pub const LABEL_SEPARATOR: &str = ", ";

/// Parse the labels editor text into a label list.
///
/// - Splits on `,`.
/// - Trims whitespace around each token.
/// - Drops empty tokens.
/// - Preserves input order (no deduplication or sorting).
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a label list as editor text (`"a, b"`).
pub fn format_labels(labels: &[String]) -> String {
    labels.join(LABEL_SEPARATOR)
}
