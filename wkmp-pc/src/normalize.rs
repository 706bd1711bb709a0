//! Title normalization used for cross-table matching

/// Normalize a title for lookups
///
/// Lowercases, replaces every non-alphanumeric character with a space and
/// collapses runs of whitespace. An all-punctuation title normalizes to "".
pub fn normalize_title(title: &str) -> String {
    let lowered: String = title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}
