use lingua_types::Language;

/// Prepend the synthetic auto entry so pickers that allow it can match
/// "auto"/"Auto-detect" with the same substring rule as real languages.
pub fn with_auto(languages: &[Language]) -> Vec<Language> {
    let mut items = Vec::with_capacity(languages.len() + 1);
    items.push(Language::auto());
    items.extend_from_slice(languages);
    items
}

/// Case-insensitive substring filter over display name or code. An empty
/// or whitespace query returns the input unchanged, in original order.
pub fn filter(query: &str, items: &[Language]) -> Vec<Language> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&q) || l.code.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

/// Display name for a code, falling back to the code itself.
pub fn display_name(code: &str, items: &[Language]) -> String {
    items
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| code.to_string())
}
