//! Case-insensitive search over model identifiers.

/// Keep the models whose name contains `query`, ignoring case.
///
/// An empty query returns every model. Input order is preserved and an
/// empty result is not an error.
pub fn filter_models<S: AsRef<str>>(models: &[S], query: &str) -> Vec<String> {
    if query.is_empty() {
        return models.iter().map(|m| m.as_ref().to_string()).collect();
    }

    let needle = query.to_lowercase();
    models
        .iter()
        .map(|m| m.as_ref())
        .filter(|m| m.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}
