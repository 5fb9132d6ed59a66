//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints built
//! from the error context.

use std::collections::HashSet;

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
///
/// Falls back to the static suggestion of `code` when the context carries
/// nothing useful.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::CategoryNotFound => suggest_category_not_found(context),
        ErrorCode::SearchUnknownCategory => suggest_unknown_category(context),
        ErrorCode::ValidationFailed => suggest_validation_failed(context),
        ErrorCode::ConfigNotFound => suggest_config_not_found(context),
        _ => code.suggestion().to_string(),
    }
}

fn suggest_category_not_found(context: Option<&Value>) -> String {
    match context_str(context, "category_id") {
        Some(id) => format!(
            "Category '{id}' not found. Run `skillmatrix categories` to list category IDs"
        ),
        None => ErrorCode::CategoryNotFound.suggestion().to_string(),
    }
}

fn suggest_unknown_category(context: Option<&Value>) -> String {
    let Some(tag) = context_str(context, "tag") else {
        return ErrorCode::SearchUnknownCategory.suggestion().to_string();
    };
    let known: Vec<&str> = context
        .and_then(|c| c.get("known"))
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let similar = suggest_similar(tag, &known, 3);
    if similar.is_empty() {
        format!(
            "No skill is tagged '{tag}'. Use `all` or run `skillmatrix categories` to list tags"
        )
    } else {
        format!("No skill is tagged '{tag}'. Did you mean: {}?", similar.join(", "))
    }
}

fn suggest_validation_failed(context: Option<&Value>) -> String {
    let errors = context
        .and_then(|c| c.get("errors"))
        .and_then(Value::as_array);
    let origin = context_str(context, "origin");

    match (origin, errors) {
        (Some(origin), Some(errs)) if !errs.is_empty() => format!(
            "{origin} has {} validation problem(s). Fix each one, then run `skillmatrix validate {origin}`",
            errs.len()
        ),
        _ => ErrorCode::ValidationFailed.suggestion().to_string(),
    }
}

fn suggest_config_not_found(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "No config file at '{path}'. Check the --config flag and SKILLMATRIX_CONFIG"
        ),
        None => ErrorCode::ConfigNotFound.suggestion().to_string(),
    }
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

/// Rank `available` by trigram similarity to `query`, best first.
pub fn suggest_similar(query: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<_> = available
        .iter()
        .map(|s| (s, similarity_score(&query_lower, &s.to_lowercase())))
        .filter(|(_, score)| *score > 0.3)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(s, _)| (*s).to_string())
        .collect()
}

/// Jaccard similarity of character trigrams.
fn similarity_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_trigrams: HashSet<_> = trigrams(a).collect();
    let b_trigrams: HashSet<_> = trigrams(b).collect();

    if a_trigrams.is_empty() || b_trigrams.is_empty() {
        // Short strings: prefix/substring check instead
        if a.starts_with(b) || b.starts_with(a) {
            return 0.8;
        }
        if a.contains(b) || b.contains(a) {
            return 0.5;
        }
        return 0.0;
    }

    let intersection = a_trigrams.intersection(&b_trigrams).count();
    let union = a_trigrams.union(&b_trigrams).count();

    #[allow(clippy::cast_precision_loss)]
    let score = intersection as f64 / union as f64;
    score
}

fn trigrams(s: &str) -> impl Iterator<Item = &str> {
    (0..s.len().saturating_sub(2)).filter_map(move |i| s.get(i..i + 3))
}
