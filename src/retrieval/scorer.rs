use std::collections::HashSet;

/// Lexical relevance of `text` to `query`, in `[0, 1]`.
///
/// Case-insensitive. A query that appears verbatim inside the text scores `1.0`; otherwise the
/// score blends Jaccard overlap and query coverage of the whitespace-split word sets equally.
/// A query without any non-whitespace character scores `0.0`.
pub fn score(query: &str, text: &str) -> f32 {
    if query.trim().is_empty() || text.is_empty() {
        return 0.0;
    }

    let query_lower = query.to_lowercase();
    let text_lower = text.to_lowercase();

    if text_lower.contains(&query_lower) {
        return 1.0;
    }

    let query_words: HashSet<&str> = query_lower.split_whitespace().collect();
    let text_words: HashSet<&str> = text_lower.split_whitespace().collect();

    if query_words.is_empty() || text_words.is_empty() {
        return 0.0;
    }

    let intersection = query_words.intersection(&text_words).count() as f32;
    let union = query_words.union(&text_words).count() as f32;

    let jaccard = intersection / union;
    let coverage = intersection / query_words.len() as f32;

    0.5 * jaccard + 0.5 * coverage
}
