// Output formatting: human-readable gate verdicts for the terminal.

pub mod terminal;

/// Format a 0..1 score as a percentage with one decimal, e.g. `23.4%`.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so it never panics on CJK text or emoji.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
