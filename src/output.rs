// Output formatting — terminal display helpers.

use colored::Colorize;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Print the inferred topic labels as a numbered list.
pub fn display_topics(topics: &[String]) {
    if topics.is_empty() {
        println!("{}", "No topics identified.".dimmed());
        return;
    }

    println!("\n{}", "=== Topics ===".bold());
    for (i, topic) in topics.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, topic.bold());
    }
    println!();
}
