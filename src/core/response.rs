//! Discord message limits and truncation helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add embed field limits and field batching for list cards
//! - 1.0.0: Initial message/embed truncation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field name limit
pub const FIELD_NAME_LIMIT: usize = 256;
/// Discord embed field value limit
pub const FIELD_VALUE_LIMIT: usize = 1024;
/// Maximum number of fields in a single embed
pub const MAX_EMBED_FIELDS: usize = 25;

/// Truncate text to `limit` bytes on a UTF-8 boundary, adding an ellipsis if needed
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit.saturating_sub(3); // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit embed limit, adding ellipsis if needed
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

/// Split a list of embed fields into batches that each fit in one embed.
///
/// An empty list yields a single empty batch so the caller still sends one card.
pub fn batch_fields<T: Clone>(fields: &[T]) -> Vec<Vec<T>> {
    if fields.is_empty() {
        return vec![Vec::new()];
    }
    fields
        .chunks(MAX_EMBED_FIELDS)
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_for_message("short text"), "short text");
    }

    #[test]
    fn test_truncate_for_embed_long() {
        let text = "a".repeat(5000);
        let result = truncate_for_embed(&text);
        assert!(result.len() <= EMBED_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_utf8_safety() {
        let text = "世界".repeat(200);
        let result = truncate_to(&text, FIELD_NAME_LIMIT);
        assert!(result.len() <= FIELD_NAME_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(FIELD_VALUE_LIMIT);
        assert_eq!(truncate_to(&text, FIELD_VALUE_LIMIT), text);
    }

    #[test]
    fn test_batch_fields() {
        let fields: Vec<usize> = (0..60).collect();
        let batches = batch_fields(&fields);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 25);
        assert_eq!(batches[2].len(), 10);
        assert_eq!(batches[2][0], 50);
    }

    #[test]
    fn test_batch_empty() {
        let batches = batch_fields::<usize>(&[]);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].is_empty());
    }
}
