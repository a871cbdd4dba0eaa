//! Text fitting for Discord limits
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Generic `truncate` shared by embeds and eval output capture
//! - 1.0.0: Line-aware chunking

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord limit for command names and descriptions
pub const COMMAND_DESCRIPTION_LIMIT: usize = 100;

/// Chunk text into pieces no longer than `max_size` bytes (UTF-8 safe, line-aware)
///
/// Splits at line boundaries when possible and falls back to character
/// splitting for lines longer than the limit.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line_with_newline = format!("{line}\n");
        if current.len() + line_with_newline.len() > max_size {
            if !current.is_empty() {
                chunks.push(current.trim_end().to_string());
                current = String::new();
            }
            if line_with_newline.len() > max_size {
                chunks.extend(chunk_long_line(line, max_size));
            } else {
                current = line_with_newline;
            }
        } else {
            current.push_str(&line_with_newline);
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

fn chunk_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            result.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Cut `text` to at most `max_size` bytes on a char boundary, marking the cut with "..."
pub fn truncate(text: &str, max_size: usize) -> String {
    if text.len() <= max_size {
        return text.to_string();
    }
    let mut end = max_size.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit the embed description limit
pub fn truncate_for_embed(text: &str) -> String {
    truncate(text, EMBED_LIMIT)
}
