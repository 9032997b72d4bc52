// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;

/// Flatten generated HTML into plain text for console display.
///
/// Entities are decoded, block-level tags become line breaks, all remaining
/// tags are stripped, and blank lines are collapsed. The stored note keeps
/// the raw HTML; this is presentation only.
pub fn plain_text(html: &str) -> String {
    let decoded = decode_html_entities(html).to_string();

    let block_re = Regex::new(r"</?(p|div|br|li|ul|ol|h[1-6])[^>]*>").unwrap();
    let with_newlines = block_re.replace_all(&decoded, "\n").into_owned();

    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let no_tags = tag_re.replace_all(&with_newlines, "").into_owned();

    no_tags
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
