//! Markdown cleanup before speech synthesis.
//!
//! Note bodies are markdown; read verbatim they produce "asterisk
//! asterisk" artifacts. This pass strips formatting while keeping the
//! words. Line breaks survive; the synthesis splitter treats them as
//! boundaries.

/// Strip markdown syntax from `text`, leaving plain speakable prose.
/// Fenced code blocks are dropped entirely; everything else keeps its
/// visible text.
pub fn clean_for_speech(text: &str) -> String {
    let mut kept = Vec::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        kept.push(clean_line(line));
    }

    // Collapse runs of blank lines left behind by stripped blocks.
    let mut out: Vec<String> = Vec::with_capacity(kept.len());
    let mut last_blank = false;
    for line in kept {
        let blank = line.is_empty();
        if blank && last_blank {
            continue;
        }
        out.push(line);
        last_blank = blank;
    }
    out.join("\n").trim().to_string()
}

fn clean_line(line: &str) -> String {
    let mut rest = line.trim();

    while let Some(stripped) = rest.strip_prefix('>') {
        rest = stripped.trim_start();
    }
    if rest.starts_with('#') {
        rest = rest.trim_start_matches('#').trim_start();
    }
    rest = strip_list_marker(rest);

    let cleaned = strip_links(rest)
        .replace("**", "")
        .replace('*', "")
        .replace("__", "")
        .replace('_', "")
        .replace("~~", "")
        .replace('`', "");
    collapse_spaces(&cleaned)
}

fn strip_list_marker(line: &str) -> &str {
    for marker in ["- ", "* ", "+ "] {
        if let Some(stripped) = line.strip_prefix(marker) {
            return stripped.trim_start();
        }
    }
    // Ordered lists: "12. item"
    if let Some(dot) = line.find(". ") {
        if dot > 0 && line[..dot].chars().all(|c| c.is_ascii_digit()) {
            return line[dot + 2..].trim_start();
        }
    }
    line
}

/// Replace `[text](url)` and `![alt](url)` with their visible text.
fn strip_links(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    while i < chars.len() {
        let is_image = chars[i] == '!' && chars.get(i + 1) == Some(&'[');
        let open = if is_image { i + 1 } else { i };
        if chars.get(open) == Some(&'[') {
            if let Some((close, end)) = link_span(&chars, open) {
                for &c in &chars[open + 1..close] {
                    out.push(c);
                }
                i = end + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Indexes of the `]` and the final `)` of a link starting at `open`,
/// if the rest of the line completes one.
fn link_span(chars: &[char], open: usize) -> Option<(usize, usize)> {
    let close = (open + 1..chars.len()).find(|&j| chars[j] == ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = (close + 2..chars.len()).find(|&j| chars[j] == ')')?;
    Some((close, end))
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last_space = false;
    for c in line.chars() {
        if c == ' ' || c == '\t' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean_for_speech("Buy milk tomorrow."), "Buy milk tomorrow.");
    }

    #[test]
    fn fenced_code_is_dropped() {
        let text = "Before\n```rust\nlet x = 1;\n```\nAfter";
        assert_eq!(clean_for_speech(text), "Before\nAfter");
    }

    #[test]
    fn headings_lose_their_markers() {
        assert_eq!(clean_for_speech("## Meeting notes\nAttendees"), "Meeting notes\nAttendees");
    }

    #[test]
    fn links_keep_their_text() {
        assert_eq!(
            clean_for_speech("See [the docs](https://example.com) first."),
            "See the docs first."
        );
    }

    #[test]
    fn images_keep_their_alt_text() {
        assert_eq!(clean_for_speech("![whiteboard photo](img/board.png)"), "whiteboard photo");
    }

    #[test]
    fn emphasis_and_inline_code_keep_their_content() {
        assert_eq!(
            clean_for_speech("**bold** and _em_ and ~~old~~ and `cargo doc`"),
            "bold and em and old and cargo doc"
        );
    }

    #[test]
    fn list_markers_are_stripped() {
        assert_eq!(clean_for_speech("- one\n* two\n+ three\n12. twelve"), "one\ntwo\nthree\ntwelve");
    }

    #[test]
    fn blockquotes_lose_their_markers() {
        assert_eq!(clean_for_speech("> > nested quote"), "nested quote");
    }

    #[test]
    fn whitespace_collapses_but_line_breaks_survive() {
        assert_eq!(clean_for_speech("a   b\t c\n\n\n\nnext"), "a b c\n\nnext");
    }

    #[test]
    fn pure_markup_cleans_to_empty() {
        assert_eq!(clean_for_speech("```\ncode only\n```"), "");
    }
}
