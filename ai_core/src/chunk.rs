//! Splits long text into pieces the synthesis endpoint will accept.
//!
//! The service caps one request at 4096 characters; we split at 4000 to
//! leave headroom. Cuts prefer natural boundaries over mid-word breaks.

/// Character ceiling for one synthesis request.
pub const MAX_CHUNK_CHARS: usize = 4000;

/// Split `text` into chunks of at most `limit` characters.
///
/// While the remaining text exceeds the limit, the first `limit`
/// characters are searched backward for the best boundary, preferring:
/// sentence-ending punctuation followed by a space, then any terminal
/// punctuation, then a newline, then a comma followed by a space, then
/// any space. A boundary only counts if it sits at least 10% of the
/// limit into the remaining text; otherwise the cut is a hard one at the
/// limit. The boundary character stays with the chunk ahead of it.
///
/// Chunks are trimmed and empty ones dropped, so whitespace-only input
/// produces no chunks at all.
pub fn split_for_synthesis(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if limit == 0 {
        return chunks;
    }

    let mut rest = text.trim();
    while !rest.is_empty() {
        if rest.chars().count() <= limit {
            chunks.push(rest.to_string());
            break;
        }

        let cut = split_point(rest, limit);
        let (head, tail) = rest.split_at(cut);
        let head = head.trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail.trim_start();
    }
    chunks
}

/// Byte offset to cut `text` at. The caller guarantees more than `limit`
/// characters remain.
fn split_point(text: &str, limit: usize) -> usize {
    // The window carries one char of lookahead past the last cut
    // position; a sentence ender there needs the character after it
    // to classify.
    let window: Vec<(usize, char)> = text.char_indices().take(limit + 1).collect();
    // Earliest acceptable boundary offset: 10% of the limit into the text.
    let floor = window[limit / 10].0;
    let hard_cut = window[limit].0;

    find_boundary(&window, floor).unwrap_or(hard_cut)
}

/// Backward-search the window for the best boundary, one class at a time.
/// The window's last entry is lookahead only, never a cut candidate.
/// Returns the byte offset just past the boundary character.
fn find_boundary(window: &[(usize, char)], floor: usize) -> Option<usize> {
    let sentence_end = |i: usize| {
        matches!(window[i].1, '.' | '!' | '?')
            && window.get(i + 1).is_some_and(|&(_, c)| c == ' ')
    };
    let terminal = |i: usize| matches!(window[i].1, '.' | '!' | '?' | ';' | ':');
    let newline = |i: usize| window[i].1 == '\n';
    let comma = |i: usize| {
        window[i].1 == ',' && window.get(i + 1).is_some_and(|&(_, c)| c == ' ')
    };
    let space = |i: usize| window[i].1 == ' ';

    let classes: [&dyn Fn(usize) -> bool; 5] =
        [&sentence_end, &terminal, &newline, &comma, &space];

    for is_boundary in classes {
        let hit = (0..window.len() - 1)
            .rev()
            .find(|&i| window[i].0 >= floor && is_boundary(i));
        if let Some(i) = hit {
            let (byte, c) = window[i];
            return Some(byte + c.len_utf8());
        }
    }
    None
}
