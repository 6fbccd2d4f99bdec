use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Maximum visible width of any output line.
pub const MAX_LINE_WIDTH: usize = 100;

/// Marker that replaces the tail of truncated content.
pub const ELLIPSIS: &str = "...";

/// Visible width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Split `s` at the last char boundary whose prefix fits in `width` columns.
pub fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            return s.split_at(idx);
        }
        used += w;
    }
    (s, "")
}

/// Like [`split_at_width`], but always consumes at least one char.
fn split_chunk(s: &str, width: usize) -> (&str, &str) {
    let (head, tail) = split_at_width(s, width);
    if head.is_empty() && !s.is_empty() {
        let first = s.chars().next().map_or(s.len(), char::len_utf8);
        return s.split_at(first);
    }
    (head, tail)
}

/// Keep the first `keep` columns of `s` and append [`ELLIPSIS`].
pub fn truncate_with_ellipsis(s: &str, keep: usize) -> String {
    let (head, _) = split_at_width(s, keep);
    format!("{head}{ELLIPSIS}")
}

/// Wrap `text` to [`MAX_LINE_WIDTH`], given that `offset` columns of the
/// current line are already used.
///
/// Returns the wrapped text and the column the last line ends at. The last
/// line is not terminated. Words are split on whitespace; a word wider than
/// the whole line is hard-split into full-width chunks. A word that would
/// make the line reach the limit exactly is moved to the next line.
pub fn wrap_text(text: &str, offset: usize) -> (String, usize) {
    if text.is_empty() {
        return (String::new(), offset);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut line = String::new();
    let mut line_len = offset;
    let mut words = text.split_whitespace().peekable();

    if line_len >= MAX_LINE_WIDTH && words.peek().is_some() {
        out.push('\n');
        line_len = 0;
    }

    for word in words {
        let word_len = display_width(word);

        if word_len > MAX_LINE_WIDTH {
            if line_len > 0 {
                out.push_str(&line);
                out.push('\n');
                line.clear();
            }
            let mut rest = word;
            while display_width(rest) > MAX_LINE_WIDTH {
                let (chunk, tail) = split_chunk(rest, MAX_LINE_WIDTH);
                out.push_str(chunk);
                out.push('\n');
                rest = tail;
            }
            line.push_str(rest);
            line_len = display_width(rest);
            continue;
        }

        let sep = usize::from(!line.is_empty());
        if line_len + sep + word_len >= MAX_LINE_WIDTH {
            if line_len > 0 {
                out.push_str(&line);
                out.push('\n');
            }
            line.clear();
            line.push_str(word);
            line_len = word_len;
        } else {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_len += sep + word_len;
        }
    }

    out.push_str(&line);
    (out, line_len)
}
