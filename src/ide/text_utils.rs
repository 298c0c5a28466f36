//! Text manipulation utilities for working with ORCA input lines.

/// Check if a character is part of an ORCA word.
///
/// Besides identifier characters (Unicode Standard Annex #31) keyword and
/// basis-set names use `-`, `+`, `*`, `(`, `)`, `/` and `.`, as in
/// `def2-TZVP`, `6-31+G*`, `CCSD(T)` or `def2/J`.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || matches!(c, '-' | '+' | '*' | '(' | ')' | '/' | '.')
}

/// Zone markers that may be glued to the first word of a line.
#[inline]
fn is_marker(c: char) -> bool {
    matches!(c, '!' | '%' | '*')
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the word start
/// and `end` is the character index after the last word character.
/// Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() || !is_word_character(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }
    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    // `*xyz` or `%scf`: the marker belongs to the line, not the word
    while start < end && start == first_non_space(chars) && is_marker(chars[start]) {
        start += 1;
    }
    (start < end && position >= start).then_some((start, end))
}

fn first_non_space(chars: &[char]) -> usize {
    chars
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(chars.len())
}

/// Extract the word at the cursor position in a line of text.
///
/// # Example
/// ```
/// use orca::ide::text_utils::extract_word_at_cursor;
///
/// let line = "! B3LYP def2-TZVP";
/// assert_eq!(extract_word_at_cursor(line, 10), Some("def2-TZVP".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 1), None);
/// ```
pub fn extract_word_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let (start, end) = find_word_boundaries(&chars, position)?;
    Some(chars[start..end].iter().collect())
}

/// The partial word left of the cursor and the column it starts at.
///
/// A zone marker at the start of the line is not part of the prefix, so
/// `%sc` yields `sc`. The column is clamped to the line length.
pub fn word_prefix(line: &str, column: usize) -> (usize, String) {
    let chars: Vec<char> = line.chars().take(column).collect();
    let mut start = chars.len();
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }
    let first = first_non_space(&chars);
    while start < chars.len() && start == first && is_marker(chars[start]) {
        start += 1;
    }
    (start, chars[start..].iter().collect())
}
