//! Column-width text wrapping for notification rows.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Greedily wrap `text` into lines no wider than `width` columns.
///
/// Breaks on word boundaries where possible; a single word wider than the
/// whole line is split on grapheme boundaries. Always returns at least one
/// line. `width` must be positive (checked by the builder).
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for piece in text.split_word_bounds() {
        let piece_width = piece.width();

        if current_width + piece_width <= width {
            current.push_str(piece);
            current_width += piece_width;
            continue;
        }

        if !current.is_empty() {
            flush_line(&mut lines, &mut current);
            current_width = 0;
        }

        // whitespace that caused the break is dropped, not carried over
        if piece.trim().is_empty() {
            continue;
        }

        if piece_width <= width {
            current.push_str(piece);
            current_width = piece_width;
        } else {
            for grapheme in piece.graphemes(true) {
                let grapheme_width = grapheme
                    .chars()
                    .map(|c| c.width().unwrap_or(0))
                    .sum::<usize>();
                if current_width + grapheme_width > width && !current.is_empty() {
                    flush_line(&mut lines, &mut current);
                    current_width = 0;
                }
                current.push_str(grapheme);
                current_width += grapheme_width;
            }
        }
    }

    if !current.trim_end().is_empty() {
        flush_line(&mut lines, &mut current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    lines.push(std::mem::take(current).trim_end().to_string());
}
