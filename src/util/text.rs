use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Remove the last grapheme cluster (what Backspace deletes).
pub fn pop_grapheme(s: &mut String) {
    if let Some((idx, _)) = s.grapheme_indices(true).next_back() {
        s.truncate(idx);
    }
}

/// Truncate to at most `max_cells` cells, appending `…` when shortened.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Truncate or right-pad with spaces to exactly `cells` cells.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    if w < cells {
        out.push_str(&" ".repeat(cells - w));
    }
    out
}
