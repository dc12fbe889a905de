use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// The longest suffix of `s` that fits in `max_cells`, prefixed with `…`
/// when anything was cut. Keeps the end of a long input line visible.
pub fn tail_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells.saturating_sub(1);
    let mut width = 0;
    let mut kept: Vec<&str> = Vec::new();
    for grapheme in s.graphemes(true).rev() {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        kept.push(grapheme);
    }
    let mut result = String::from("\u{2026}");
    result.extend(kept.into_iter().rev());
    result
}

/// Left offset that centers `s` in `box_cells` cells. Zero when it does
/// not fit.
pub fn centered_offset(s: &str, box_cells: usize) -> usize {
    box_cells.saturating_sub(display_width(s)) / 2
}

/// Remove the last grapheme cluster from `s`. Returns false when empty.
pub fn pop_grapheme(s: &mut String) -> bool {
    let last_start = s.grapheme_indices(true).next_back().map(|(i, _)| i);
    match last_start {
        Some(start) => {
            s.truncate(start);
            true
        }
        None => false,
    }
}

fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── display_width ──────────────────────────────────────────────

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_cjk() {
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn display_width_tab() {
        assert_eq!(display_width("a\tb"), 6);
    }

    #[test]
    fn display_width_empty() {
        assert_eq!(display_width(""), 0);
    }

    // ── truncation ─────────────────────────────────────────────────

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // 3 cells of budget cannot hold two wide chars
        assert_eq!(truncate_to_width("日本語", 4), "日\u{2026}");
    }

    #[test]
    fn truncate_zero_and_one() {
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail_to_width("hello", 10), "hello");
        assert_eq!(tail_to_width("hello world", 6), "\u{2026}world");
        assert_eq!(tail_to_width("hello", 0), "");
    }

    // ── centering ──────────────────────────────────────────────────

    #[test]
    fn centered_offset_splits_slack() {
        assert_eq!(centered_offset("Save", 10), 3);
        assert_eq!(centered_offset("Save", 4), 0);
        assert_eq!(centered_offset("too long", 3), 0);
        assert_eq!(centered_offset("日本", 8), 2);
    }

    // ── editing ────────────────────────────────────────────────────

    #[test]
    fn pop_ascii() {
        let mut s = String::from("abc");
        assert!(pop_grapheme(&mut s));
        assert_eq!(s, "ab");
    }

    #[test]
    fn pop_combining_sequence_as_one() {
        let mut s = String::from("ae\u{0301}");
        assert!(pop_grapheme(&mut s));
        assert_eq!(s, "a");
    }

    #[test]
    fn pop_empty() {
        let mut s = String::new();
        assert!(!pop_grapheme(&mut s));
    }
}
