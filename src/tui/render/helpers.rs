use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;
use crate::util::unicode;

/// Draw a filled button with its label centered
pub(super) fn render_button(frame: &mut Frame, theme: &Theme, area: Rect, label: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let style = Style::default()
        .fg(theme.button_fg)
        .bg(theme.button_bg)
        .add_modifier(Modifier::BOLD);
    let text = centered_line(label, area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style))).style(style),
        area,
    );
}

/// `text` padded with spaces so it sits centered in `width` cells,
/// truncated when it does not fit
pub(super) fn centered_line(text: &str, width: usize) -> String {
    let text = unicode::truncate_to_width(text, width);
    let left = unicode::centered_offset(&text, width);
    let right = width.saturating_sub(left + unicode::display_width(&text));
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_line_pads_both_sides() {
        assert_eq!(centered_line("Save", 10), "   Save   ");
        assert_eq!(centered_line("Edit", 5), "Edit ");
        assert_eq!(centered_line("Delete", 3), "De\u{2026}");
    }

    #[test]
    fn spans_width_sums_cells() {
        let spans = vec![Span::raw("ab"), Span::raw("日本")];
        assert_eq!(spans_width(&spans), 6);
    }
}
