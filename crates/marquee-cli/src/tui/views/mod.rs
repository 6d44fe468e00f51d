//! Content-area rendering
//!
//! Pure functions from state to widgets. The app decides which of these to
//! call from the current view state; nothing in here mutates anything.

pub mod grid;
pub mod skeleton;
pub mod watched;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::theme::Theme;

/// The single user-facing message for any fetch or decode failure.
pub const ERROR_MESSAGE: &str = "Error loading movies.";

/// Cells for the 4x2 recommendation grid, row-major.
pub fn grid_cells(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let mut cells = Vec::with_capacity(8);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(*row);
        cells.extend(cols.iter().copied());
    }
    cells
}

/// Truncate to a display width, appending `…` when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Idle hint shown before the first load completes.
pub fn render_idle(f: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from("marquee"),
        Line::from(""),
        Line::from("w: watched history   r: recommendations   m: pick month   q: quit"),
    ];
    let hint = Paragraph::new(lines)
        .style(Style::default().fg(theme.dim))
        .alignment(Alignment::Center);
    f.render_widget(hint, area);
}

/// Failure state: the container shows exactly [`ERROR_MESSAGE`].
pub fn render_failure(f: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let message = Paragraph::new(Line::from(ERROR_MESSAGE))
        .style(Style::default().fg(theme.error))
        .alignment(Alignment::Center);
    let centered = vertical_center(area, 1);
    f.render_widget(message, centered);
}

/// A rect of `height` lines vertically centered in `area`.
pub fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_has_eight_cells() {
        let cells = grid_cells(Rect::new(0, 0, 80, 20));
        assert_eq!(cells.len(), 8);
    }

    #[test]
    fn test_grid_cells_do_not_overlap() {
        let cells = grid_cells(Rect::new(0, 0, 80, 20));
        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                assert!(a.intersection(*b).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
    }

    #[test]
    fn test_truncate_cuts_and_marks() {
        let out = truncate_to_width("The Grand Budapest Hotel", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }

    #[test]
    fn test_truncate_handles_wide_chars() {
        let out = truncate_to_width("千と千尋の神隠し", 6);
        assert!(out.width() <= 6);
        assert!(out.ends_with('…'));
    }
}
