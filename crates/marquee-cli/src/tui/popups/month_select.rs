//! Month selection popup
//!
//! The original front end's month dropdown: "All months" plus the fixed
//! 14-month window. Selecting an entry re-scopes and reloads the current
//! view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use marquee_core::model::{MONTH_COUNT, MONTH_LABELS};

use super::common::{center_rect, popup_block, render_popup_background};
use crate::tui::theme::Theme;

const ALL_MONTHS_LABEL: &str = "All months";

/// Month selection popup state. Entry 0 is "All months"; entries 1..=14 are
/// the month labels.
pub struct MonthSelectPopup {
    selected: usize,
    scroll_offset: usize,
}

impl MonthSelectPopup {
    /// Open with the current selection highlighted.
    pub fn new(current: Option<u8>) -> Self {
        let mut popup = Self {
            selected: current.map(|m| m as usize).unwrap_or(0),
            scroll_offset: 0,
        };
        popup.ensure_visible(Self::DEFAULT_VISIBLE);
        popup
    }

    const DEFAULT_VISIBLE: usize = 10;

    fn entry_count() -> usize {
        MONTH_COUNT as usize + 1
    }

    pub fn next(&mut self) {
        if self.selected + 1 < Self::entry_count() {
            self.selected += 1;
        }
        self.ensure_visible(Self::DEFAULT_VISIBLE);
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_visible(Self::DEFAULT_VISIBLE);
    }

    /// The month the highlight is on; `None` means "All months".
    pub fn selection(&self) -> Option<u8> {
        if self.selected == 0 {
            None
        } else {
            Some(self.selected as u8)
        }
    }

    fn ensure_visible(&mut self, visible_height: usize) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

    fn entry_label(index: usize) -> &'static str {
        if index == 0 {
            ALL_MONTHS_LABEL
        } else {
            MONTH_LABELS[index - 1]
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, theme: &Theme) {
        let area = center_rect(34, 16, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(3),    // List
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Select Month",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let visible_height = chunks[1].height as usize;
        let mut lines: Vec<Line<'_>> = Vec::new();
        let visible_end = (self.scroll_offset + visible_height).min(Self::entry_count());
        for index in self.scroll_offset..visible_end {
            let is_selected = index == self.selected;
            let prefix = if is_selected { "  ▶ " } else { "    " };
            let style = if is_selected {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, Self::entry_label(index)),
                style,
            )));
        }
        f.render_widget(Paragraph::new(lines), chunks[1]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(
                "↑↓",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": nav  ", Style::default().fg(theme.text)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": select  ", Style::default().fg(theme.text)),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": cancel", Style::default().fg(theme.text)),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(footer, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_on_all_months_by_default() {
        let popup = MonthSelectPopup::new(None);
        assert_eq!(popup.selection(), None);
    }

    #[test]
    fn test_opens_on_current_month() {
        let popup = MonthSelectPopup::new(Some(14));
        assert_eq!(popup.selection(), Some(14));
    }

    #[test]
    fn test_next_walks_into_months() {
        let mut popup = MonthSelectPopup::new(None);
        popup.next();
        assert_eq!(popup.selection(), Some(1));
    }

    #[test]
    fn test_next_clamps_at_last_month() {
        let mut popup = MonthSelectPopup::new(Some(14));
        popup.next();
        assert_eq!(popup.selection(), Some(14));
    }

    #[test]
    fn test_prev_clamps_at_all_months() {
        let mut popup = MonthSelectPopup::new(None);
        popup.prev();
        assert_eq!(popup.selection(), None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut popup = MonthSelectPopup::new(None);
        for _ in 0..14 {
            popup.next();
        }
        assert_eq!(popup.selection(), Some(14));
        assert!(popup.scroll_offset > 0);
    }
}
