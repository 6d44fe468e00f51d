//! Loading skeletons
//!
//! Eight placeholder cards shown while a request is in flight, with a
//! two-shade shimmer driven by the tick counter.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use super::grid_cells;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame<'_>, area: Rect, theme: &Theme, ticks: u64) {
    for (i, cell) in grid_cells(area).into_iter().enumerate() {
        let shade = if (ticks / 3 + i as u64) % 2 == 0 {
            theme.skeleton
        } else {
            theme.skeleton_alt
        };
        let card = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(shade));
        f.render_widget(card, cell);
    }
}
