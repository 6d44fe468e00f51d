//! Watched-history list
//!
//! One row per entry, input order, each on its own pastel background. Rows
//! fade in by index: entries beyond the reveal counter render dim until
//! their tick arrives.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use marquee_core::model::WatchedEntry;

use super::{truncate_to_width, vertical_center};
use crate::tui::theme::{self, Theme};

pub fn render(
    f: &mut Frame<'_>,
    area: Rect,
    theme: &Theme,
    entries: &[WatchedEntry],
    revealed: usize,
    scroll: usize,
) {
    if entries.is_empty() {
        let message = Paragraph::new(Line::from("No watched movies to display."))
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        f.render_widget(message, vertical_center(area, 1));
        return;
    }

    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let overflowing = entries.len().saturating_sub(scroll) > height;
    let visible_rows = if overflowing { height - 1 } else { height };

    for (row, (index, entry)) in entries
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_rows)
        .enumerate()
    {
        let row_area = Rect {
            x: area.x,
            y: area.y + row as u16,
            width: area.width,
            height: 1,
        };
        let style = if index < revealed {
            Style::default()
                .bg(theme::pastel(&entry.display, index))
                .fg(theme.text)
        } else {
            Style::default().fg(theme.dim).add_modifier(Modifier::DIM)
        };
        let text = truncate_to_width(&format!(" {}", entry.display), area.width as usize);
        f.render_widget(Paragraph::new(Line::from(text)).style(style), row_area);
    }

    if overflowing {
        let remaining = entries.len() - scroll - visible_rows;
        let indicator_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        let indicator = Paragraph::new(Line::from(format!("… {remaining} more (↑↓ to scroll)")))
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        f.render_widget(indicator, indicator_area);
    }
}
