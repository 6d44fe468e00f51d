//! Recommendation card grid
//!
//! Up to eight cards in a 4x2 grid. Cards appear one per tick, replaying
//! the original front end's per-index stagger. The poster area is a colored
//! placeholder block; the terminal never fetches the image, so the original's
//! image-failure fallback is the default presentation here.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use marquee_core::model::Movie;

use super::{grid_cells, truncate_to_width, vertical_center};
use crate::tui::theme::{self, Theme};

pub fn render(f: &mut Frame<'_>, area: Rect, theme: &Theme, movies: &[Movie], revealed: usize) {
    if movies.is_empty() {
        render_no_data(f, area, theme);
        return;
    }
    let cells = grid_cells(area);
    for (movie, cell) in movies.iter().take(revealed).zip(cells) {
        render_card(f, cell, theme, movie);
    }
}

fn render_card(f: &mut Frame<'_>, cell: Rect, theme: &Theme, movie: &Movie) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(cell);
    f.render_widget(block, cell);
    if inner.height < 4 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Poster placeholder
            Constraint::Length(1), // Title
            Constraint::Length(1), // Genres
            Constraint::Length(1), // Rating
        ])
        .split(inner);

    let poster = Paragraph::new(Line::from(truncate_to_width(
        &movie.name,
        chunks[0].width as usize,
    )))
    .style(
        Style::default()
            .bg(theme::poster_color(&movie.name))
            .fg(theme.bg)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    f.render_widget(
        Paragraph::new("").style(Style::default().bg(theme::poster_color(&movie.name))),
        chunks[0],
    );
    f.render_widget(poster, vertical_center(chunks[0], 1));

    let width = chunks[1].width as usize;
    let title = Paragraph::new(Line::from(truncate_to_width(&movie.name, width))).style(
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, chunks[1]);

    let genres = Paragraph::new(Line::from(truncate_to_width(&movie.genres.join(", "), width)))
        .style(Style::default().fg(theme.dim));
    f.render_widget(genres, chunks[2]);

    if let Some(rating) = movie.rating {
        let rating = Paragraph::new(Line::from(format!("★ {rating:.1}")))
            .style(Style::default().fg(theme.warning));
        f.render_widget(rating, chunks[3]);
    }
}

/// Empty result set: not an error, a designed no-data card.
fn render_no_data(f: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let width = area.width.min(46);
    let height = area.height.min(7);
    let card_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(card_area);
    f.render_widget(block, card_area);

    let lines = vec![
        Line::styled(
            "Not Enough Data",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Sorry! There's not enough data to generate recommendations for this month.",
            Style::default().fg(theme.text),
        ),
        Line::styled("Try selecting another month!", Style::default().fg(theme.dim)),
    ];
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card, inner);
}
