//! Shared popup rendering helpers

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::tui::theme::Theme;

/// A rect of the given size centered inside `area`, clamped to fit.
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear whatever is underneath and paint the popup surface.
pub fn render_popup_background(f: &mut Frame<'_>, area: Rect, theme: &Theme) {
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.surface)),
        area,
    );
}

/// Standard popup frame.
pub fn popup_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect_centers() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = center_rect(20, 10, area);
        assert_eq!(rect, Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        let rect = center_rect(20, 10, area);
        assert_eq!(rect, area);
    }
}
