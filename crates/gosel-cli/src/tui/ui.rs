//! UI rendering for the picker.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use super::app::Picker;

/// Render the entire picker.
pub fn render(picker: &Picker<'_, '_>, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: query, matches, status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query
            Constraint::Min(3),    // Matches
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_query(picker, frame, chunks[0]);
    render_matches(picker, frame, chunks[1]);
    render_status_bar(picker, frame, chunks[2]);
}

fn render_query(picker: &Picker<'_, '_>, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", picker.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    let inner_area = block.inner(area);

    let input = Paragraph::new(picker.query.as_str())
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(input, area);

    let cursor_x = inner_area.x + picker.query.chars().count() as u16;
    frame.set_cursor_position(Position::new(cursor_x, inner_area.y));
}

fn render_matches(picker: &Picker<'_, '_>, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = picker
        .visible()
        .map(|(item, is_cursor)| {
            if is_cursor {
                ListItem::new(Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        item.to_string(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(item.to_string(), Style::default().fg(Color::White)),
                ]))
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_status_bar(picker: &Picker<'_, '_>, frame: &mut Frame, area: Rect) {
    let status = format!(
        "{}/{}  |  [Enter] Select  [Up/Down] Move  [Esc] Cancel",
        picker.match_count(),
        picker.total()
    );

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
