use crate::app::{FieldKind, Form};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 22;

/// Height needed to render `form` including borders and the error line.
pub fn form_height(form: &Form) -> u16 {
    form.fields.len() as u16 + 4
}

pub fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form) {
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focused;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let value = match field.kind {
                FieldKind::Toggle if focused => format!("{}  (Space to toggle)", field.display_value()),
                _ => field.display_value(),
            };
            Line::from(vec![
                Span::styled(format!("{:>width$}: ", field.label, width = LABEL_WIDTH), label_style),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Yellow),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Some(field) = form.fields.get(form.focused) {
        if field.kind != FieldKind::Toggle {
            let typed = field.input.value[..field.input.cursor].chars().count();
            let x = inner.x + (LABEL_WIDTH + 2 + typed) as u16;
            let y = inner.y + form.focused as u16;
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}
