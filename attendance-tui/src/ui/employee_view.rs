use crate::app::{App, MenuItem};
use crate::session::{Precondition, Role, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::form::{form_height, render_form};
use super::table::{render_menu, render_results};
use super::utils::centered_rect;

pub fn render_employee_view(frame: &mut Frame, app: &App, session: &Session, area: Rect) {
    if app.employee.is_halted() {
        let popup = centered_rect(60, 5, area);
        frame.render_widget(
            Paragraph::new(Precondition::MissingScanToken.to_string())
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red))
                        .padding(Padding::vertical(1)),
                ),
            popup,
        );
        return;
    }

    if !session.is_logged_in(Role::Employee) {
        let form = &app.employee.login_form;
        let popup = centered_rect(64, form_height(form), area);
        render_form(frame, popup, "Employee Login", form);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(cols[0]);
    render_menu(frame, left[0], "Employee Actions", &app.employee.menu);

    let location = match session.location() {
        Some(location) => Line::from(Span::styled(
            location.to_string(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "Not shared yet",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(
        Paragraph::new(location)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Location ")),
        left[1],
    );

    let body = cols[1];
    let results_area = match app
        .employee
        .menu
        .open
        .and_then(|open| app.employee.form(open).map(|form| (open, form)))
    {
        Some((open, form)) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(form_height(form)), Constraint::Min(0)])
                .split(body);
            render_form(frame, rows[0], open.label(), form);
            rows[1]
        }
        None => body,
    };

    match &app.employee.results {
        Some(panel) => render_results(frame, results_area, panel),
        None => frame.render_widget(
            Paragraph::new("Share your location, then check in or out.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Results ")),
            results_area,
        ),
    }
}
