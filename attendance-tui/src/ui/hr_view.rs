use crate::app::hr::AUTH_REGISTER;
use crate::app::{App, MenuItem};
use crate::session::{Role, Session};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::form::{form_height, render_form};
use super::table::{render_menu, render_results};
use super::utils::centered_rect;

pub fn render_hr_view(frame: &mut Frame, app: &App, session: &Session, area: Rect) {
    if !session.is_logged_in(Role::Hr) {
        let form = &app.hr.auth_form;
        let title = if form.checked(AUTH_REGISTER) {
            "HR Register"
        } else {
            "HR Login"
        };
        let popup = centered_rect(64, form_height(form), area);
        render_form(frame, popup, title, form);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);
    render_menu(frame, cols[0], "HR Actions", &app.hr.menu);

    let body = cols[1];
    let results_area = match app.hr.menu.open.and_then(|open| {
        app.hr.form(open).map(|form| (open, form))
    }) {
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

    match &app.hr.results {
        Some(panel) => render_results(frame, results_area, panel),
        None => frame.render_widget(
            Paragraph::new("Pick an action on the left. Company and employee lists show up here.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Results ")),
            results_area,
        ),
    }
}
