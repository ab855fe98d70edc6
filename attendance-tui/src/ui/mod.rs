use crate::app::{App, StatusLevel, View};
use crate::session::{Role, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
    Frame,
};

mod employee_view;
mod form;
mod hr_view;
mod qr_view;
mod table;
pub(super) mod utils;

const LABEL: &str = " Attendance Console";

pub fn render(frame: &mut Frame, app: &mut App, session: &Session) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title(frame, root[0], app, session);
    render_tabs(frame, root[1], app);

    let body = root[2];
    match app.current_view {
        View::Hr => hr_view::render_hr_view(frame, app, session, body),
        View::Employee => employee_view::render_employee_view(frame, app, session, body),
        View::QrDisplay => qr_view::render_qr_view(frame, app, body),
    }

    render_status(frame, root[3], app);
    render_controls(frame, root[4], app, session);
}

fn render_title(frame: &mut Frame, area: Rect, app: &mut App, session: &Session) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2 + LABEL.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    // Throbber spins while an action is in flight, full symbol when idle.
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let who = |role: Role| {
        if session.is_logged_in(role) {
            Span::styled(format!("{}: signed in  ", role), Style::default().fg(Color::Green))
        } else {
            Span::styled(format!("{}: -  ", role), Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![who(Role::Hr), who(Role::Employee)]))
            .alignment(Alignment::Right),
        cols[1],
    );
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("F{} {}", i + 1, view.title()));
    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.status_message {
        Some(status) => (
            status.text.as_str(),
            match status.level {
                StatusLevel::Info => Color::White,
                StatusLevel::Success => Color::Green,
                StatusLevel::Warning => Color::Yellow,
                StatusLevel::Error => Color::Red,
            },
        ),
        None => ("Ready", Color::White),
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(Style::default().fg(color))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    use utils::hint;

    let mut spans: Vec<Span> = Vec::new();
    if app.captures_text(session) {
        spans.extend(hint("Enter", ": Submit  "));
        spans.extend(hint("Tab/↑↓", ": Field  "));
        spans.extend(hint("Esc", ": Cancel  "));
    } else {
        match app.current_view {
            View::QrDisplay => {
                spans.extend(hint("0-9", ": Company ID  "));
                spans.extend(hint("Enter", ": Show  "));
                spans.extend(hint("Esc", ": Stop  "));
            }
            View::Employee if app.employee.is_halted() => {}
            View::Hr | View::Employee => {
                spans.extend(hint("↑↓/jk", ": Select  "));
                spans.extend(hint("Enter", ": Run  "));
                spans.extend(hint("PgUp/PgDn", ": Scroll  "));
            }
        }
        spans.extend(hint("Tab", ": Next view  "));
        spans.extend(hint("q", ": Quit  "));
    }
    spans.extend(hint("F1-F3", ": Views  "));
    spans.extend(hint("Ctrl+C", ": Quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
