use crate::app::{Menu, MenuItem, ResultsPanel};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{
        Block, Borders, List, ListItem, ListState, Padding, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

pub fn render_results(frame: &mut Frame, area: Rect, panel: &ResultsPanel) {
    let header = Row::new(panel.table.columns.iter().map(String::as_str)).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = panel
        .table
        .rows
        .iter()
        .skip(panel.scroll)
        .map(|row| Row::new(row.iter().map(String::as_str)));
    let widths = vec![Constraint::Fill(1); panel.table.columns.len().max(1)];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", panel.title, panel.table.len()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .block(block),
        area,
    );

    let visible = inner.height.saturating_sub(1) as usize;
    if panel.table.len() > visible {
        let mut scrollbar_state = ScrollbarState::new(panel.table.len())
            .position(panel.scroll)
            .viewport_content_length(visible);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
            &mut scrollbar_state,
        );
    }
}

pub fn render_menu<A: MenuItem>(frame: &mut Frame, area: Rect, title: &str, menu: &Menu<A>) {
    let items: Vec<ListItem> = A::ALL
        .iter()
        .map(|item| {
            let suffix = if item.has_form() { " …" } else { "" };
            ListItem::new(format!("{}{}", item.label(), suffix))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(menu.selected));

    let border = if menu.is_form_open() {
        Color::DarkGray
    } else {
        Color::Yellow
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled(format!(" {} ", title), Style::default().fg(border)))
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut list_state);
}
