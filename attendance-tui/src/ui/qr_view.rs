use crate::app::App;
use image::GrayImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget},
    Frame,
};

/// Draws a grayscale image with half blocks: each cell shows two pixel rows,
/// the upper one as foreground and the lower one as background.
pub struct QrImage<'a> {
    image: &'a GrayImage,
}

impl<'a> QrImage<'a> {
    pub fn new(image: &'a GrayImage) -> Self {
        Self { image }
    }

    /// Cells needed to draw the image as a square no larger than `area`.
    pub fn fit(area: Rect) -> (u16, u16) {
        let side = area.width.min(area.height.saturating_mul(2));
        (side, side / 2)
    }
}

impl Widget for QrImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = Self::fit(area);
        if width == 0 || height == 0 {
            return;
        }
        let (img_w, img_h) = self.image.dimensions();
        let side = u32::from(width);
        let pixel = |px: u32, py: u32| -> Color {
            let x = (px * img_w / side).min(img_w.saturating_sub(1));
            let y = (py * img_h / side).min(img_h.saturating_sub(1));
            let l = self.image.get_pixel(x, y)[0];
            Color::Rgb(l, l, l)
        };

        let x0 = area.x + (area.width - width) / 2;
        for cy in 0..height {
            for cx in 0..width {
                let top = pixel(u32::from(cx), u32::from(cy) * 2);
                let bottom = pixel(u32::from(cx), u32::from(cy) * 2 + 1);
                if let Some(cell) = buf.cell_mut((x0 + cx, area.y + cy)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

pub fn render_qr_view(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let state = &app.qr;
    let status = match state.polling {
        Some(id) => Span::styled(
            format!("  polling company {} every {}s", id, app.qr_refresh_secs),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("  idle", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Company ID: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.company_input.value.as_str()),
            status,
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" QR Display ")
                .padding(Padding::horizontal(1)),
        ),
        rows[0],
    );

    match &state.frame {
        Some(frame_data) => {
            frame.render_widget(QrImage::new(&frame_data.image), rows[1]);
            frame.render_widget(
                Paragraph::new(frame_data.caption.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                rows[2],
            );
        }
        None => {
            let hint = if state.polling.is_some() {
                "Waiting for the first QR…"
            } else {
                "Type a company ID and press Enter to show its QR."
            };
            frame.render_widget(
                Paragraph::new(hint)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                rows[1],
            );
        }
    }

    if let Some(warning) = &state.warning {
        frame.render_widget(
            Paragraph::new(warning.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            rows[3],
        );
    }
}
