use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.timer.is_running() {
            theme::GREEN
        } else {
            theme::OVERLAY
        }))
        .title(Span::styled(
            " Session Timer ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let state_label = if app.timer.is_running() {
        Span::styled(
            " RUNNING ",
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " STOPPED ",
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::OVERLAY)
                .add_modifier(Modifier::BOLD),
        )
    };

    let clock = Paragraph::new(vec![
        Line::from(Span::styled(
            app.timer.formatted(),
            Style::default()
                .fg(if app.timer.is_running() {
                    theme::GREEN
                } else {
                    theme::TEXT
                })
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(state_label),
    ])
    .centered();
    f.render_widget(clock, chunks[1]);

    let hints = Paragraph::new(Line::from(Span::styled(
        "Space start/pause   r reset   (restarting after pause starts from zero)",
        theme::dim_style(),
    )))
    .centered();
    f.render_widget(hints, chunks[2]);
}
