use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::budget::{BudgetState, BudgetStatus, FlowState};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Budget widget
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_budget_widget(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (spent, returned) = app.month_totals();
    let net = returned - spent;
    let entry_count = app.entries.len();

    render_card(
        f,
        cards[0],
        "Spent This Month",
        format_amount(spent),
        theme::RED,
        Some(format!("{entry_count} entries")),
    );
    render_card(
        f,
        cards[1],
        "Pulled Out",
        format_amount(returned),
        theme::GREEN,
        None,
    );
    render_card(
        f,
        cards[2],
        "Net",
        format_amount(net),
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[3],
        "Session",
        app.timer.formatted(),
        theme::ACCENT,
        Some(
            if app.timer.is_running() {
                "running"
            } else {
                "stopped"
            }
            .to_string(),
        ),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_budget_widget(f: &mut Frame, area: Rect, app: &App) {
    match app.flow.state() {
        FlowState::Loading => render_message(
            f,
            area,
            app.flow
                .error()
                .map(|e| format!("Could not load budget: {e}"))
                .unwrap_or_else(|| "Loading budget…".to_string()),
        ),
        FlowState::NeedsSetup => render_message(
            f,
            area,
            "No budget set. Press Enter to set a monthly limit, or use :limit <amount>".to_string(),
        ),
        FlowState::Active | FlowState::Editing => {
            if let (Some(config), Some(status)) = (app.flow.config(), app.flow.status()) {
                render_gauge(f, area, config.monthly_limit, status);
            } else {
                render_message(f, area, "Loading budget…".to_string());
            }
        }
    }
}

fn budget_block(border: ratatui::style::Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            " Monthly Budget ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_message(f: &mut Frame, area: Rect, msg: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(msg, theme::dim_style())),
    ])
    .centered()
    .block(budget_block(theme::OVERLAY));
    f.render_widget(text, area);
}

fn render_gauge(f: &mut Frame, area: Rect, limit: Decimal, status: &BudgetStatus) {
    let state_color = match status.state {
        BudgetState::OnTrack => theme::GREEN,
        BudgetState::NearLimit => theme::YELLOW,
        BudgetState::OverBudget => theme::RED,
    };

    let block = budget_block(state_color);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // headline
            Constraint::Length(1), // gauge
            Constraint::Min(1),    // detail line
        ])
        .split(inner);

    let pct = status.percent_used.to_f64().unwrap_or(0.0);
    let headline = Line::from(vec![
        Span::styled(
            format!(" {} ", status.state.label()),
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(state_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {pct:.0}% of {} used", format_amount(limit)),
            theme::normal_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(headline), chunks[0]);

    // The bar caps at full; the headline carries the true percentage.
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(state_color).bg(theme::SURFACE))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(
            format!("{} spent", format_amount(status.month_spent)),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, chunks[1]);

    let detail = if status.state == BudgetState::OverBudget {
        Line::from(Span::styled(
            format!(
                "  {} over budget this month",
                format_amount(status.overage())
            ),
            theme::loss_style(),
        ))
    } else {
        Line::from(Span::styled(
            format!(
                "  {} remaining this month",
                format_amount(status.remaining)
            ),
            theme::dim_style(),
        ))
    };
    f.render_widget(Paragraph::new(detail), chunks[2]);
}
