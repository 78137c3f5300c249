//! Rendering for the dashboard
//!
//! Pure functions over [`DashboardState`]; no fetching or mutation happens
//! here beyond derived display values.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::dashboard::state::{ChartView, DashboardState};
use crate::models::AssetQuote;
use crate::utils::{format_signed_pct, format_usd, prediction_delta_pct};

const ACCENT: Color = Color::Cyan;

fn change_color(value: f64) -> Color {
    if value >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

pub fn draw(f: &mut Frame, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + last updated
            Constraint::Length(1), // warning/error banner
            Constraint::Min(10),   // cards
            Constraint::Length(1), // key hints
        ])
        .split(f.size());

    draw_header(f, chunks[0], state);
    draw_banner(f, chunks[1], state);

    if state.loading {
        let loading = Paragraph::new("Loading cryptocurrency data...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(loading, chunks[2]);
    } else {
        draw_cards(f, chunks[2], state);
    }

    let footer = Paragraph::new(" q quit · r refresh · 1-4 view chart · Esc close chart")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[3]);

    if let Some(chart) = &state.chart {
        draw_chart_overlay(f, chart);
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let mut status = Vec::new();
    if let Some(updated) = state.last_updated {
        status.push(Span::styled(
            format!("Last updated: {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.refreshing {
        status.push(Span::styled(
            "  refreshing...",
            Style::default().fg(ACCENT),
        ));
    }

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                " Coindeck",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Real-time cryptocurrency prices with ML-powered predictions",
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(status),
    ]);
    f.render_widget(header, area);
}

fn draw_banner(f: &mut Frame, area: Rect, state: &DashboardState) {
    if let Some(message) = &state.error {
        let banner = Paragraph::new(format!(" ! {}", message))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(banner, area);
    }
}

fn draw_cards(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.quotes.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = state
        .quotes
        .iter()
        .map(|_| Constraint::Ratio(1, state.quotes.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, quote) in state.quotes.iter().enumerate() {
        let predicted = state
            .predictions
            .as_ref()
            .and_then(|p| p.price_for(&quote.id));
        draw_card(f, columns[i], i, quote, predicted);
    }
}

fn draw_card(f: &mut Frame, area: Rect, index: usize, quote: &AssetQuote, predicted: Option<f64>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" [{}] {} ", index + 1, quote.name))
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = vec![
        Line::from(Span::styled(
            quote.symbol.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Current Price",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format_usd(quote.current_price),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format_signed_pct(quote.price_change_percentage_24h),
                Style::default().fg(change_color(quote.price_change_percentage_24h)),
            ),
            Span::styled(" 24h", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    if let Some(predicted_price) = predicted {
        let delta = prediction_delta_pct(quote.current_price, predicted_price);
        lines.extend([
            Line::from(""),
            Line::from(Span::styled(
                "ML Predicted Price",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format_usd(predicted_price),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format_signed_pct(delta),
                    Style::default().fg(change_color(delta)),
                ),
                Span::styled(" vs current", Style::default().fg(Color::DarkGray)),
            ]),
        ]);
    }

    let card = Paragraph::new(lines).block(block);
    f.render_widget(card, area);
}

fn draw_chart_overlay(f: &mut Frame, chart: &ChartView) {
    let area = centered_rect(84, 80, f.size());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} Price Chart ", chart.asset_name))
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    if chart.loading {
        let loading = Paragraph::new("Loading chart data...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(loading, chunks[0]);
    } else if let Some(message) = &chart.error {
        let error = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[0]);
    } else if chart.monthly.len() < 2 {
        let empty = Paragraph::new("Not enough historical data to chart")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[0]);
    } else {
        draw_monthly_chart(f, chunks[0], chart);
    }

    let mut footer_spans = vec![Span::styled(
        " Esc close · s save snapshot",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(note) = &chart.snapshot_note {
        footer_spans.push(Span::styled(
            format!("  {}", note),
            Style::default().fg(ACCENT),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(footer_spans)), chunks[1]);
}

fn draw_monthly_chart(f: &mut Frame, area: Rect, chart: &ChartView) {
    let data: Vec<(f64, f64)> = chart
        .monthly
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.avg_price))
        .collect();

    let min_y = chart
        .monthly
        .iter()
        .map(|m| m.avg_price)
        .fold(f64::INFINITY, f64::min)
        * 0.98;
    let max_y = chart
        .monthly
        .iter()
        .map(|m| m.avg_price)
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.02;
    let max_x = (chart.monthly.len() - 1) as f64;

    // First, middle and last month carry the x axis
    let mid = chart.monthly.len() / 2;
    let x_labels = vec![
        Span::raw(chart.monthly[0].label.clone()),
        Span::raw(chart.monthly[mid].label.clone()),
        Span::raw(chart.monthly[chart.monthly.len() - 1].label.clone()),
    ];
    let y_labels = vec![
        Span::raw(format_usd(min_y)),
        Span::raw(format_usd((min_y + max_y) / 2.0)),
        Span::raw(format_usd(max_y)),
    ];

    let datasets = vec![Dataset::default()
        .name(format!("{} Price (USD)", chart.asset_name))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(ACCENT))
        .data(&data)];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Last 12 Months (monthly average) "),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_y, max_y])
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::{FetchOutcome, RefreshData};
    use crate::models::{MonthlyPoint, PredictionSet};
    use ratatui::{backend::TestBackend, Terminal};
    use std::collections::HashMap;

    fn quote(id: &str, name: &str, symbol: &str, price: f64) -> AssetQuote {
        AssetQuote {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            current_price: price,
            price_change_24h: 100.0,
            price_change_percentage_24h: 1.5,
        }
    }

    fn render(state: &DashboardState) -> String {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn refreshed_state(
        quotes: Vec<AssetQuote>,
        predictions: Option<PredictionSet>,
        warning: Option<String>,
    ) -> DashboardState {
        let mut state = DashboardState::new();
        let generation = state.begin_refresh();
        state.apply(FetchOutcome::Refresh {
            generation,
            result: Ok(RefreshData {
                quotes,
                predictions,
                warning,
            }),
        });
        state
    }

    #[test]
    fn renders_one_card_per_quote() {
        let state = refreshed_state(
            vec![
                quote("bitcoin", "Bitcoin", "BTC", 50000.0),
                quote("ethereum", "Ethereum", "ETH", 3000.0),
            ],
            None,
            None,
        );

        let text = render(&state);
        assert!(text.contains("[1] Bitcoin"));
        assert!(text.contains("[2] Ethereum"));
        assert!(text.contains("$50,000.00"));
        assert!(text.contains("$3,000.00"));
    }

    #[test]
    fn prediction_section_shows_signed_delta() {
        let mut predictions = HashMap::new();
        predictions.insert("bitcoin".to_string(), 52000.0);

        let state = refreshed_state(
            vec![quote("bitcoin", "Bitcoin", "BTC", 50000.0)],
            Some(PredictionSet::new(predictions)),
            None,
        );

        let text = render(&state);
        assert!(text.contains("ML Predicted Price"));
        assert!(text.contains("$52,000.00"));
        assert!(text.contains("+4.00%"));
    }

    #[test]
    fn cards_render_without_prediction_section_when_predictions_failed() {
        let state = refreshed_state(
            vec![quote("bitcoin", "Bitcoin", "BTC", 50000.0)],
            None,
            Some("Unable to fetch predictions. Displaying live prices only.".to_string()),
        );

        let text = render(&state);
        assert!(text.contains("[1] Bitcoin"));
        assert!(text.contains("$50,000.00"));
        assert!(!text.contains("ML Predicted Price"));
        assert!(text.contains("Unable to fetch predictions"));
    }

    #[test]
    fn fatal_error_banner_suggests_retry() {
        let mut state = DashboardState::new();
        let generation = state.begin_refresh();
        state.apply(FetchOutcome::Refresh {
            generation,
            result: Err("Failed to fetch cryptocurrency data. Please try again.".to_string()),
        });

        let text = render(&state);
        assert!(text.contains("Please try again"));
    }

    #[test]
    fn chart_overlay_labels_months() {
        let mut state = refreshed_state(
            vec![quote("bitcoin", "Bitcoin", "BTC", 50000.0)],
            None,
            None,
        );
        let generation = state.begin_chart("bitcoin".to_string(), "Bitcoin".to_string());
        state.apply(FetchOutcome::History {
            generation,
            asset_id: "bitcoin".to_string(),
            result: Ok(vec![
                MonthlyPoint {
                    key: "2025-06".to_string(),
                    label: "Jun 2025".to_string(),
                    avg_price: 47000.0,
                },
                MonthlyPoint {
                    key: "2025-07".to_string(),
                    label: "Jul 2025".to_string(),
                    avg_price: 49000.0,
                },
            ]),
        });

        let text = render(&state);
        assert!(text.contains("Bitcoin Price Chart"));
        assert!(text.contains("Jun 2025"));
        assert!(text.contains("Jul 2025"));
    }
}
