//! Landing page: headline metrics and the accuracy gauge.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::context::AppContext;
use crate::metadata::ResultsSummary;
use crate::ui::format::{r2_percent, thousands};
use crate::ui::theme::Theme;
use crate::ui::{layout, widgets};

use super::{Action, Page};

// Shown when the results summary does not say otherwise
const DEFAULT_R2: f64 = 0.839;
const DEFAULT_MODEL: &str = "XGBoost";
const DEFAULT_FEATURES: u64 = 1020;
const DEFAULT_TRAIN_SAMPLES: u64 = 150_311;

/// Headline numbers for the metric cards
#[derive(Debug, Clone, PartialEq)]
pub struct HomeMetrics {
    pub best_r2: f64,
    pub best_model: String,
    pub n_features: u64,
    pub n_train: u64,
}

impl HomeMetrics {
    pub fn from_summary(summary: Option<&ResultsSummary>) -> Self {
        let best_model = summary
            .and_then(ResultsSummary::best_model)
            .unwrap_or(DEFAULT_MODEL);

        Self {
            best_r2: summary.and_then(ResultsSummary::best_r2).unwrap_or(DEFAULT_R2),
            best_model: short_model_name(best_model),
            n_features: summary
                .and_then(ResultsSummary::n_features)
                .unwrap_or(DEFAULT_FEATURES),
            n_train: summary
                .and_then(ResultsSummary::n_train_samples)
                .unwrap_or(DEFAULT_TRAIN_SAMPLES),
        }
    }

    pub fn accuracy_pct(&self) -> f64 {
        self.best_r2 * 100.0
    }
}

/// Model name without any parenthesized detail: `Stacking (RF+XGB)` -> `Stacking`
fn short_model_name(name: &str) -> String {
    name.split('(').next().unwrap_or(name).trim().to_string()
}

pub fn handle_key(key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => Action::Navigate(Page::Predict),
        KeyCode::Esc => Action::Release,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, area: Rect, ctx: &AppContext) {
    let (hero_area, body) = layout::page(area);
    f.render_widget(
        widgets::hero(
            "AI-Powered Home Price Prediction",
            "State-of-the-art machine learning for accurate real estate valuation",
        ),
        hero_area,
    );

    let metrics = HomeMetrics::from_summary(ctx.metadata().summary.as_ref());
    let baseline = ctx.config().dashboard.baseline_r2;

    let rows = layout::rows(body, &[5, 7, 5]);
    draw_metric_cards(f, rows[0], &metrics);
    draw_highlights(f, rows[1], &metrics);
    draw_gauge(f, rows[2], &metrics, baseline);
    draw_call_to_action(f, rows[3]);
}

fn draw_metric_cards(f: &mut Frame, area: Rect, metrics: &HomeMetrics) {
    let cols = layout::columns(area, 4);
    let cards = [
        ("Model Accuracy", r2_percent(metrics.best_r2, 1), "R² Score"),
        ("Training Data", thousands(metrics.n_train as i64), "Properties"),
        ("Features", metrics.n_features.to_string(), "Data Points"),
        ("Best Model", metrics.best_model.clone(), "Algorithm"),
    ];

    for (i, ((label, value, caption), col)) in cards.into_iter().zip(cols).enumerate() {
        f.render_widget(
            widgets::metric_card(label, value, caption, Theme::CARDS[i]),
            col,
        );
    }
}

fn draw_highlights(f: &mut Frame, area: Rect, metrics: &HomeMetrics) {
    let cols = layout::columns(area, 2);
    let accuracy = metrics.accuracy_pct();

    let left = vec![
        Line::from(vec![
            Span::styled("High Accuracy: ", Theme::strong()),
            Span::styled(
                format!("{accuracy:.1}% R², explaining {accuracy:.1}% of the variance in home prices."),
                Theme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Data-Driven: ", Theme::strong()),
            Span::styled(
                format!(
                    "trained on {} real transactions with {} features.",
                    thousands(metrics.n_train as i64),
                    thousands(metrics.n_features as i64)
                ),
                Theme::text(),
            ),
        ]),
    ];
    let right = vec![
        Line::from(vec![
            Span::styled("Advanced ML: ", Theme::strong()),
            Span::styled(
                "ensemble methods combining Random Forest, XGBoost and LightGBM.",
                Theme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Real-Time: ", Theme::strong()),
            Span::styled("valuations returned as soon as you submit the form.", Theme::text()),
        ]),
    ];

    f.render_widget(widgets::info_card("What Makes Our Model Special", left), cols[0]);
    f.render_widget(widgets::info_card("Under the Hood", right), cols[1]);
}

fn draw_gauge(f: &mut Frame, area: Rect, metrics: &HomeMetrics, baseline: f64) {
    let ratio = metrics.best_r2.clamp(0.0, 1.0);
    let delta = (metrics.best_r2 - baseline) * 100.0;
    let style = if metrics.best_r2 >= baseline {
        Theme::ok()
    } else if ratio >= 0.70 {
        Theme::warn()
    } else {
        Theme::error()
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" Model Accuracy (R² Score) ", Theme::title())),
        )
        .gauge_style(style)
        .ratio(ratio)
        .label(format!(
            "{}  ({delta:+.1} vs baseline {})",
            r2_percent(metrics.best_r2, 1),
            r2_percent(baseline, 1)
        ));

    f.render_widget(gauge, area);
}

fn draw_call_to_action(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Ready to predict your home's value?",
            Theme::title(),
        )),
        Line::from(Span::styled(
            "Press Enter to start predicting",
            Theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn summary(value: Value) -> ResultsSummary {
        match value {
            Value::Object(map) => ResultsSummary::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults_without_summary() {
        let metrics = HomeMetrics::from_summary(None);
        assert_eq!(metrics.best_r2, 0.839);
        assert_eq!(metrics.best_model, "XGBoost");
        assert_eq!(metrics.n_features, 1020);
        assert_eq!(metrics.n_train, 150_311);
    }

    #[test]
    fn test_summary_values_and_short_name() {
        let s = summary(json!({
            "overall_best": "Stacking Ensemble (RF + XGB + LGBM)",
            "overall_best_r2": 0.8912,
            "n_features": 987,
            "n_train_samples": 120000
        }));
        let metrics = HomeMetrics::from_summary(Some(&s));

        assert_eq!(metrics.best_model, "Stacking Ensemble");
        assert_eq!(metrics.best_r2, 0.8912);
        assert_eq!(metrics.n_features, 987);
        assert_eq!(metrics.n_train, 120_000);
    }

    #[test]
    fn test_partial_summary_keeps_other_defaults() {
        let s = summary(json!({"best_r2": 0.8}));
        let metrics = HomeMetrics::from_summary(Some(&s));
        assert_eq!(metrics.best_r2, 0.8);
        assert_eq!(metrics.best_model, "XGBoost");
    }

    #[test]
    fn test_enter_goes_to_predict() {
        assert_eq!(handle_key(KeyCode::Enter), Action::Navigate(Page::Predict));
        assert_eq!(handle_key(KeyCode::Esc), Action::Release);
        assert_eq!(handle_key(KeyCode::Char('x')), Action::None);
    }
}
