//! Project overview, methodology and what was loaded at startup.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Tabs},
    Frame,
};

use crate::context::AppContext;
use crate::ui::theme::Theme;
use crate::ui::{layout, widgets};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Overview,
    Data,
    Preprocessing,
    Modeling,
    Validation,
    Technology,
    Structure,
    Roadmap,
    Credits,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::Overview,
        Topic::Data,
        Topic::Preprocessing,
        Topic::Modeling,
        Topic::Validation,
        Topic::Technology,
        Topic::Structure,
        Topic::Roadmap,
        Topic::Credits,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Topic::Overview => "Overview",
            Topic::Data => "Data",
            Topic::Preprocessing => "Preprocessing",
            Topic::Modeling => "Modeling",
            Topic::Validation => "Validation",
            Topic::Technology => "Technology",
            Topic::Structure => "Structure",
            Topic::Roadmap => "Roadmap",
            Topic::Credits => "Credits",
        }
    }

    fn index(self) -> usize {
        Topic::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Section headings and their bullets
    fn content(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Topic::Overview => &[
                (
                    "Project Overview",
                    &["This system estimates property values with machine learning trained on \
comprehensive real estate data. The model analyzes over 1,020 features covering property \
characteristics, location, market trends and historical sales."],
                ),
                (
                    "What Worked",
                    &[
                        "Conservative Leakage Removal: only true leakage removed, predictive features kept",
                        "Optimal Encoding Threshold: 600 unique values for target encoding",
                        "All Property Types: mixed types generalized better than SFR-only",
                        "Ensemble Methods: multiple models combined for robustness",
                    ],
                ),
                (
                    "Lessons Learned",
                    &[
                        "Feature Count ≠ Accuracy: quality over quantity",
                        "Filtering Can Hurt: SFR-only reduced performance",
                        "Threshold Tuning Critical: 50 → 600 made a large difference",
                        "XGBoost > Random Forest: for this dataset",
                    ],
                ),
            ],
            Topic::Data => &[
                (
                    "Data Collection & Preparation",
                    &["Source: Louisiana MLS (Multiple Listing Service) data from January-August 2025"],
                ),
                (
                    "Statistics",
                    &[
                        "Training Set: 150,311 properties (months 1-7)",
                        "Test Set: 22,759 properties (month 8)",
                        "Raw Features: 80 columns from MLS",
                        "Final Features: 1,020 after engineering",
                    ],
                ),
                (
                    "Data Quality",
                    &[
                        "Cleaned and validated",
                        "Outliers removed (0.5th and 99.5th percentiles)",
                        "Missing values imputed",
                        "Temporal split for realistic evaluation",
                    ],
                ),
            ],
            Topic::Preprocessing => &[
                (
                    "Leakage Removal",
                    &[
                        "Target-related features removed (ListPrice, ClosePrice derivatives)",
                        "Dates, agent names and IDs removed",
                        "Ultra-high cardinality features (>10K unique values) removed",
                    ],
                ),
                (
                    "Feature Engineering",
                    &[
                        "BuildingAge: current year - year built",
                        "TotalRooms: bedrooms + bathrooms + other rooms",
                        "HasGarage: binary indicator for garage presence",
                    ],
                ),
                (
                    "Encoding & Missing Values",
                    &[
                        "Target Encoding: high-cardinality categoricals such as City and PostalCode",
                        "One-Hot Encoding: low-cardinality categoricals such as property type and condition",
                        "Threshold: columns more than 60% missing are dropped",
                        "Imputation: mean/median for numbers, mode for categories",
                    ],
                ),
            ],
            Topic::Modeling => &[
                (
                    "Baseline Models",
                    &["Linear, Ridge, Lasso and ElasticNet regression"],
                ),
                (
                    "Tree-Based & Boosting",
                    &[
                        "Decision Tree, Random Forest, Gradient Boosting",
                        "XGBoost, LightGBM, CatBoost",
                    ],
                ),
                (
                    "Ensembles",
                    &[
                        "Voting Regressor: average of RF + XGB + LightGBM",
                        "Stacking Regressor: meta-learner on top of base models",
                        "Weighted Blending: performance-based weights",
                    ],
                ),
                (
                    "Hyperparameter Optimization",
                    &["RandomizedSearchCV with 20-25 iterations and 3-fold cross-validation"],
                ),
            ],
            Topic::Validation => &[
                (
                    "Evaluation Metrics",
                    &[
                        "R² Score (primary): proportion of variance explained",
                        "RMSE: root mean squared error",
                        "MAE: mean absolute error",
                        "MdAPE: median absolute percentage error",
                    ],
                ),
                (
                    "Validation Strategy",
                    &[
                        "Temporal Split: train on Jan-Jul, test on Aug",
                        "Cross-Validation: 3-fold CV during training",
                        "Holdout Test: never seen by the model during training",
                    ],
                ),
                (
                    "Performance Benchmarks",
                    &[
                        "Initial Baseline: 73.6% R²",
                        "Optimized Pipeline: 83.91% R² (XGBoost)",
                        "Target: 88.4% R²",
                        "Final: see the Analysis page for the current best",
                    ],
                ),
            ],
            Topic::Technology => &[
                (
                    "Training Pipeline",
                    &[
                        "Python 3.13 with Pandas 2.2 and NumPy 1.26",
                        "Scikit-learn 1.3, XGBoost 2.0+, LightGBM 4.0+, CatBoost 1.2+",
                        "Jupyter notebooks for each pipeline stage",
                    ],
                ),
                (
                    "Analysis & Explainability",
                    &["Plotly, Matplotlib and Seaborn for plots", "SHAP 0.42+ for feature attributions"],
                ),
                (
                    "Dashboard",
                    &[
                        "Rust with ratatui and crossterm for the terminal interface",
                        "ONNX Runtime for serving the exported model",
                        "tracing for structured logs",
                    ],
                ),
            ],
            Topic::Structure => &[
                (
                    "Notebooks",
                    &[
                        "01 data loading",
                        "02 preprocessing",
                        "03 baseline linear models",
                        "04 advanced models and tuning",
                        "05 model analysis",
                        "06 ensemble models",
                    ],
                ),
                (
                    "Directories",
                    &[
                        "data/: processed datasets",
                        "filled_data/: raw MLS data",
                        "models/: trained model artifact and results metadata",
                        "plots/: visualizations",
                        "config/: dashboard configuration",
                    ],
                ),
            ],
            Topic::Roadmap => &[(
                "Potential Enhancements",
                &[
                    "Real-time Data Integration: connect to live MLS feeds",
                    "Time Series Forecasting: predict future market trends",
                    "Geographic Visualization: price heatmaps by area",
                    "Comparable Sales: similar properties in the area",
                    "Market Analytics: neighborhood insights and trends",
                    "API Development: programmatic access to valuations",
                    "Mobile App: iOS and Android applications",
                    "Advanced NLP: analyze property descriptions and reviews",
                ],
            )],
            Topic::Credits => &[(
                "Credits",
                &[
                    "Data from Louisiana MLS (2025)",
                    "Thanks to the open-source ML community",
                ],
            )],
        }
    }
}

pub struct AboutState {
    pub topic: Topic,
}

impl AboutState {
    pub fn new() -> Self {
        Self {
            topic: Topic::Overview,
        }
    }
}

impl Default for AboutState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_key(state: &mut AboutState, key: KeyCode) -> Action {
    let n = Topic::ALL.len();
    match key {
        KeyCode::Esc => return Action::Release,
        KeyCode::Right | KeyCode::Tab => {
            state.topic = Topic::ALL[(state.topic.index() + 1) % n];
        }
        KeyCode::Left | KeyCode::BackTab => {
            state.topic = Topic::ALL[(state.topic.index() + n - 1) % n];
        }
        _ => {}
    }
    Action::None
}

/// One line per metadata slot and the model, marked loaded or missing
pub fn status_lines(ctx: &AppContext) -> Vec<Line<'static>> {
    let metadata = ctx.metadata();
    let slots = [
        ("Results summary", metadata.summary.is_some()),
        ("Feature importance", metadata.feature_importance.is_some()),
        ("Feature schema", metadata.feature_schema.is_some()),
        ("Expected features", metadata.expected_features.is_some()),
    ];

    let mut lines = vec![match ctx.model() {
        Some(model) => Line::from(vec![
            Span::styled("✓ ", Theme::ok()),
            Span::styled(format!("Model: {}", model.name), Theme::text()),
        ]),
        None => Line::from(vec![
            Span::styled("✗ ", Theme::error()),
            Span::styled("Model: not loaded", Theme::text()),
        ]),
    }];

    for (name, loaded) in slots {
        let (mark, style) = if loaded {
            ("✓ ", Theme::ok())
        } else {
            ("– ", Theme::muted())
        };
        lines.push(Line::from(vec![
            Span::styled(mark, style),
            Span::styled(name, Theme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Model directory: {}",
            ctx.config().models.models_dir.display()
        ),
        Theme::muted(),
    )));
    lines
}

pub fn draw(f: &mut Frame, area: Rect, ctx: &AppContext, state: &AboutState) {
    let (hero_area, body) = layout::page(area);
    f.render_widget(
        widgets::hero(
            "About This Project",
            "Learn about our approach and methodology",
        ),
        hero_area,
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(body);
    let rows = layout::rows(cols[0], &[3]);

    let tabs = Tabs::new(Topic::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(state.topic.index())
        .style(Theme::muted())
        .highlight_style(Theme::highlight())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" Methodology ", Theme::title())),
        );
    f.render_widget(tabs, rows[0]);

    let mut lines = Vec::new();
    for (heading, items) in state.topic.content() {
        lines.push(Line::from(Span::styled(*heading, Theme::title())));
        lines.extend(widgets::bullets(items));
        lines.push(Line::from(""));
    }
    f.render_widget(widgets::info_card(state.topic.title(), lines), rows[1]);

    f.render_widget(widgets::info_card("Loaded Artifacts", status_lines(ctx)), cols[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::metadata::MetadataBundle;

    #[test]
    fn test_topics_wrap() {
        let mut state = AboutState::new();
        handle_key(&mut state, KeyCode::Left);
        assert_eq!(state.topic, Topic::Credits);
        handle_key(&mut state, KeyCode::Right);
        assert_eq!(state.topic, Topic::Overview);
        assert_eq!(handle_key(&mut state, KeyCode::Esc), Action::Release);
    }

    #[test]
    fn test_every_topic_has_content() {
        for topic in Topic::ALL {
            assert!(!topic.content().is_empty(), "{topic:?}");
        }
    }

    #[test]
    fn test_status_reflects_loaded_slots() {
        let metadata = MetadataBundle {
            expected_features: Some(vec!["LivingArea".to_string()]),
            ..Default::default()
        };
        let ctx = AppContext::new(AppConfig::default(), Err("missing".to_string()), metadata);
        let lines = status_lines(&ctx);

        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], "✗ Model: not loaded");
        assert_eq!(text[1], "– Results summary");
        assert_eq!(text[4], "✓ Expected features");
    }
}
