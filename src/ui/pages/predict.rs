//! Prediction form and valuation result.

use chrono::{Datelike, Local};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tracing::{info, warn};

use crate::context::{AppContext, Valuation};
use crate::types::PropertyInput;
use crate::ui::form::{Field, FieldKind, NumberInput};
use crate::ui::format::{dollars, thousands};
use crate::ui::theme::Theme;
use crate::ui::{layout, widgets};

use super::Action;

pub const FAILURE_HINT: &str = "This might be due to missing features in the simplified form. \
Try using the Advanced tab or check the model requirements.";

const MARKET_TIP: &str = "This prediction is based on historical data and market trends. \
Actual sale prices may vary based on current market conditions, negotiation, and other factors.";

const PROPERTY_TYPES: &[&str] = &[
    "Single Family Residential",
    "Condo/Townhouse",
    "Multi-Family",
    "Other",
];
const CONDITIONS: &[&str] = &["Excellent", "Good", "Average", "Fair", "Poor"];

/// Names listed on the advanced tab before summarizing the rest
const ADVANCED_SAMPLE: usize = 20;

// Field positions in the form
const LIVING_AREA: usize = 0;
const BEDROOMS: usize = 1;
const BATHROOMS: usize = 2;
const YEAR_BUILT: usize = 3;
const GARAGE: usize = 4;
const STORIES: usize = 5;
const CITY: usize = 6;
const POSTAL_CODE: usize = 7;
const PROPERTY_TYPE: usize = 8;
const CONDITION: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Simple,
    Advanced,
}

/// Result of the last submit
#[derive(Debug, Clone)]
pub enum Outcome {
    Valued {
        valuation: Valuation,
        input: PropertyInput,
    },
    Failed {
        message: String,
    },
}

pub struct PredictState {
    pub tab: Tab,
    fields: Vec<Field>,
    /// Focused field; `fields.len()` is the submit button
    selected: usize,
    pub outcome: Option<Outcome>,
}

impl PredictState {
    pub fn new() -> Self {
        Self::with_max_year(Local::now().year() as i64)
    }

    pub fn with_max_year(max_year: i64) -> Self {
        let fields = vec![
            Field::number("Living Area (sq ft)", NumberInput::new(2000, 500, 10000, 100)),
            Field::number("Bedrooms", NumberInput::new(3, 1, 10, 1)),
            Field::number("Bathrooms", NumberInput::new(2, 1, 10, 1)),
            Field::number("Year Built", NumberInput::new(2000, 1900, max_year, 1)),
            Field::number("Garage Spaces", NumberInput::new(2, 0, 5, 1)),
            Field::number("Stories", NumberInput::new(1, 1, 4, 1)),
            Field::text("City", "Baton Rouge"),
            Field::text("Postal Code", "70808"),
            Field::choice("Property Type", PROPERTY_TYPES),
            Field::choice("Condition", CONDITIONS),
        ];

        Self {
            tab: Tab::Simple,
            fields,
            selected: 0,
            outcome: None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn on_button(&self) -> bool {
        self.selected == self.fields.len()
    }

    fn number(&self, index: usize) -> i64 {
        match &self.fields[index].kind {
            FieldKind::Number(n) => n.value.clamp(n.min, n.max),
            _ => 0,
        }
    }

    fn text(&self, index: usize) -> String {
        match &self.fields[index].kind {
            FieldKind::Text(s) => s.trim().to_string(),
            FieldKind::Choice(c) => c.value().to_string(),
            FieldKind::Number(n) => n.value.to_string(),
        }
    }

    /// The form's values, each number within its bounds
    pub fn to_input(&self) -> PropertyInput {
        PropertyInput {
            living_area: self.number(LIVING_AREA) as f64,
            bedrooms: self.number(BEDROOMS) as u32,
            bathrooms: self.number(BATHROOMS) as u32,
            year_built: self.number(YEAR_BUILT) as i32,
            garage_spaces: self.number(GARAGE) as u32,
            stories: self.number(STORIES) as u32,
            city: self.text(CITY),
            postal_code: self.text(POSTAL_CODE),
            property_type: self.text(PROPERTY_TYPE),
            condition: self.text(CONDITION),
        }
    }

    fn commit_selected(&mut self) {
        if let Some(Field {
            kind: FieldKind::Number(n),
            ..
        }) = self.fields.get_mut(self.selected)
        {
            n.commit();
        }
    }

    /// Run a prediction for the current form.
    ///
    /// Returns false without touching the model when none is loaded.
    pub fn submit(&mut self, ctx: &AppContext) -> bool {
        if ctx.model().is_none() {
            return false;
        }

        for field in &mut self.fields {
            if let FieldKind::Number(n) = &mut field.kind {
                n.commit();
            }
        }

        let input = self.to_input();
        self.outcome = Some(match ctx.predict(&input) {
            Ok(valuation) => {
                info!(
                    estimate = valuation.prediction.estimate,
                    dropped = ?valuation.row.dropped(),
                    "Valuation produced"
                );
                Outcome::Valued { valuation, input }
            }
            Err(e) => {
                warn!(error = %e, "Prediction failed");
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        });
        true
    }
}

impl Default for PredictState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_key(state: &mut PredictState, ctx: &AppContext, key: KeyCode) -> Action {
    if key == KeyCode::Esc {
        state.commit_selected();
        return Action::Release;
    }

    // Form is disabled without a model
    if ctx.model().is_none() {
        return Action::None;
    }

    if key == KeyCode::Tab {
        state.tab = match state.tab {
            Tab::Simple => Tab::Advanced,
            Tab::Advanced => Tab::Simple,
        };
        return Action::None;
    }

    if state.tab == Tab::Advanced {
        return Action::None;
    }

    match key {
        KeyCode::Up => {
            state.commit_selected();
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            state.commit_selected();
            if state.selected < state.fields.len() {
                state.selected += 1;
            }
        }
        KeyCode::Enter => {
            state.submit(ctx);
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(_) | KeyCode::Backspace => {
            if let Some(field) = state.fields.get_mut(state.selected) {
                edit_field(field, key);
            }
        }
        _ => {}
    }

    Action::None
}

fn edit_field(field: &mut Field, key: KeyCode) {
    match (&mut field.kind, key) {
        (FieldKind::Number(n), KeyCode::Right) => n.increment(),
        (FieldKind::Number(n), KeyCode::Left) => n.decrement(),
        (FieldKind::Number(n), KeyCode::Char(c)) => {
            if let Some(d) = c.to_digit(10) {
                n.push_digit(d);
            }
        }
        (FieldKind::Number(n), KeyCode::Backspace) => n.pop_digit(),
        (FieldKind::Text(s), KeyCode::Char(c)) => s.push(c),
        (FieldKind::Text(s), KeyCode::Backspace) => {
            s.pop();
        }
        (FieldKind::Choice(c), KeyCode::Right) => c.next(),
        (FieldKind::Choice(c), KeyCode::Left) => c.previous(),
        _ => {}
    }
}

pub fn draw(f: &mut Frame, area: Rect, ctx: &AppContext, state: &PredictState, focused: bool) {
    let (hero_area, body) = layout::page(area);
    f.render_widget(
        widgets::hero(
            "Predict Home Price",
            "Enter property details to get an instant valuation",
        ),
        hero_area,
    );

    if ctx.model().is_none() {
        draw_model_missing(f, body, ctx);
        return;
    }

    let rows = layout::rows(body, &[3]);
    let tabs = Tabs::new(vec!["Simple Form", "Advanced"])
        .select(match state.tab {
            Tab::Simple => 0,
            Tab::Advanced => 1,
        })
        .style(Theme::muted())
        .highlight_style(Theme::highlight())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" Property Details ", Theme::title())),
        );
    f.render_widget(tabs, rows[0]);

    match state.tab {
        Tab::Simple => draw_simple(f, rows[1], ctx, state, focused),
        Tab::Advanced => draw_advanced(f, rows[1], ctx),
    }
}

fn draw_model_missing(f: &mut Frame, area: Rect, ctx: &AppContext) {
    let mut lines = vec![
        Line::from(Span::styled(
            "⚠ Model not loaded. Please check the models directory.",
            Theme::error(),
        )),
        Line::from(""),
    ];
    if let Some(reason) = ctx.model_error() {
        lines.push(Line::from(Span::styled(reason.to_string(), Theme::muted())));
    }
    f.render_widget(widgets::info_card("Prediction unavailable", lines), area);
}

fn draw_simple(f: &mut Frame, area: Rect, ctx: &AppContext, state: &PredictState, focused: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_form(f, cols[0], ctx, state, focused);
    draw_outcome(f, cols[1], ctx, state.outcome.as_ref());
}

fn draw_form(f: &mut Frame, area: Rect, ctx: &AppContext, state: &PredictState, focused: bool) {
    let mut lines = Vec::new();

    if ctx.feature_builder().using_fallback() {
        lines.push(Line::from(Span::styled(
            "Feature schema not found. Using simplified prediction form.",
            Theme::warn(),
        )));
        lines.push(Line::from(""));
    }

    for (i, field) in state.fields().iter().enumerate() {
        if i == CITY {
            lines.push(Line::from(Span::styled("Location & Features", Theme::title())));
        } else if i == LIVING_AREA {
            lines.push(Line::from(Span::styled("Basic Information", Theme::title())));
        }

        let selected = focused && i == state.selected();
        let value_style = match &field.kind {
            FieldKind::Number(n) if !n.in_bounds() => Theme::warn(),
            _ if selected => Theme::highlight(),
            _ => Theme::strong(),
        };

        let mut spans = vec![
            Span::styled(if selected { "▶ " } else { "  " }, Theme::title()),
            Span::styled(format!("{:<22}", field.label), Theme::text()),
            Span::styled(field.display(), value_style),
        ];
        if let Some(hint) = field.hint() {
            spans.push(Span::styled(format!("  [{hint}]"), Theme::muted()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let button_style = if focused && state.on_button() {
        Theme::highlight()
    } else {
        Theme::title()
    };
    lines.push(
        Line::from(Span::styled("[ Predict Price ]", button_style)).alignment(Alignment::Center),
    );

    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        ),
        area,
    );
}

fn draw_outcome(f: &mut Frame, area: Rect, ctx: &AppContext, outcome: Option<&Outcome>) {
    match outcome {
        None => {
            let lines = vec![Line::from(Span::styled(
                "Fill in the form and press Enter to value the property.",
                Theme::muted(),
            ))];
            f.render_widget(widgets::info_card("Valuation", lines), area);
        }
        Some(Outcome::Failed { message }) => {
            let lines = vec![
                Line::from(Span::styled(format!("✗ Prediction failed: {message}"), Theme::error())),
                Line::from(""),
                Line::from(Span::styled(FAILURE_HINT, Theme::info())),
            ];
            f.render_widget(widgets::info_card("Valuation", lines), area);
        }
        Some(Outcome::Valued { valuation, input }) => draw_valuation(f, area, ctx, valuation, input),
    }
}

fn draw_valuation(
    f: &mut Frame,
    area: Rect,
    ctx: &AppContext,
    valuation: &Valuation,
    input: &PropertyInput,
) {
    let rows = layout::rows(area, &[5, 5]);
    let prediction = &valuation.prediction;

    let model_label = ctx
        .model()
        .map(|m| m.display_name())
        .unwrap_or_default();
    f.render_widget(
        widgets::metric_card(
            "Estimated Home Value",
            dollars(prediction.estimate),
            &format!("Based on {model_label} analysis"),
            Theme::SECONDARY,
        ),
        rows[0],
    );

    let cols = layout::columns(rows[1], 3);
    let band = [
        ("Conservative", prediction.band.lower, Theme::PRIMARY),
        ("Most Likely", prediction.estimate, Theme::CORAL),
        ("Optimistic", prediction.band.upper, Theme::PRIMARY),
    ];
    for ((label, amount, color), col) in band.into_iter().zip(cols) {
        f.render_widget(widgets::metric_card(label, dollars(amount), "", color), col);
    }

    let living_area = format!("Living Area: {} sq ft", thousands(input.living_area as i64));
    let bedrooms = format!("Bedrooms: {}", input.bedrooms);
    let bathrooms = format!("Bathrooms: {}", input.bathrooms);
    let year_built = format!("Year Built: {}", input.year_built);
    let garage = format!("Garage: {} spaces", input.garage_spaces);
    let stories = format!("Stories: {}", input.stories);
    let property_type = format!("Property Type: {}", input.property_type);
    let condition = format!("Condition: {}", input.condition);
    let location = format!("Location: {} {}", input.city, input.postal_code);

    let mut lines = widgets::bullets(&[
        &living_area,
        &bedrooms,
        &bathrooms,
        &year_built,
        &garage,
        &stories,
        &property_type,
        &condition,
        &location,
    ]);

    if !valuation.row.dropped().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Not used by this model: {}",
                valuation.row.dropped().join(", ")
            ),
            Theme::warn(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Tip: ", Theme::strong()),
        Span::styled(MARKET_TIP, Theme::info()),
    ]));

    f.render_widget(
        widgets::info_card("Property Summary", lines).wrap(Wrap { trim: true }),
        rows[2],
    );
}

fn draw_advanced(f: &mut Frame, area: Rect, ctx: &AppContext) {
    let builder = ctx.feature_builder();
    let columns = builder.columns();

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "For demonstration purposes. In production, this would include all {} features with proper encoding.",
                thousands(columns.len() as i64)
            ),
            Theme::warn(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Model expects {} features", columns.len()),
            Theme::strong(),
        )),
        Line::from(Span::styled(
            format!("Sample features (first {ADVANCED_SAMPLE}):"),
            Theme::text(),
        )),
    ];

    for (i, name) in columns.iter().take(ADVANCED_SAMPLE).enumerate() {
        let mut spans = vec![Span::styled(format!("{:>3}. {name}", i + 1), Theme::text())];
        if let Some(kind) = ctx.metadata().feature_type(name) {
            spans.push(Span::styled(format!("  ({kind})"), Theme::muted()));
        }
        lines.push(Line::from(spans));
    }

    if columns.len() > ADVANCED_SAMPLE {
        lines.push(Line::from(Span::styled(
            format!("... and {} more features", columns.len() - ADVANCED_SAMPLE),
            Theme::muted(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Note: the advanced feature input is designed for API integration or batch predictions \
(see the batch_predict tool). Use the Simple Form for manual predictions.",
        Theme::info(),
    )));

    f.render_widget(widgets::info_card("Advanced Feature Input", lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::metadata::MetadataBundle;
    use crate::models::inference::tests::{model, FailingRegressor, FixedRegressor};
    use crate::models::Regressor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn context_with(regressor: impl Regressor + 'static) -> AppContext {
        AppContext::new(AppConfig::default(), Ok(model(regressor)), MetadataBundle::default())
    }

    /// Counts calls so tests can prove the model was never reached
    struct CountingRegressor(Arc<AtomicUsize>);

    impl Regressor for CountingRegressor {
        fn input_width(&self) -> Option<usize> {
            None
        }

        fn predict_row(&self, _features: &[f32]) -> anyhow::Result<f64> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(1.0)
        }
    }

    /// Fails on the first call only
    struct FlakyRegressor(AtomicUsize);

    impl Regressor for FlakyRegressor {
        fn input_width(&self) -> Option<usize> {
            None
        }

        fn predict_row(&self, _features: &[f32]) -> anyhow::Result<f64> {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("input shape mismatch")
            }
            Ok(200_000.0)
        }
    }

    #[test]
    fn test_default_form_values() {
        let state = PredictState::with_max_year(2025);
        let input = state.to_input();

        assert_eq!(input, PropertyInput::default());
    }

    #[test]
    fn test_submit_without_model_is_blocked() {
        let ctx = AppContext::new(
            AppConfig::default(),
            Err("no model file".to_string()),
            MetadataBundle::default(),
        );
        let mut state = PredictState::with_max_year(2025);

        assert!(!state.submit(&ctx));
        assert!(state.outcome.is_none());

        assert_eq!(handle_key(&mut state, &ctx, KeyCode::Enter), Action::None);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_enter_runs_prediction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ctx = context_with(CountingRegressor(calls.clone()));
        let mut state = PredictState::with_max_year(2025);

        handle_key(&mut state, &ctx, KeyCode::Enter);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(state.outcome, Some(Outcome::Valued { .. })));
    }

    #[test]
    fn test_band_shown_for_estimate() {
        let ctx = context_with(FixedRegressor {
            width: None,
            estimate: 300_000.0,
        });
        let mut state = PredictState::with_max_year(2025);
        state.submit(&ctx);

        match &state.outcome {
            Some(Outcome::Valued { valuation, .. }) => {
                assert_eq!(valuation.prediction.band.lower, 270_000.0);
                assert_eq!(valuation.prediction.band.upper, 330_000.0);
                assert_eq!(dollars(valuation.prediction.band.lower), "$270,000");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_failure_message_then_recovery() {
        let ctx = context_with(FlakyRegressor(AtomicUsize::new(0)));
        let mut state = PredictState::with_max_year(2025);

        state.submit(&ctx);
        match &state.outcome {
            Some(Outcome::Failed { message }) => assert!(message.contains("input shape mismatch")),
            other => panic!("unexpected outcome {other:?}"),
        }

        state.submit(&ctx);
        assert!(matches!(state.outcome, Some(Outcome::Valued { .. })));
    }

    #[test]
    fn test_always_failing_model_keeps_serving() {
        let ctx = context_with(FailingRegressor);
        let mut state = PredictState::with_max_year(2025);

        for _ in 0..3 {
            assert!(state.submit(&ctx));
            assert!(matches!(state.outcome, Some(Outcome::Failed { .. })));
        }
    }

    #[test]
    fn test_editing_fields() {
        let ctx = context_with(FixedRegressor {
            width: None,
            estimate: 1.0,
        });
        let mut state = PredictState::with_max_year(2025);

        // Living area: +100
        handle_key(&mut state, &ctx, KeyCode::Right);
        // Bedrooms: type 12, clamped to 10 on leaving the field
        handle_key(&mut state, &ctx, KeyCode::Down);
        handle_key(&mut state, &ctx, KeyCode::Backspace);
        handle_key(&mut state, &ctx, KeyCode::Char('1'));
        handle_key(&mut state, &ctx, KeyCode::Char('2'));
        handle_key(&mut state, &ctx, KeyCode::Down);

        // City: replace the last character
        for _ in 0..4 {
            handle_key(&mut state, &ctx, KeyCode::Down);
        }
        assert_eq!(state.selected(), CITY);
        handle_key(&mut state, &ctx, KeyCode::Backspace);
        handle_key(&mut state, &ctx, KeyCode::Char('X'));

        // Condition: previous wraps to "Poor"
        for _ in 0..3 {
            handle_key(&mut state, &ctx, KeyCode::Down);
        }
        handle_key(&mut state, &ctx, KeyCode::Left);

        let input = state.to_input();
        assert_eq!(input.living_area, 2100.0);
        assert_eq!(input.bedrooms, 10);
        assert_eq!(input.city, "Baton RougX");
        assert_eq!(input.condition, "Poor");
    }

    #[test]
    fn test_tab_switches_and_esc_releases() {
        let ctx = context_with(FixedRegressor {
            width: None,
            estimate: 1.0,
        });
        let mut state = PredictState::with_max_year(2025);

        handle_key(&mut state, &ctx, KeyCode::Tab);
        assert_eq!(state.tab, Tab::Advanced);
        // Enter does nothing on the advanced tab
        handle_key(&mut state, &ctx, KeyCode::Enter);
        assert!(state.outcome.is_none());

        assert_eq!(handle_key(&mut state, &ctx, KeyCode::Esc), Action::Release);
    }
}
