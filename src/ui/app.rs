//! Dashboard shell: terminal setup, event loop, sidebar/page focus

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Block, Frame, Terminal};
use tracing::{debug, info};

use crate::context::AppContext;

use super::layout;
use super::pages::{about, analysis, home, predict, Action, Page};
use super::theme::Theme;
use super::widgets;

/// Which region owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Page,
}

pub struct App<'a> {
    ctx: &'a AppContext,
    pub page: Page,
    pub focus: Focus,
    pub predict: predict::PredictState,
    pub analysis: analysis::AnalysisState,
    pub about: about::AboutState,
}

impl<'a> App<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            page: Page::Home,
            focus: Focus::Sidebar,
            predict: predict::PredictState::new(),
            analysis: analysis::AnalysisState::new(),
            about: about::AboutState::new(),
        }
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let action = match self.focus {
            Focus::Sidebar => self.sidebar_key(key),
            Focus::Page => self.page_key(key),
        };

        match action {
            Action::Quit => return true,
            Action::Navigate(page) => {
                debug!(page = page.title(), "Navigate");
                self.page = page;
                self.focus = Focus::Page;
            }
            Action::Release => self.focus = Focus::Sidebar,
            Action::None => {}
        }
        false
    }

    fn sidebar_key(&mut self, key: KeyCode) -> Action {
        let i = self.page.index();
        match key {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up if i > 0 => {
                self.page = Page::ALL[i - 1];
                Action::None
            }
            KeyCode::Down if i + 1 < Page::ALL.len() => {
                self.page = Page::ALL[i + 1];
                Action::None
            }
            KeyCode::Enter | KeyCode::Right => Action::Navigate(self.page),
            _ => Action::None,
        }
    }

    fn page_key(&mut self, key: KeyCode) -> Action {
        match self.page {
            Page::Home => home::handle_key(key),
            Page::Predict => predict::handle_key(&mut self.predict, self.ctx, key),
            Page::Analysis => analysis::handle_key(&mut self.analysis, self.ctx, key),
            Page::About => about::handle_key(&mut self.about, key),
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let area = f.size();
        f.render_widget(Block::default().style(Theme::base()), area);

        let (sidebar_area, page_area, hint_area) = layout::root(area);
        f.render_widget(
            widgets::sidebar(self.page, self.focus == Focus::Sidebar),
            sidebar_area,
        );

        let focused = self.focus == Focus::Page;
        match self.page {
            Page::Home => home::draw(f, page_area, self.ctx),
            Page::Predict => predict::draw(f, page_area, self.ctx, &self.predict, focused),
            Page::Analysis => analysis::draw(f, page_area, self.ctx, &self.analysis),
            Page::About => about::draw(f, page_area, self.ctx, &self.about),
        }

        f.render_widget(widgets::hints(self.hints()), hint_area);
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match (self.focus, self.page) {
            (Focus::Sidebar, _) => &[("↑/↓", "choose page"), ("Enter", "open"), ("q", "quit")],
            (Focus::Page, Page::Home) => &[("Enter", "start predicting"), ("Esc", "back")],
            (Focus::Page, Page::Predict) => &[
                ("↑/↓", "field"),
                ("←/→", "adjust"),
                ("Tab", "simple/advanced"),
                ("Enter", "predict"),
                ("Esc", "back"),
            ],
            (Focus::Page, Page::Analysis) => &[
                ("←/→", "section"),
                ("↑/↓", "scroll"),
                ("f", "export importance"),
                ("s", "export summary"),
                ("Esc", "back"),
            ],
            (Focus::Page, Page::About) => &[("←/→", "topic"), ("Esc", "back")],
        }
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the dashboard until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(ctx: &AppContext) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let tick = Duration::from_millis(ctx.config().dashboard.tick_ms);
    let mut app = App::new(ctx);
    info!("Dashboard started");

    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(tick)? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(k.code) {
                    break;
                }
            }
        }
    }

    terminal.show_cursor()?;
    info!("Dashboard closed");
    Ok(())
}
