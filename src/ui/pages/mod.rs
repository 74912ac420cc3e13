//! Dashboard pages; each has its own state, key handler and `draw`

pub mod about;
pub mod analysis;
pub mod home;
pub mod predict;

/// The four views selectable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Predict,
    Analysis,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Predict, Page::Analysis, Page::About];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Predict => "Predict",
            Page::Analysis => "Analysis",
            Page::About => "About",
        }
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

/// What a key press asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Switch to another page and give it the keyboard
    Navigate(Page),
    /// Hand the keyboard back to the sidebar
    Release,
}
