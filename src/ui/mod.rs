//! Terminal user interface

pub mod app;
pub mod form;
pub mod format;
pub mod layout;
pub mod pages;
pub mod theme;
pub mod widgets;

pub use app::{run, App};
