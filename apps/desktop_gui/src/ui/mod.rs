//! UI layer: app shell, pages, the command history card, widgets, and the palette.

pub mod app;
pub mod command_log;
pub mod pages;
pub mod theme;
pub mod widgets;

pub use app::{GaminatorApp, PersistedUiState, APP_TITLE, UI_STATE_STORAGE_KEY};
