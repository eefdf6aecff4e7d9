//! Host-facing actions.

pub mod check_today;
pub mod snake_game;

pub use check_today::{check_today, LogNotifier, Notifier};
pub use snake_game::{start_snake_game, FilePanelHost, PanelHost, PanelSpec};
