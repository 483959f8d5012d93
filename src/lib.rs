pub mod api;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod messages;
pub mod paths;
pub mod tui;
