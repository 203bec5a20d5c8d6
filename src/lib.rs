pub mod color_utils;
pub mod config;
pub mod engine;
pub mod harmony;
pub mod history;
pub mod logging;
pub mod model;
pub mod storage;
pub mod studio;

#[cfg(feature = "tui")]
pub mod tui;
