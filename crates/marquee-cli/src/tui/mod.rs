//! Terminal UI

pub mod app;
pub mod popups;
pub mod theme;
pub mod views;

pub use app::App;
