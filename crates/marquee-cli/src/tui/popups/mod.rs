//! Popup overlays

pub mod common;
pub mod month_select;

pub use month_select::MonthSelectPopup;
