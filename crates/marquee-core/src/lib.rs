//! Core library for marquee - a terminal client for a movie-recommendation
//! backend.
//!
//! Everything that is not terminal rendering lives here: the data model for
//! recommendations and watched history, the month window, the data-source
//! trait with its backend and snapshot implementations, configuration, and
//! path helpers.

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod source;
