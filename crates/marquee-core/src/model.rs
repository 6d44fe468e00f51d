//! Data model for recommendations and watched history
//!
//! Field names mirror the backend JSON exactly (`Name`, `poster`,
//! `letterboxdUri`), so these types deserialize straight off the wire.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on rendered recommendation cards per request.
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Number of months in the fixed calendar window (Jan 2025 - Feb 2026).
pub const MONTH_COUNT: u8 = 14;

/// Labels for the fixed 14-month window, in order. Month indices are 1-based.
pub const MONTH_LABELS: [&str; MONTH_COUNT as usize] = [
    "January 2025",
    "February 2025",
    "March 2025",
    "April 2025",
    "May 2025",
    "June 2025",
    "July 2025",
    "August 2025",
    "September 2025",
    "October 2025",
    "November 2025",
    "December 2025",
    "January 2026",
    "February 2026",
];

/// Label for a 1-based month index, or `None` when out of range.
pub fn month_label(index: u8) -> Option<&'static str> {
    if (1..=MONTH_COUNT).contains(&index) {
        Some(MONTH_LABELS[index as usize - 1])
    } else {
        None
    }
}

/// A recommended movie as returned by `/recommend` or `recommendations.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Name")]
    pub name: String,
    /// Poster image URL. Only used to decide whether a real poster exists;
    /// the terminal renders a colored placeholder either way.
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Link to the movie's detail page, when the backend provides one.
    #[serde(rename = "letterboxdUri", default)]
    pub detail_uri: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// One watched-history entry, pre-formatted by the backend as "Title (Year)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    pub display: String,
}

/// Shuffle candidates uniformly and keep at most [`MAX_RECOMMENDATIONS`].
///
/// The original front end used a comparator-based random sort, which is not
/// a uniform shuffle; this is the Fisher-Yates replacement.
pub fn pick_recommendations(movies: Vec<Movie>) -> Vec<Movie> {
    pick_recommendations_with(movies, &mut rand::thread_rng())
}

/// Seedable variant of [`pick_recommendations`].
pub fn pick_recommendations_with<R: Rng>(mut movies: Vec<Movie>, rng: &mut R) -> Vec<Movie> {
    movies.shuffle(rng);
    movies.truncate(MAX_RECOMMENDATIONS);
    movies
}
