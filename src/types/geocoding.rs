//! Geocoding candidates and the outcome of resolving a free-text location name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One candidate returned by the geocoding endpoint for a location name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingCandidate {
    pub name: String,
    /// Localized names keyed by language code, when the upstream provides them.
    #[serde(default)]
    pub local_names: Option<HashMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Result of looking up a location name.
///
/// Only [`GeocodeOutcome::Found`] leads to a weather lookup. Several candidates are never
/// narrowed down automatically; they are handed back to the caller to disambiguate.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(GeocodingCandidate),
    NotFound,
    Ambiguous(Vec<GeocodingCandidate>),
}

impl GeocodeOutcome {
    pub fn from_candidates(mut candidates: Vec<GeocodingCandidate>) -> Self {
        match candidates.len() {
            0 => GeocodeOutcome::NotFound,
            1 => match candidates.pop() {
                Some(candidate) => GeocodeOutcome::Found(candidate),
                None => GeocodeOutcome::NotFound,
            },
            _ => GeocodeOutcome::Ambiguous(candidates),
        }
    }
}
