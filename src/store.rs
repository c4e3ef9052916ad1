//! Map Page State Store
//!
//! Uses Leptos reactive_stores so the marker layer and the match overlay
//! subscribe to their own fields.

use std::collections::HashMap;

use leptos::prelude::*;
use reactive_stores::Store;

use got_blood_core::dto::{HospitalLocationEntry, MatchRecord};
use got_blood_core::map::HospitalKey;
use got_blood_core::Loadable;

/// Map page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct MapState {
    /// `/hospital/data/loc` entries
    pub locations: Loadable<Vec<HospitalLocationEntry>>,
    /// Match candidates per hospital; each fetch writes only its own key
    pub matches: HashMap<HospitalKey, Vec<MatchRecord>>,
}

impl MapState {
    pub fn new() -> Self {
        Self {
            locations: Loadable::pending(),
            ..Default::default()
        }
    }
}

pub type MapStore = Store<MapState>;

// ========================
// Store Helper Functions
// ========================

/// Record the match list of one hospital
pub fn store_set_matches(store: &MapStore, key: HospitalKey, matches: Vec<MatchRecord>) {
    store.matches().write().insert(key, matches);
}
