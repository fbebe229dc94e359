//! Region, portfolio and outcome types.
//!
//! Field names on the wire follow the projection feed (`state_full`,
//! `winstate_inc`, `winstate_chal`, `evs`) and the stored picks
//! (`displayName`, `selections`).

use crate::core::constants::MAX_PICKS;
use crate::core::SimError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One side of a two-way race. Blue is the incumbent party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Map a sampled "incumbent won" flag to a side.
    pub fn from_incumbent_won(won: bool) -> Self {
        if won {
            Side::Blue
        } else {
            Side::Red
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pick screen's tri-state. `None` never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Red,
    Blue,
    #[default]
    None,
}

impl Selection {
    pub fn side(self) -> Option<Side> {
        match self {
            Selection::Red => Some(Side::Red),
            Selection::Blue => Some(Side::Blue),
            Selection::None => None,
        }
    }
}

/// A contested region with the model's win probabilities (percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "state_full")]
    pub name: String,
    #[serde(rename = "winstate_inc")]
    pub p_inc: f64,
    #[serde(rename = "winstate_chal")]
    pub p_chal: f64,
    /// Electoral votes, carried for display only.
    #[serde(rename = "evs", default)]
    pub electoral_votes: u32,
}

impl Region {
    pub fn new(name: impl Into<String>, p_inc: f64, p_chal: f64) -> Self {
        Self {
            name: name.into(),
            p_inc,
            p_chal,
            electoral_votes: 0,
        }
    }

    pub fn with_electoral_votes(mut self, electoral_votes: u32) -> Self {
        self.electoral_votes = electoral_votes;
        self
    }

    /// Win probability (percent) of the given side.
    pub fn probability(&self, side: Side) -> f64 {
        match side {
            Side::Blue => self.p_inc,
            Side::Red => self.p_chal,
        }
    }

    /// The side with the greater published probability; red on a tie.
    pub fn favourite(&self) -> Side {
        Side::from_incumbent_won(self.p_inc > self.p_chal)
    }
}

/// One player's picks. Absent regions are "no pick".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub display_name: String,
    #[serde(default)]
    pub selections: BTreeMap<String, Side>,
}

impl Portfolio {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            selections: BTreeMap::new(),
        }
    }

    pub fn pick(mut self, region: impl Into<String>, side: Side) -> Self {
        self.selections.insert(region.into(), side);
        self
    }

    /// Build a portfolio from pick-screen selections, dropping `Selection::None`.
    pub fn from_selections<I, S>(display_name: impl Into<String>, selections: I) -> Self
    where
        I: IntoIterator<Item = (S, Selection)>,
        S: Into<String>,
    {
        let selections = selections
            .into_iter()
            .filter_map(|(region, selection)| selection.side().map(|side| (region.into(), side)))
            .collect();
        Self {
            display_name: display_name.into(),
            selections,
        }
    }

    pub fn num_picks(&self) -> usize {
        self.selections.len()
    }

    /// Enforce the wager limit.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.selections.len() > MAX_PICKS {
            return Err(SimError::TooManyPicks {
                player: self.display_name.clone(),
                picks: self.selections.len(),
                max: MAX_PICKS,
            });
        }
        Ok(())
    }
}

/// A fixed (possibly partial) assignment of winners to regions.
pub type Outcomes = BTreeMap<String, Side>;

/// Everything the engine consumes, as loaded by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionInput {
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
}

/// Name lookup over a read-only region slice.
///
/// When a name appears twice the first region wins, so every lookup agrees
/// with the order of the projection feed.
#[derive(Debug, Clone)]
pub struct RegionTable<'a> {
    regions: &'a [Region],
    index: HashMap<&'a str, usize>,
}

impl<'a> RegionTable<'a> {
    pub fn new(regions: &'a [Region]) -> Self {
        let mut index = HashMap::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            index.entry(region.name.as_str()).or_insert(i);
        }
        Self { regions, index }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &'a [Region] {
        self.regions
    }

    pub fn get(&self, index: usize) -> Option<&'a Region> {
        self.regions.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn find(&self, name: &str) -> Option<&'a Region> {
        self.position(name).map(|i| &self.regions[i])
    }
}
