//! Regions and the board graph.
//!
//! A `Region` carries its static topology (kind, supply-center flag,
//! neighbors, sub-coasts) together with its per-turn occupancy and
//! ownership. The `Board` wrapper owns the region table, answers the
//! adjacency queries the validator and resolvers need, and checks the
//! topology invariants once at load time.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::unit::UnitId;

/// The terrain class of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Landlocked; armies only.
    Land,
    /// Touches the sea; armies and navies.
    Coast,
    /// Open water; navies only.
    Sea,
}

/// A named region of the map with its current occupancy and ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub kind: RegionKind,
    #[serde(rename = "supplyCenter")]
    pub supply_center: bool,
    pub neighbors: BTreeSet<String>,
    /// Coast name to the neighbor regions reachable from that coast.
    /// Empty for regions without split coastlines.
    #[serde(rename = "subCoasts", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_coasts: BTreeMap<String, BTreeSet<String>>,
    /// The non-dislodged unit currently in the region, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<UnitId>,
    /// The power name owning the region, if any. Only meaningful for
    /// supply centers; persists after the occupying unit leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Region {
    /// Returns true if the region has named sub-coasts.
    pub fn has_coasts(&self) -> bool {
        !self.sub_coasts.is_empty()
    }
}

/// Errors raised while loading map data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("duplicate region '{0}'")]
    DuplicateRegion(String),

    #[error("region '{region}' names unknown neighbor '{neighbor}'")]
    UnknownNeighbor { region: String, neighbor: String },

    #[error("one-sided edge: '{from}' lists '{to}' but not the reverse")]
    AsymmetricEdge { from: String, to: String },

    #[error("sea region '{sea}' borders landlocked region '{land}'")]
    SeaBordersInland { sea: String, land: String },

    #[error("coast '{coast}' of '{region}' names '{neighbor}', which is not a neighbor of the region")]
    BadSubCoast {
        region: String,
        coast: String,
        neighbor: String,
    },
}

/// The full region table, keyed by region name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    regions: BTreeMap<String, Region>,
}

impl Board {
    /// Builds a board from region definitions, validating the topology.
    ///
    /// Adjacency must be symmetric, sea regions may only border sea or
    /// coastal regions, and every sub-coast entry must name a neighbor of
    /// its region. Any violation is reported rather than silently patched.
    pub fn new(regions: Vec<Region>) -> Result<Board, MapError> {
        let mut table = BTreeMap::new();
        for region in regions {
            let name = region.name.clone();
            if table.insert(name.clone(), region).is_some() {
                return Err(MapError::DuplicateRegion(name));
            }
        }
        let board = Board { regions: table };
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<(), MapError> {
        for region in self.regions.values() {
            for neighbor in &region.neighbors {
                let other = self.regions.get(neighbor).ok_or_else(|| {
                    MapError::UnknownNeighbor {
                        region: region.name.clone(),
                        neighbor: neighbor.clone(),
                    }
                })?;
                if !other.neighbors.contains(&region.name) {
                    return Err(MapError::AsymmetricEdge {
                        from: region.name.clone(),
                        to: other.name.clone(),
                    });
                }
                if region.kind == RegionKind::Sea && other.kind == RegionKind::Land {
                    return Err(MapError::SeaBordersInland {
                        sea: region.name.clone(),
                        land: other.name.clone(),
                    });
                }
            }
            for (coast, reachable) in &region.sub_coasts {
                for neighbor in reachable {
                    if !region.neighbors.contains(neighbor) {
                        return Err(MapError::BadSubCoast {
                            region: region.name.clone(),
                            coast: coast.clone(),
                            neighbor: neighbor.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns true if the named region exists.
    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Looks up a region. Unknown names are programmer errors.
    pub fn region(&self, name: &str) -> &Region {
        &self.regions[name]
    }

    pub(crate) fn region_mut(&mut self, name: &str) -> &mut Region {
        self.regions.get_mut(name).expect("region name was validated")
    }

    pub fn kind(&self, name: &str) -> RegionKind {
        self.region(name).kind
    }

    pub fn is_supply(&self, name: &str) -> bool {
        self.region(name).supply_center
    }

    pub fn is_adjacent(&self, from: &str, to: &str) -> bool {
        self.region(from).neighbors.contains(to)
    }

    /// Returns true if `other` is reachable from the named coast of a
    /// split-coast region.
    pub fn is_coast_adjacent(&self, name: &str, coast: &str, other: &str) -> bool {
        self.region(name)
            .sub_coasts
            .get(coast)
            .is_some_and(|reachable| reachable.contains(other))
    }

    pub fn neighbors_of(&self, name: &str) -> &BTreeSet<String> {
        &self.region(name).neighbors
    }

    /// Iterates all regions in name order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}
