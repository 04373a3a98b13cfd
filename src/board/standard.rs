//! The canonical standard map and starting position.
//!
//! Seventy-five regions with a symmetric adjacency list, thirty-four supply
//! centers, sub-coast data for the three split-coast regions, and the
//! twenty-two opening units. The table is curated: the upstream data this
//! was transcribed from carried misspellings, case slips, and one-sided
//! edges, all repaired here. `Board::new` re-checks symmetry on every load,
//! so a bad edit fails loudly instead of warping adjudication.

use std::collections::{BTreeMap, BTreeSet};

use super::player::Player;
use super::region::{Board, Region, RegionKind};
use super::state::{GameState, Phase};
use super::unit::UnitKind;

pub const NORTH_COAST: &str = "north coast";
pub const SOUTH_COAST: &str = "south coast";
pub const EAST_COAST: &str = "east coast";

struct RegionDef {
    name: &'static str,
    kind: RegionKind,
    supply: bool,
    neighbors: &'static [&'static str],
}

const fn land(name: &'static str, supply: bool, neighbors: &'static [&'static str]) -> RegionDef {
    RegionDef { name, kind: RegionKind::Land, supply, neighbors }
}

const fn coast(name: &'static str, supply: bool, neighbors: &'static [&'static str]) -> RegionDef {
    RegionDef { name, kind: RegionKind::Coast, supply, neighbors }
}

const fn sea(name: &'static str, neighbors: &'static [&'static str]) -> RegionDef {
    RegionDef { name, kind: RegionKind::Sea, supply: false, neighbors }
}

#[rustfmt::skip]
const REGIONS: &[RegionDef] = &[
    // Seas
    sea("Adriatic Sea", &["Albania", "Apulia", "Ionian Sea", "Trieste", "Venice"]),
    sea("Aegean Sea", &["Bulgaria", "Constantinople", "Eastern Mediterranean", "Greece", "Ionian Sea", "Smyrna"]),
    sea("Baltic Sea", &["Berlin", "Denmark", "Gulf of Bothnia", "Kiel", "Livonia", "Prussia", "Sweden"]),
    sea("Barents Sea", &["Norway", "Norwegian Sea", "St Petersburg"]),
    sea("Black Sea", &["Ankara", "Armenia", "Bulgaria", "Constantinople", "Rumania", "Sevastopol"]),
    sea("Eastern Mediterranean", &["Aegean Sea", "Ionian Sea", "Smyrna", "Syria"]),
    sea("English Channel", &["Belgium", "Brest", "Irish Sea", "London", "Mid Atlantic Ocean", "North Sea", "Picardy", "Wales"]),
    sea("Gulf of Bothnia", &["Baltic Sea", "Finland", "Livonia", "St Petersburg", "Sweden"]),
    sea("Gulf of Lyon", &["Marseilles", "Piedmont", "Spain", "Tuscany", "Tyrrhenian Sea", "Western Mediterranean"]),
    sea("Heligoland Bight", &["Denmark", "Holland", "Kiel", "North Sea"]),
    sea("Ionian Sea", &["Adriatic Sea", "Aegean Sea", "Albania", "Apulia", "Eastern Mediterranean", "Greece", "Naples", "Tunis", "Tyrrhenian Sea"]),
    sea("Irish Sea", &["English Channel", "Liverpool", "Mid Atlantic Ocean", "North Atlantic Ocean", "Wales"]),
    sea("Mid Atlantic Ocean", &["Brest", "English Channel", "Gascony", "Irish Sea", "North Africa", "North Atlantic Ocean", "Portugal", "Spain", "Western Mediterranean"]),
    sea("North Atlantic Ocean", &["Clyde", "Irish Sea", "Liverpool", "Mid Atlantic Ocean", "Norwegian Sea"]),
    sea("North Sea", &["Belgium", "Denmark", "Edinburgh", "English Channel", "Heligoland Bight", "Holland", "London", "Norway", "Norwegian Sea", "Skagerrak", "Yorkshire"]),
    sea("Norwegian Sea", &["Barents Sea", "Clyde", "Edinburgh", "North Atlantic Ocean", "North Sea", "Norway"]),
    sea("Skagerrak", &["Denmark", "North Sea", "Norway", "Sweden"]),
    sea("Tyrrhenian Sea", &["Gulf of Lyon", "Ionian Sea", "Naples", "Rome", "Tunis", "Tuscany", "Western Mediterranean"]),
    sea("Western Mediterranean", &["Gulf of Lyon", "Mid Atlantic Ocean", "North Africa", "Spain", "Tunis", "Tyrrhenian Sea"]),
    // Inland
    land("Bohemia", false, &["Galicia", "Munich", "Silesia", "Tyrolia", "Vienna"]),
    land("Budapest", true, &["Galicia", "Rumania", "Serbia", "Trieste", "Vienna"]),
    land("Burgundy", false, &["Belgium", "Gascony", "Marseilles", "Munich", "Paris", "Picardy", "Ruhr"]),
    land("Galicia", false, &["Bohemia", "Budapest", "Rumania", "Silesia", "Ukraine", "Vienna", "Warsaw"]),
    land("Moscow", true, &["Livonia", "Sevastopol", "St Petersburg", "Ukraine", "Warsaw"]),
    land("Munich", true, &["Berlin", "Bohemia", "Burgundy", "Kiel", "Ruhr", "Silesia", "Tyrolia"]),
    land("Paris", true, &["Brest", "Burgundy", "Gascony", "Picardy"]),
    land("Ruhr", false, &["Belgium", "Burgundy", "Holland", "Kiel", "Munich"]),
    land("Serbia", true, &["Albania", "Budapest", "Bulgaria", "Greece", "Rumania", "Trieste"]),
    land("Silesia", false, &["Berlin", "Bohemia", "Galicia", "Munich", "Prussia", "Warsaw"]),
    land("Tyrolia", false, &["Bohemia", "Munich", "Piedmont", "Trieste", "Venice", "Vienna"]),
    land("Ukraine", false, &["Galicia", "Moscow", "Rumania", "Sevastopol", "Warsaw"]),
    land("Vienna", true, &["Bohemia", "Budapest", "Galicia", "Trieste", "Tyrolia"]),
    land("Warsaw", true, &["Galicia", "Livonia", "Moscow", "Prussia", "Silesia", "Ukraine"]),
    // Coastal
    coast("Albania", false, &["Adriatic Sea", "Greece", "Ionian Sea", "Serbia", "Trieste"]),
    coast("Ankara", true, &["Armenia", "Black Sea", "Constantinople", "Smyrna"]),
    coast("Apulia", false, &["Adriatic Sea", "Ionian Sea", "Naples", "Rome", "Venice"]),
    coast("Armenia", false, &["Ankara", "Black Sea", "Sevastopol", "Smyrna", "Syria"]),
    coast("Belgium", true, &["Burgundy", "English Channel", "Holland", "North Sea", "Picardy", "Ruhr"]),
    coast("Berlin", true, &["Baltic Sea", "Kiel", "Munich", "Prussia", "Silesia"]),
    coast("Brest", true, &["English Channel", "Gascony", "Mid Atlantic Ocean", "Paris", "Picardy"]),
    coast("Bulgaria", true, &["Aegean Sea", "Black Sea", "Constantinople", "Greece", "Rumania", "Serbia"]),
    coast("Clyde", false, &["Edinburgh", "Liverpool", "North Atlantic Ocean", "Norwegian Sea"]),
    coast("Constantinople", true, &["Aegean Sea", "Ankara", "Black Sea", "Bulgaria", "Smyrna"]),
    coast("Denmark", true, &["Baltic Sea", "Heligoland Bight", "Kiel", "North Sea", "Skagerrak", "Sweden"]),
    coast("Edinburgh", true, &["Clyde", "Liverpool", "North Sea", "Norwegian Sea", "Yorkshire"]),
    coast("Finland", false, &["Gulf of Bothnia", "Norway", "St Petersburg", "Sweden"]),
    coast("Gascony", false, &["Brest", "Burgundy", "Marseilles", "Mid Atlantic Ocean", "Paris", "Spain"]),
    coast("Greece", true, &["Aegean Sea", "Albania", "Bulgaria", "Ionian Sea", "Serbia"]),
    coast("Holland", true, &["Belgium", "Heligoland Bight", "Kiel", "North Sea", "Ruhr"]),
    coast("Kiel", true, &["Baltic Sea", "Berlin", "Denmark", "Heligoland Bight", "Holland", "Munich", "Ruhr"]),
    coast("Liverpool", true, &["Clyde", "Edinburgh", "Irish Sea", "North Atlantic Ocean", "Wales", "Yorkshire"]),
    coast("Livonia", false, &["Baltic Sea", "Gulf of Bothnia", "Moscow", "Prussia", "St Petersburg", "Warsaw"]),
    coast("London", true, &["English Channel", "North Sea", "Wales", "Yorkshire"]),
    coast("Marseilles", true, &["Burgundy", "Gascony", "Gulf of Lyon", "Piedmont", "Spain"]),
    coast("Naples", true, &["Apulia", "Ionian Sea", "Rome", "Tyrrhenian Sea"]),
    coast("North Africa", false, &["Mid Atlantic Ocean", "Tunis", "Western Mediterranean"]),
    coast("Norway", true, &["Barents Sea", "Finland", "North Sea", "Norwegian Sea", "Skagerrak", "St Petersburg", "Sweden"]),
    coast("Picardy", false, &["Belgium", "Brest", "Burgundy", "English Channel", "Paris"]),
    coast("Piedmont", false, &["Gulf of Lyon", "Marseilles", "Tuscany", "Tyrolia", "Venice"]),
    coast("Portugal", true, &["Mid Atlantic Ocean", "Spain"]),
    coast("Prussia", false, &["Baltic Sea", "Berlin", "Livonia", "Silesia", "Warsaw"]),
    coast("Rome", true, &["Apulia", "Naples", "Tuscany", "Tyrrhenian Sea", "Venice"]),
    coast("Rumania", true, &["Black Sea", "Budapest", "Bulgaria", "Galicia", "Serbia", "Sevastopol", "Ukraine"]),
    coast("Sevastopol", true, &["Armenia", "Black Sea", "Moscow", "Rumania", "Ukraine"]),
    coast("Smyrna", true, &["Aegean Sea", "Ankara", "Armenia", "Constantinople", "Eastern Mediterranean", "Syria"]),
    coast("Spain", true, &["Gascony", "Gulf of Lyon", "Marseilles", "Mid Atlantic Ocean", "Portugal", "Western Mediterranean"]),
    coast("St Petersburg", true, &["Barents Sea", "Finland", "Gulf of Bothnia", "Livonia", "Moscow", "Norway"]),
    coast("Sweden", true, &["Baltic Sea", "Denmark", "Finland", "Gulf of Bothnia", "Norway", "Skagerrak"]),
    coast("Syria", false, &["Armenia", "Eastern Mediterranean", "Smyrna"]),
    coast("Trieste", true, &["Adriatic Sea", "Albania", "Budapest", "Serbia", "Tyrolia", "Venice", "Vienna"]),
    coast("Tunis", true, &["Ionian Sea", "North Africa", "Tyrrhenian Sea", "Western Mediterranean"]),
    coast("Tuscany", false, &["Gulf of Lyon", "Piedmont", "Rome", "Tyrrhenian Sea", "Venice"]),
    coast("Venice", true, &["Adriatic Sea", "Apulia", "Piedmont", "Rome", "Trieste", "Tuscany", "Tyrolia"]),
    coast("Wales", false, &["English Channel", "Irish Sea", "Liverpool", "London", "Yorkshire"]),
    coast("Yorkshire", false, &["Edinburgh", "Liverpool", "London", "North Sea", "Wales"]),
];

/// Sub-coast adjacency for the three split-coast regions.
#[rustfmt::skip]
const SUB_COASTS: &[(&str, &[(&str, &[&str])])] = &[
    ("Bulgaria", &[
        (EAST_COAST, &["Black Sea", "Constantinople", "Rumania"]),
        (SOUTH_COAST, &["Aegean Sea", "Constantinople", "Greece"]),
    ]),
    ("Spain", &[
        (NORTH_COAST, &["Gascony", "Mid Atlantic Ocean", "Portugal"]),
        (SOUTH_COAST, &["Gulf of Lyon", "Marseilles", "Mid Atlantic Ocean", "Portugal", "Western Mediterranean"]),
    ]),
    ("St Petersburg", &[
        (NORTH_COAST, &["Barents Sea", "Norway"]),
        (SOUTH_COAST, &["Finland", "Gulf of Bothnia", "Livonia"]),
    ]),
];

/// Opening units per power, in unit-id order. Home supply centers double
/// as the starting ownership.
#[rustfmt::skip]
const POWERS: &[(&str, &[(UnitKind, &str, Option<&str>)], &[&str])] = &[
    ("Austria", &[
        (UnitKind::Army, "Vienna", None),
        (UnitKind::Army, "Budapest", None),
        (UnitKind::Navy, "Trieste", None),
    ], &["Vienna", "Budapest", "Trieste"]),
    ("England", &[
        (UnitKind::Navy, "London", None),
        (UnitKind::Army, "Liverpool", None),
        (UnitKind::Navy, "Edinburgh", None),
    ], &["London", "Liverpool", "Edinburgh"]),
    ("France", &[
        (UnitKind::Army, "Paris", None),
        (UnitKind::Navy, "Brest", None),
        (UnitKind::Army, "Marseilles", None),
    ], &["Paris", "Brest", "Marseilles"]),
    ("Germany", &[
        (UnitKind::Army, "Berlin", None),
        (UnitKind::Navy, "Kiel", None),
        (UnitKind::Army, "Munich", None),
    ], &["Berlin", "Kiel", "Munich"]),
    ("Italy", &[
        (UnitKind::Army, "Rome", None),
        (UnitKind::Army, "Venice", None),
        (UnitKind::Navy, "Naples", None),
    ], &["Rome", "Venice", "Naples"]),
    ("Russia", &[
        (UnitKind::Army, "Moscow", None),
        (UnitKind::Navy, "St Petersburg", Some(SOUTH_COAST)),
        (UnitKind::Army, "Warsaw", None),
        (UnitKind::Navy, "Sevastopol", None),
    ], &["Moscow", "St Petersburg", "Warsaw", "Sevastopol"]),
    ("Turkey", &[
        (UnitKind::Navy, "Ankara", None),
        (UnitKind::Army, "Constantinople", None),
        (UnitKind::Army, "Smyrna", None),
    ], &["Ankara", "Constantinople", "Smyrna"]),
];

/// Builds the validated standard board with no units or ownership.
pub fn standard_board() -> Board {
    let sub_coasts: BTreeMap<&str, &[(&str, &[&str])]> = SUB_COASTS.iter().copied().collect();

    let regions = REGIONS
        .iter()
        .map(|def| Region {
            name: def.name.to_string(),
            kind: def.kind,
            supply_center: def.supply,
            neighbors: def.neighbors.iter().map(|n| n.to_string()).collect(),
            sub_coasts: sub_coasts
                .get(def.name)
                .map(|coasts| {
                    coasts
                        .iter()
                        .map(|(coast, reachable)| {
                            (
                                coast.to_string(),
                                reachable.iter().map(|r| r.to_string()).collect::<BTreeSet<_>>(),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
            occupant: None,
            owner: None,
        })
        .collect();

    Board::new(regions).expect("standard map data is canonical")
}

/// Builds the opening game state. Identities are assigned to powers in the
/// order Austria, England, France, Germany, Italy, Russia, Turkey; the
/// twenty-two starting units take ids 1..=22 in that same order.
pub fn standard_state(identities: [&str; 7]) -> GameState {
    let mut state = GameState {
        board: standard_board(),
        units: BTreeMap::new(),
        players: BTreeMap::new(),
        phase: Phase::Movement,
        movement_parity: false,
        next_unit_id: 1,
    };

    for ((power, _, homes), identity) in POWERS.iter().zip(identities) {
        state.players.insert(
            identity.to_string(),
            Player::new(power, identity, homes.len() as u32),
        );
        for home in *homes {
            state.board.region_mut(home).owner = Some(power.to_string());
        }
    }

    for ((_, units, _), identity) in POWERS.iter().zip(identities) {
        for (kind, position, sub) in *units {
            state.spawn_unit(*kind, position, sub.map(str::to_string), identity);
        }
    }

    state
}
