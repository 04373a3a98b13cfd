//! Snapshot round-trip and determinism checks.
//!
//! The serialized snapshot must reproduce an indistinguishable state, and
//! resolution must depend only on the set of finalized orders, never on
//! the order submissions arrived in.

use pretty_assertions::assert_eq;
use serde_json::json;

use entente::{Game, GameState};

const IDS: [&str; 7] = ["0xa1", "0xe1", "0xf1", "0xg1", "0xi1", "0xr1", "0xt1"];
const AUSTRIA: &str = "0xa1";
const ENGLAND: &str = "0xe1";
const FRANCE: &str = "0xf1";

fn ready_all(game: &mut Game) {
    for identity in IDS {
        game.advance(identity, br#"{"kind": "ReadyOrders", "payload": ""}"#)
            .expect("ready accepted");
    }
}

fn submit(game: &mut Game, sender: &str, kind: &str, payload: serde_json::Value) {
    let input = json!({"kind": kind, "payload": payload}).to_string();
    game.advance(sender, input.as_bytes()).expect("accepted");
}

fn mv(unit_id: u32, from: &str, to: &str) -> serde_json::Value {
    json!({"unitID": unit_id, "orderType": "move", "fromRegion": from, "toRegion": to})
}

#[test]
fn snapshot_round_trips() {
    let mut game = Game::standard(IDS);
    submit(&mut game, ENGLAND, "MoveArmy", mv(4, "London", "Wales"));
    ready_all(&mut game);

    let snapshot = game.inspect();
    let restored: GameState =
        serde_json::from_value(snapshot.clone()).expect("snapshot deserializes");
    assert_eq!(&restored, game.state());

    // The restored game answers identically and keeps playing.
    let mut resumed = Game::from_state(restored);
    assert_eq!(resumed.inspect(), snapshot);
    submit(&mut resumed, ENGLAND, "MoveArmy", mv(4, "Wales", "Irish Sea"));
    ready_all(&mut resumed);
    assert_eq!(resumed.state().unit(4).unwrap().position, "Irish Sea");
}

#[test]
fn snapshot_preserves_the_unit_id_counter() {
    let game = Game::standard(IDS);
    let restored: GameState = serde_json::from_value(game.inspect()).unwrap();
    assert_eq!(restored.next_unit_id, 23);
}

#[test]
fn resolution_ignores_submission_order() {
    let orders: Vec<(&str, serde_json::Value)> = vec![
        (ENGLAND, mv(4, "London", "English Channel")),
        (FRANCE, mv(8, "Brest", "English Channel")),
        (AUSTRIA, mv(1, "Vienna", "Tyrolia")),
        (
            AUSTRIA,
            json!({"unitID": 3, "orderType": "support hold", "toRegion": "Venice"}),
        ),
        (FRANCE, mv(9, "Marseilles", "Piedmont")),
    ];

    let mut forward = Game::standard(IDS);
    for (sender, payload) in &orders {
        submit(&mut forward, sender, "MoveArmy", payload.clone());
    }
    ready_all(&mut forward);

    let mut reversed = Game::standard(IDS);
    for (sender, payload) in orders.iter().rev() {
        submit(&mut reversed, sender, "MoveArmy", payload.clone());
    }
    ready_all(&mut reversed);

    assert_eq!(forward.inspect(), reversed.inspect());
}

#[test]
fn invariants_hold_after_a_busy_phase() {
    let mut game = Game::standard(IDS);
    submit(&mut game, ENGLAND, "MoveArmy", mv(4, "London", "North Sea"));
    submit(&mut game, FRANCE, "MoveArmy", mv(8, "Brest", "English Channel"));
    submit(&mut game, AUSTRIA, "MoveArmy", mv(1, "Vienna", "Galicia"));
    ready_all(&mut game);

    let state = game.state();
    // Every unit stands on a known region and is indexed by it.
    for unit in state.units.values() {
        assert!(state.board.contains(&unit.position));
        if !unit.is_dislodged() {
            assert_eq!(
                state.board.region(&unit.position).occupant,
                Some(unit.id),
                "{} out of sync",
                unit.position
            );
        }
    }
    // No region points at a missing or misplaced unit.
    for region in state.board.regions() {
        if let Some(id) = region.occupant {
            assert_eq!(state.unit(id).unwrap().position, region.name);
        }
    }
    // Rosters and the unit table agree.
    for player in state.players.values() {
        for id in &player.unit_ids {
            assert_eq!(&state.unit(*id).unwrap().owner, &player.identity);
        }
    }
}
