use riverbed_engine::cards::{parse_cards, Card};
use riverbed_engine::config::TableConfig;
use riverbed_engine::deck::Deck;
use riverbed_engine::errors::GameError;
use riverbed_engine::hand::Category;
use riverbed_engine::player::PlayerAction;
use riverbed_engine::table::{RevealKind, Stage, Table};

fn hole(s: &str) -> [Card; 2] {
    let cards = parse_cards(s).unwrap();
    [cards[0], cards[1]]
}

/// Heads-up table with the button on seat 0. `holes` are for seat 1 then
/// seat 0.
fn heads_up(holes: [[Card; 2]; 2], board: &str) -> Table {
    let board = parse_cards(board).unwrap();
    let deck = Deck::arranged(&holes, &board).unwrap();
    let mut t = Table::with_deck(TableConfig::default(), deck, 0).unwrap();
    t.seat_player(0, "alice", 100).unwrap();
    t.seat_player(1, "bob", 100).unwrap();
    t.start_hand_with_dealer(0).unwrap();
    t
}

fn check_down(t: &mut Table) {
    while let Some(seat) = t.turn_seat() {
        let action = if t.legal_actions(seat).unwrap().check {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        t.apply_action(seat, action).unwrap();
    }
}

#[test]
fn contested_winner_is_shown_and_loser_may_choose() {
    let mut t = heads_up([hole("Ks Kd"), hole("Qh Qc")], "2s 7d 9s Jd 4c");
    check_down(&mut t);
    assert_eq!(t.stage(), Stage::Showdown);

    let winners = t.last_winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].seat, 1);
    assert_eq!(winners[0].name, "bob");
    assert_eq!(winners[0].amount, 4);
    assert_eq!(winners[0].category, Some(Category::Pair.code()));
    assert_eq!(winners[0].category_name, "Pair");

    assert!(t.is_revealed(1));
    assert!(!t.is_revealed(0));
    assert_eq!(t.reveal_eligible().iter().copied().collect::<Vec<_>>(), vec![0]);

    let spectator = t.snapshot(None);
    assert_eq!(spectator.players[1].hole, Some(hole("Ks Kd")));
    assert_eq!(spectator.players[0].hole, None);
    assert_eq!(t.snapshot(Some(0)).players[0].hole, Some(hole("Qh Qc")));

    t.reveal(0, RevealKind::Show).unwrap();
    assert_eq!(t.snapshot(None).players[0].hole, Some(hole("Qh Qc")));
    assert_eq!(t.reveal(0, RevealKind::Show), Err(GameError::RevealNotAllowed(0)));
    assert_eq!(t.reveal(1, RevealKind::Muck), Err(GameError::RevealNotAllowed(1)));
}

#[test]
fn mucked_cards_stay_hidden() {
    let mut t = heads_up([hole("Ks Kd"), hole("Qh Qc")], "2s 7d 9s Jd 4c");
    check_down(&mut t);
    t.reveal(0, RevealKind::Muck).unwrap();
    assert_eq!(t.snapshot(None).players[0].hole, None);
    assert_eq!(t.reveal(0, RevealKind::Show), Err(GameError::RevealNotAllowed(0)));
    assert_eq!(t.player(1).unwrap().stack(), 102);
}

#[test]
fn split_pot_reveals_both_winners() {
    let mut t = heads_up([hole("2c 3d"), hole("4h 5h")], "As Ks Qs Js Ts");
    check_down(&mut t);
    let winners = t.last_winners();
    assert_eq!(winners.len(), 2);
    assert!(winners.iter().all(|w| w.amount == 2));
    assert!(winners
        .iter()
        .all(|w| w.category == Some(Category::StraightFlush.code())));
    assert!(t.is_revealed(0) && t.is_revealed(1));
    assert!(t.reveal_eligible().is_empty());
}

#[test]
fn all_in_showdown_tables_every_hand() {
    let mut t = heads_up([hole("Ks Kd"), hole("Qh Qc")], "2s 7d 9s Jd 4c");
    t.apply_action(0, PlayerAction::Raise(100)).unwrap();
    let out = t.apply_action(1, PlayerAction::Call).unwrap();

    assert!(out.hand_complete);
    assert_eq!(t.last_winners()[0].seat, 1);
    assert!(t.is_revealed(0) && t.is_revealed(1));
    assert!(t.reveal_eligible().is_empty());
    assert_eq!(t.snapshot(None).players[0].hole, Some(hole("Qh Qc")));
    assert_eq!(t.reveal(0, RevealKind::Muck), Err(GameError::RevealNotAllowed(0)));
}

#[test]
fn fold_winner_may_show_but_folded_player_may_not() {
    let mut t = heads_up([hole("Ks Kd"), hole("7h 2c")], "2s 7d 9s Jd 4c");
    t.apply_action(0, PlayerAction::Fold).unwrap();

    assert_eq!(t.last_winners()[0].seat, 1);
    assert_eq!(t.last_winners()[0].category, None);
    assert_eq!(t.last_winners()[0].category_name, "");
    assert!(!t.is_revealed(1));
    assert_eq!(t.snapshot(None).players[1].hole, None);

    assert_eq!(t.reveal(0, RevealKind::Show), Err(GameError::RevealNotAllowed(0)));
    t.reveal(1, RevealKind::Show).unwrap();
    assert_eq!(t.snapshot(Some(0)).players[1].hole, Some(hole("Ks Kd")));
}

#[test]
fn reveal_is_rejected_while_hand_is_live() {
    let mut t = heads_up([hole("Ks Kd"), hole("7h 2c")], "2s 7d 9s Jd 4c");
    assert_eq!(t.reveal(0, RevealKind::Show), Err(GameError::RevealNotAllowed(0)));
    assert_eq!(t.stage(), Stage::Preflop);
}

#[test]
fn snapshots_hide_other_hole_cards_during_play() {
    let mut t = Table::new(TableConfig::default(), Some(11)).unwrap();
    for seat in 0..3 {
        t.seat_player(seat, &format!("p{seat}"), 100).unwrap();
    }
    t.start_hand_with_dealer(0).unwrap();

    let spectator = t.snapshot(None);
    assert!(spectator.players.iter().all(|p| p.hole.is_none()));
    assert!(spectator.legal_actions.is_none());
    assert!(spectator.last_winners.is_empty());

    let own = t.snapshot(Some(1));
    assert!(own.players[1].hole.is_some());
    assert!(own.players[0].hole.is_none() && own.players[2].hole.is_none());
    // not seat 1's turn yet
    assert!(own.legal_actions.is_none());

    let acting = t.snapshot(Some(0));
    let legal = acting.legal_actions.expect("seat 0 is to act");
    assert_eq!(legal.call, Some(2));
    assert_eq!(acting.turn_seat, Some(0));
    assert_eq!(acting.dealer_seat, Some(0));
    assert_eq!(acting.small_blind, 1);
    assert_eq!(acting.big_blind, 2);
    assert_eq!(acting.pot, 3);
}

#[test]
fn snapshot_json_uses_camel_case() {
    let mut t = heads_up([hole("Ks Kd"), hole("Qh Qc")], "2s 7d 9s Jd 4c");
    let json: serde_json::Value = serde_json::from_str(&t.snapshot(Some(0)).to_json().unwrap()).unwrap();
    assert_eq!(json["stage"], "preflop");
    assert_eq!(json["turnSeat"], 0);
    assert_eq!(json["currentBet"], 2);
    assert_eq!(json["minRaiseIncrement"], 2);
    assert_eq!(json["legalActions"]["call"], 1);
    assert!(json.get("lastWinners").is_none());
    assert!(json["players"][1]["hole"].is_null());

    check_down(&mut t);
    let json: serde_json::Value = serde_json::from_str(&t.snapshot(None).to_json().unwrap()).unwrap();
    assert_eq!(json["stage"], "showdown");
    assert_eq!(json["lastWinners"][0]["seat"], 1);
    assert_eq!(json["lastWinners"][0]["categoryName"], "Pair");
    assert_eq!(json["revealEligible"][0], 0);
}
