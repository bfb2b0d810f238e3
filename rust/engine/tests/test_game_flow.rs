use riverbed_engine::config::TableConfig;
use riverbed_engine::errors::GameError;
use riverbed_engine::player::PlayerAction;
use riverbed_engine::table::{Stage, Table};

fn table_with(config: TableConfig, stacks: &[u32]) -> Table {
    let mut t = Table::new(config, Some(42)).expect("valid config");
    for (seat, &stack) in stacks.iter().enumerate() {
        t.seat_player(seat, &format!("p{seat}"), stack).expect("seat");
    }
    t
}

fn deep_config() -> TableConfig {
    TableConfig {
        small_blind: 5,
        big_blind: 10,
        buy_in_default: 1000,
        buy_in_min: 10,
        max_seats: 6,
    }
}

#[test]
fn heads_up_limp_and_check_reaches_flop() {
    let mut t = Table::new(TableConfig::default(), Some(3)).unwrap();
    t.seat_player(0, "A", 100).unwrap();
    t.seat_player(1, "B", 100).unwrap();
    t.start_hand_with_dealer(0).unwrap();

    assert_eq!(t.small_blind_seat(), Some(0));
    assert_eq!(t.big_blind_seat(), Some(1));
    assert_eq!(t.current_bet(), 2);
    assert_eq!(t.turn_seat(), Some(0));
    assert_eq!(t.legal_actions(0).unwrap().call, Some(1));

    let out = t.apply_action(0, PlayerAction::Call).unwrap();
    assert!(!out.street_closed);
    let a = t.player(0).unwrap();
    assert_eq!(a.stack(), 98);
    assert_eq!(a.contributed_this_street(), 2);
    assert_eq!(t.turn_seat(), Some(1));

    let out = t.apply_action(1, PlayerAction::Check).unwrap();
    assert!(out.street_closed);
    assert_eq!(out.stage, Stage::Flop);
    assert_eq!(t.pot(), 4);
    assert_eq!(t.current_bet(), 0);
    assert_eq!(t.community().len(), 3);
    // the big blind acts first after the flop
    assert_eq!(t.turn_seat(), Some(1));
    assert!(t.players().all(|p| p.contributed_this_street() == 0));
}

#[test]
fn big_blind_gets_the_option_after_limps() {
    let mut t = table_with(TableConfig::default(), &[100, 100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    assert_eq!(t.turn_seat(), Some(0));
    t.apply_action(0, PlayerAction::Call).unwrap();
    t.apply_action(1, PlayerAction::Call).unwrap();

    assert_eq!(t.stage(), Stage::Preflop);
    assert_eq!(t.turn_seat(), Some(2));
    let legal = t.legal_actions(2).unwrap();
    assert!(legal.check);
    assert_eq!(legal.call, None);
    assert_eq!(legal.raise.map(|r| r.min), Some(4));

    t.apply_action(2, PlayerAction::Check).unwrap();
    assert_eq!(t.stage(), Stage::Flop);
    assert_eq!(t.pot(), 6);
    assert_eq!(t.turn_seat(), Some(1));
}

#[test]
fn everyone_folds_to_big_blind() {
    let mut t = table_with(TableConfig::default(), &[100, 100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Fold).unwrap();
    let out = t.apply_action(1, PlayerAction::Fold).unwrap();

    assert!(out.hand_complete);
    assert_eq!(t.stage(), Stage::Showdown);
    assert_eq!(t.turn_seat(), None);
    assert!(t.community().is_empty());
    assert_eq!(t.pot(), 0);
    let winners = t.last_winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].seat, 2);
    assert_eq!(winners[0].amount, 3);
    assert_eq!(winners[0].category, None);
    assert_eq!(t.player(2).unwrap().stack(), 101);
    assert_eq!(t.player(1).unwrap().stack(), 99);
    assert_eq!(t.chips_in_play(), 300);
}

#[test]
fn fold_out_on_the_flop_skips_remaining_streets() {
    let mut t = table_with(TableConfig::default(), &[100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Call).unwrap();
    t.apply_action(1, PlayerAction::Check).unwrap();
    t.apply_action(1, PlayerAction::Bet(4)).unwrap();
    t.apply_action(0, PlayerAction::Fold).unwrap();

    assert_eq!(t.stage(), Stage::Showdown);
    assert_eq!(t.community().len(), 3);
    assert_eq!(t.last_winners()[0].seat, 1);
    assert_eq!(t.last_winners()[0].amount, 8);
    assert_eq!(t.player(1).unwrap().stack(), 102);
}

#[test]
fn all_in_and_call_runs_out_the_board() {
    let mut t = table_with(TableConfig::default(), &[100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Raise(100)).unwrap();
    let out = t.apply_action(1, PlayerAction::Call).unwrap();

    assert!(out.hand_complete);
    assert_eq!(t.stage(), Stage::Showdown);
    assert_eq!(t.community().len(), 5);
    assert_eq!(t.pot(), 0);
    assert_eq!(t.chips_in_play(), 200);
    let paid: u32 = t.last_winners().iter().map(|w| w.amount).sum();
    assert_eq!(paid, 200);
    assert!(t.last_winners().iter().all(|w| w.category.is_some()));
}

#[test]
fn checked_down_hand_visits_every_street() {
    let mut t = table_with(TableConfig::default(), &[100, 100, 100]);
    t.start_hand_with_dealer(1).unwrap();
    let mut stages = vec![t.stage()];
    while let Some(seat) = t.turn_seat() {
        let legal = t.legal_actions(seat).unwrap();
        let action = if legal.check {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        let out = t.apply_action(seat, action).unwrap();
        if out.street_closed {
            stages.push(out.stage);
        }
    }
    assert_eq!(
        stages,
        vec![Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River, Stage::Showdown]
    );
    assert_eq!(t.community().len(), 5);
    assert_eq!(t.chips_in_play(), 300);
}

#[test]
fn legal_actions_does_not_change_state() {
    let mut t = table_with(TableConfig::default(), &[100, 100, 100]);
    t.start_hand().unwrap();
    let seat = t.turn_seat().unwrap();
    let before = t.snapshot(Some(seat));
    let first = t.legal_actions(seat).unwrap();
    let second = t.legal_actions(seat).unwrap();
    assert_eq!(first, second);
    assert_eq!(t.snapshot(Some(seat)), before);
}

#[test]
fn rejected_actions_leave_table_unchanged() {
    let mut t = table_with(TableConfig::default(), &[100, 100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    let before = t.snapshot(None);

    assert!(matches!(
        t.apply_action(1, PlayerAction::Call),
        Err(GameError::NotYourTurn { expected: 0, actual: 1 })
    ));
    assert!(matches!(
        t.apply_action(0, PlayerAction::Raise(3)),
        Err(GameError::IllegalAmount { amount: 3, minimum: 4 })
    ));
    assert!(matches!(
        t.apply_action(0, PlayerAction::Raise(500)),
        Err(GameError::InsufficientStack { .. })
    ));
    assert!(matches!(
        t.apply_action(0, PlayerAction::Check),
        Err(GameError::ActionNotAvailable { seat: 0, action: "check" })
    ));
    assert!(matches!(
        t.apply_action(0, PlayerAction::Bet(10)),
        Err(GameError::ActionNotAvailable { seat: 0, action: "bet" })
    ));
    assert_eq!(
        t.apply_action(5, PlayerAction::Fold),
        Err(GameError::UnknownSeat(5))
    );

    assert_eq!(t.snapshot(None), before);
    assert!(t.hand_record().unwrap().actions.is_empty());
}

#[test]
fn actions_outside_a_betting_street_are_rejected() {
    let mut t = table_with(TableConfig::default(), &[100, 100]);
    assert_eq!(
        t.apply_action(0, PlayerAction::Check),
        Err(GameError::ActionNotAllowedInStage { stage: Stage::Waiting })
    );

    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Fold).unwrap();
    assert_eq!(t.stage(), Stage::Showdown);
    assert_eq!(
        t.apply_action(1, PlayerAction::Check),
        Err(GameError::ActionNotAllowedInStage { stage: Stage::Showdown })
    );
    assert!(matches!(
        t.legal_actions(1),
        Err(GameError::ActionNotAllowedInStage { .. })
    ));
}

#[test]
fn full_raise_sets_new_minimum_increment() {
    let mut t = table_with(TableConfig::default(), &[100, 100]);
    t.start_hand_with_dealer(0).unwrap();

    t.apply_action(0, PlayerAction::Raise(6)).unwrap();
    assert_eq!(t.current_bet(), 6);
    assert_eq!(t.min_raise_increment(), 4);
    assert_eq!(t.last_aggressor_seat(), Some(0));

    let legal = t.legal_actions(1).unwrap();
    assert_eq!(legal.call, Some(4));
    assert_eq!(legal.raise.map(|r| (r.min, r.max)), Some((10, 100)));
    assert_eq!(
        t.apply_action(1, PlayerAction::Raise(8)),
        Err(GameError::IllegalAmount { amount: 8, minimum: 10 })
    );
    t.apply_action(1, PlayerAction::Raise(10)).unwrap();
    assert_eq!(t.last_aggressor_seat(), Some(1));
    assert_eq!(t.turn_seat(), Some(0));
}

#[test]
fn short_all_in_raise_does_not_reopen_betting() {
    let mut t = table_with(deep_config(), &[1000, 1000, 28]);
    t.start_hand_with_dealer(0).unwrap();
    assert_eq!(t.big_blind_seat(), Some(2));

    t.apply_action(0, PlayerAction::Raise(20)).unwrap();
    t.apply_action(1, PlayerAction::Call).unwrap();

    // 8 over the 20 is less than the 10 increment
    let legal = t.legal_actions(2).unwrap();
    assert_eq!(legal.raise.map(|r| (r.min, r.max)), Some((28, 28)));
    t.apply_action(2, PlayerAction::Raise(28)).unwrap();
    assert!(t.player(2).unwrap().is_all_in());
    assert_eq!(t.current_bet(), 28);
    assert_eq!(t.min_raise_increment(), 10);
    assert_eq!(t.last_aggressor_seat(), Some(0));

    assert_eq!(t.turn_seat(), Some(0));
    let legal = t.legal_actions(0).unwrap();
    assert_eq!(legal.call, Some(8));
    assert_eq!(legal.raise, None);
    assert_eq!(
        t.apply_action(0, PlayerAction::Raise(50)),
        Err(GameError::ActionNotAvailable { seat: 0, action: "raise" })
    );
    t.apply_action(0, PlayerAction::Call).unwrap();
    assert_eq!(t.legal_actions(1).unwrap().raise, None);
    t.apply_action(1, PlayerAction::Call).unwrap();

    assert_eq!(t.stage(), Stage::Flop);
    assert_eq!(t.pot(), 84);
}

#[test]
fn short_all_in_still_lets_unacted_seats_raise() {
    let mut t = table_with(deep_config(), &[1000, 1000, 1000, 15]);
    t.start_hand_with_dealer(0).unwrap();
    // button 0, blinds 1 and 2, seat 3 first to act
    assert_eq!(t.turn_seat(), Some(3));
    t.apply_action(3, PlayerAction::Raise(15)).unwrap();
    assert_eq!(t.current_bet(), 15);
    assert_eq!(t.min_raise_increment(), 10);

    let legal = t.legal_actions(0).unwrap();
    assert_eq!(legal.call, Some(15));
    assert_eq!(legal.raise.map(|r| r.min), Some(25));
}

#[test]
fn postflop_bet_rules() {
    let mut t = table_with(deep_config(), &[200, 200]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Call).unwrap();
    t.apply_action(1, PlayerAction::Check).unwrap();
    assert_eq!(t.stage(), Stage::Flop);

    let legal = t.legal_actions(1).unwrap();
    assert!(legal.check);
    assert_eq!(legal.raise, None);
    assert_eq!(legal.bet.map(|b| (b.min, b.max)), Some((10, 190)));
    assert_eq!(
        t.apply_action(1, PlayerAction::Bet(5)),
        Err(GameError::IllegalAmount { amount: 5, minimum: 10 })
    );
    assert_eq!(
        t.apply_action(1, PlayerAction::Bet(191)),
        Err(GameError::InsufficientStack { amount: 191, stack: 190 })
    );
    t.apply_action(1, PlayerAction::Bet(30)).unwrap();
    assert_eq!(t.current_bet(), 30);
    assert_eq!(t.min_raise_increment(), 30);

    let legal = t.legal_actions(0).unwrap();
    assert!(!legal.check);
    assert_eq!(legal.bet, None);
    assert_eq!(legal.raise.map(|r| r.min), Some(60));
}

#[test]
fn calling_for_less_puts_player_all_in() {
    let mut t = table_with(deep_config(), &[300, 50]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Raise(100)).unwrap();
    assert_eq!(t.legal_actions(1).unwrap().call, Some(40));
    t.apply_action(1, PlayerAction::Call).unwrap();

    assert_eq!(t.stage(), Stage::Showdown);
    assert_eq!(t.community().len(), 5);
    assert_eq!(t.chips_in_play(), 350);
    assert!(t.player(0).unwrap().stack() >= 200);
}

#[test]
fn action_log_tracks_streets() {
    let mut t = table_with(TableConfig::default(), &[100, 100]);
    t.start_hand_with_dealer(0).unwrap();
    t.apply_action(0, PlayerAction::Call).unwrap();
    t.apply_action(1, PlayerAction::Check).unwrap();
    t.apply_action(1, PlayerAction::Bet(2)).unwrap();

    let rec = t.hand_record().unwrap();
    let stages: Vec<Stage> = rec.actions.iter().map(|a| a.stage).collect();
    assert_eq!(stages, vec![Stage::Preflop, Stage::Preflop, Stage::Flop]);
    assert_eq!(rec.actions[2].action, PlayerAction::Bet(2));
    assert_eq!(rec.dealer_seat, 0);
}
