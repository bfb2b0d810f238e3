use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::history::{ActionRecord, HandRecord, WinnerInfo};
use crate::player::{Player, PlayerAction};
use crate::positions::{
    blind_seats, clockwise_from, first_to_act_postflop, first_to_act_preflop, next_dealer, next_seat,
    BlindSeats,
};
use crate::rules::{self, LegalActions, SeatView, ValidatedAction};
use crate::showdown;

/// Where the table is in the life of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// No hand has been started yet
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    /// Terminal for a hand, whether it was decided by cards or by folds
    Showdown,
}

impl Stage {
    /// True for the four streets on which players act.
    pub fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }

    fn next(self) -> Stage {
        match self {
            Stage::Waiting => Stage::Preflop,
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }

    fn community_cards(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Waiting => "waiting",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealKind {
    Show,
    Muck,
}

/// What an accepted action did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Stage after the action, including any automatic run-out
    pub stage: Stage,
    pub street_closed: bool,
    pub hand_complete: bool,
}

/// One cash-game table: seats, button, deck and the hand in progress.
///
/// All mutation goes through [`Table::start_hand`], [`Table::apply_action`]
/// and [`Table::reveal`]. A rejected call leaves the table unchanged.
///
/// # Examples
///
/// ```
/// use riverbed_engine::config::TableConfig;
/// use riverbed_engine::player::PlayerAction;
/// use riverbed_engine::table::{Stage, Table};
///
/// let mut table = Table::new(TableConfig::default(), Some(7)).unwrap();
/// table.seat_player(0, "alice", 100).unwrap();
/// table.seat_player(1, "bob", 100).unwrap();
/// table.start_hand().unwrap();
///
/// // heads-up: the button posts the small blind and acts first preflop
/// let button = table.dealer_seat().unwrap();
/// assert_eq!(table.turn_seat(), Some(button));
/// table.apply_action(button, PlayerAction::Call).unwrap();
/// let big_blind = table.turn_seat().unwrap();
/// let outcome = table.apply_action(big_blind, PlayerAction::Check).unwrap();
/// assert!(outcome.street_closed);
/// assert_eq!(table.stage(), Stage::Flop);
/// assert_eq!(table.pot(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    seed: u64,
    deck: Deck,
    seats: Vec<Option<Player>>,
    stage: Stage,
    dealer_seat: Option<usize>,
    blinds: Option<BlindSeats>,
    current_bet: u32,
    min_raise_increment: u32,
    full_raise_count: u32,
    pot: u32,
    community: Vec<Card>,
    turn_seat: Option<usize>,
    last_aggressor_seat: Option<usize>,
    last_winners: Vec<WinnerInfo>,
    reveal_eligible: BTreeSet<usize>,
    revealed: BTreeSet<usize>,
    hand_seq: u32,
    record: Option<HandRecord>,
}

impl Table {
    /// Creates an empty table. Without a seed one is drawn at random; either
    /// way [`Table::seed`] reports it so hands can be replayed.
    pub fn new(config: TableConfig, seed: Option<u64>) -> Result<Self, GameError> {
        let seed = seed.unwrap_or_else(rand::random);
        Self::with_deck(config, Deck::new_with_seed(seed), seed)
    }

    /// Creates a table dealing from `deck`, e.g. a [`Deck::arranged`] one.
    pub fn with_deck(config: TableConfig, deck: Deck, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let seats = vec![None; config.max_seats];
        Ok(Self {
            min_raise_increment: config.big_blind,
            config,
            seed,
            deck,
            seats,
            stage: Stage::Waiting,
            dealer_seat: None,
            blinds: None,
            current_bet: 0,
            full_raise_count: 0,
            pot: 0,
            community: Vec::with_capacity(5),
            turn_seat: None,
            last_aggressor_seat: None,
            last_winners: Vec::new(),
            reveal_eligible: BTreeSet::new(),
            revealed: BTreeSet::new(),
            hand_seq: 0,
            record: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn dealer_seat(&self) -> Option<usize> {
        self.dealer_seat
    }
    pub fn small_blind_seat(&self) -> Option<usize> {
        self.blinds.map(|b| b.small)
    }
    pub fn big_blind_seat(&self) -> Option<usize> {
        self.blinds.map(|b| b.big)
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise_increment(&self) -> u32 {
        self.min_raise_increment
    }
    /// Chips committed this hand and not yet paid out.
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn turn_seat(&self) -> Option<usize> {
        self.turn_seat
    }
    pub fn last_aggressor_seat(&self) -> Option<usize> {
        self.last_aggressor_seat
    }
    pub fn last_winners(&self) -> &[WinnerInfo] {
        &self.last_winners
    }
    /// Seats that may still show or muck.
    pub fn reveal_eligible(&self) -> &BTreeSet<usize> {
        &self.reveal_eligible
    }
    pub fn is_revealed(&self, seat: usize) -> bool {
        self.revealed.contains(&seat)
    }
    pub fn hand_record(&self) -> Option<&HandRecord> {
        self.record.as_ref()
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().flatten()
    }

    /// Sum of all stacks plus the undistributed pot. Constant while a hand
    /// is played.
    pub fn chips_in_play(&self) -> u64 {
        self.players().map(|p| u64::from(p.stack())).sum::<u64>() + u64::from(self.pot)
    }

    /// Seats a player. A player joining mid-hand waits for the next deal.
    pub fn seat_player(&mut self, seat: usize, name: &str, stack: u32) -> Result<(), GameError> {
        let slot = self.seats.get(seat).ok_or(GameError::UnknownSeat(seat))?;
        if slot.is_some() {
            return Err(GameError::SeatOccupied(seat));
        }
        if stack < self.config.buy_in_min {
            return Err(GameError::IllegalAmount {
                amount: stack,
                minimum: self.config.buy_in_min,
            });
        }
        self.ensure_chip_room(stack)?;
        self.seats[seat] = Some(Player::new(seat, name, stack));
        info!(seat, name, stack, "player seated");
        Ok(())
    }

    /// Removes a player. Anyone with chips in the current pot stays seated
    /// until the hand is settled.
    pub fn remove_player(&mut self, seat: usize) -> Result<Player, GameError> {
        let p = self.player(seat).ok_or(GameError::UnknownSeat(seat))?;
        if self.stage.is_betting() && (p.in_hand() || p.total_contributed() > 0) {
            return Err(GameError::HandInProgress);
        }
        self.seats[seat].take().ok_or(GameError::UnknownSeat(seat))
    }

    /// Rebuy between hands.
    pub fn add_chips(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        if self.stage.is_betting() && self.player(seat).is_some_and(Player::in_hand) {
            return Err(GameError::HandInProgress);
        }
        self.player(seat).ok_or(GameError::UnknownSeat(seat))?;
        self.ensure_chip_room(amount)?;
        self.player_mut(seat)?.add_chips(amount)
    }

    /// Keeps every stack, pot and side-pot sum representable as `u32`.
    fn ensure_chip_room(&self, amount: u32) -> Result<(), GameError> {
        let limit = u32::MAX;
        if self.chips_in_play() + u64::from(amount) > u64::from(limit) {
            return Err(GameError::ChipLimitExceeded { limit });
        }
        Ok(())
    }

    /// Starts the next hand, moving the button one eligible seat clockwise
    /// (the first eligible seat gets it on the table's first hand).
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        let n = self.seats.len();
        let dealer = next_dealer(n, self.dealer_seat, |s| self.eligible_for_deal(s))
            .ok_or(GameError::NotEnoughPlayers(0))?;
        // a lone eligible seat still gets the button; the deal below rejects it
        self.start_hand_with_dealer(dealer)
    }

    /// Starts a hand with the button on `dealer`.
    pub fn start_hand_with_dealer(&mut self, dealer: usize) -> Result<(), GameError> {
        if self.stage.is_betting() {
            return Err(GameError::HandInProgress);
        }
        let n = self.seats.len();
        let eligible: Vec<usize> = (0..n).filter(|&s| self.eligible_for_deal(s)).collect();
        if eligible.len() < 2 {
            return Err(GameError::NotEnoughPlayers(eligible.len()));
        }
        if !eligible.contains(&dealer) {
            return Err(GameError::UnknownSeat(dealer));
        }
        let blinds = blind_seats(n, dealer, |s| eligible.contains(&s))
            .ok_or(GameError::NotEnoughPlayers(eligible.len()))?;

        // deal into a scratch list first so a failure leaves the table as it was
        let mut deck = self.deck.clone();
        deck.shuffle();
        let order: Vec<usize> = clockwise_from(n, dealer).filter(|s| eligible.contains(s)).collect();
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(deck.draw()?);
        }
        let mut holes = Vec::with_capacity(order.len());
        for (seat, c0) in order.iter().zip(first) {
            holes.push((*seat, [c0, deck.draw()?]));
        }

        self.deck = deck;
        for p in self.seats.iter_mut().flatten() {
            p.reset_for_hand();
        }
        for (seat, hole) in holes {
            if let Some(p) = self.seats[seat].as_mut() {
                p.deal_in(hole);
            }
        }

        self.hand_seq += 1;
        self.record = Some(HandRecord::begin(self.hand_seq, Some(self.seed), dealer));
        self.stage = Stage::Preflop;
        self.dealer_seat = Some(dealer);
        self.blinds = Some(blinds);
        self.community.clear();
        self.pot = 0;
        self.full_raise_count = 0;
        self.last_winners.clear();
        self.reveal_eligible.clear();
        self.revealed.clear();

        let (sb, bb) = (self.config.small_blind, self.config.big_blind);
        self.post_blind(blinds.small, sb)?;
        self.post_blind(blinds.big, bb)?;
        self.current_bet = bb;
        self.min_raise_increment = bb;
        self.last_aggressor_seat = Some(blinds.big);

        info!(
            hand_id = self.record.as_ref().map(|r| r.hand_id.as_str()).unwrap_or_default(),
            dealer,
            small_blind_seat = blinds.small,
            big_blind_seat = blinds.big,
            players = order.len(),
            "hand started"
        );

        self.turn_seat = None;
        if self.street_complete() {
            // blinds put everyone but one all-in
            self.advance(blinds.big)?;
        } else {
            self.turn_seat = first_to_act_preflop(n, blinds, |s| self.pending(s));
        }
        Ok(())
    }

    /// Legal options for `seat`, which must be the seat to act.
    pub fn legal_actions(&self, seat: usize) -> Result<LegalActions, GameError> {
        let view = self.acting_view(seat)?;
        Ok(rules::legal_actions(&view))
    }

    /// Validates and applies an action for the seat to act.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownSeat`], [`GameError::ActionNotAllowedInStage`],
    /// [`GameError::NotYourTurn`], and the validation errors of
    /// [`rules::validate_action`]. Nothing changes when an error is returned.
    pub fn apply_action(&mut self, seat: usize, action: PlayerAction) -> Result<ActionOutcome, GameError> {
        let view = self.acting_view(seat)?;
        let validated = rules::validate_action(seat, &view, action).inspect_err(|e| {
            debug!(seat, ?action, error = %e, "action rejected");
        })?;

        let stage_before = self.stage;
        match validated {
            ValidatedAction::Fold => self.player_mut(seat)?.fold(),
            ValidatedAction::Check => self.player_mut(seat)?.mark_acted(true),
            ValidatedAction::Call(amount) => {
                self.commit(seat, amount)?;
                self.player_mut(seat)?.mark_acted(true);
            }
            ValidatedAction::Bet(amount) => {
                self.commit(seat, amount)?;
                self.raise_to(seat, amount)?;
            }
            ValidatedAction::Raise { to, add } => {
                self.commit(seat, add)?;
                self.raise_to(seat, to)?;
            }
        }
        let answered = self.full_raise_count;
        self.player_mut(seat)?.full_raises_seen = answered;

        if let Some(rec) = self.record.as_mut() {
            rec.actions.push(ActionRecord {
                seat,
                stage: stage_before,
                action,
            });
        }
        debug!(seat, ?action, pot = self.pot, current_bet = self.current_bet, "action applied");

        self.advance(seat)?;
        Ok(ActionOutcome {
            stage: self.stage,
            street_closed: self.stage != stage_before,
            hand_complete: self.stage == Stage::Showdown,
        })
    }

    /// Shows or mucks hole cards after the hand. Mucking only hides the
    /// cards; the payout is already settled.
    pub fn reveal(&mut self, seat: usize, kind: RevealKind) -> Result<(), GameError> {
        if self.stage != Stage::Showdown || !self.reveal_eligible.remove(&seat) {
            return Err(GameError::RevealNotAllowed(seat));
        }
        if kind == RevealKind::Show {
            self.revealed.insert(seat);
        }
        debug!(seat, ?kind, "reveal");
        Ok(())
    }

    fn eligible_for_deal(&self, seat: usize) -> bool {
        self.player(seat).is_some_and(|p| p.stack() > 0)
    }

    fn player_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        self.seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(GameError::UnknownSeat(seat))
    }

    fn acting_view(&self, seat: usize) -> Result<SeatView, GameError> {
        let p = self.player(seat).ok_or(GameError::UnknownSeat(seat))?;
        if !self.stage.is_betting() {
            return Err(GameError::ActionNotAllowedInStage { stage: self.stage });
        }
        match self.turn_seat {
            Some(turn) if turn == seat => {}
            Some(turn) => {
                return Err(GameError::NotYourTurn {
                    expected: turn,
                    actual: seat,
                })
            }
            None => return Err(GameError::ActionNotAllowedInStage { stage: self.stage }),
        }
        Ok(SeatView {
            stack: p.stack(),
            contributed: p.contributed_this_street(),
            current_bet: self.current_bet,
            min_raise_increment: self.min_raise_increment,
            big_blind: self.config.big_blind,
            may_raise: !p.has_acted_this_round() || p.full_raises_seen < self.full_raise_count,
        })
    }

    fn post_blind(&mut self, seat: usize, blind: u32) -> Result<(), GameError> {
        let amount = blind.min(self.player(seat).map_or(0, Player::stack));
        self.commit(seat, amount)
    }

    fn commit(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        let pot = self
            .pot
            .checked_add(amount)
            .ok_or(GameError::ChipLimitExceeded { limit: u32::MAX })?;
        self.player_mut(seat)?.commit(amount)?;
        self.pot = pot;
        Ok(())
    }

    /// Sets the new street level after a bet or raise. Only a full-size
    /// raise moves the minimum increment and the aggressor, and only a full
    /// raise lets seats that already acted raise again.
    fn raise_to(&mut self, seat: usize, to: u32) -> Result<(), GameError> {
        let delta = to.saturating_sub(self.current_bet);
        if delta >= self.min_raise_increment {
            self.min_raise_increment = delta;
            self.last_aggressor_seat = Some(seat);
            self.full_raise_count += 1;
        }
        self.current_bet = self.current_bet.max(to);
        self.player_mut(seat)?.mark_acted(true);
        Ok(())
    }

    fn needs_action(&self, p: &Player) -> bool {
        p.can_act() && (!p.has_acted_this_round() || p.contributed_this_street() < self.current_bet)
    }

    fn pending(&self, seat: usize) -> bool {
        self.player(seat).is_some_and(|p| self.needs_action(p))
    }

    fn street_complete(&self) -> bool {
        let active: Vec<&Player> = self.players().filter(|p| p.can_act()).collect();
        if active.len() <= 1 && active.iter().all(|p| p.contributed_this_street() >= self.current_bet) {
            return true;
        }
        !active.iter().any(|p| self.needs_action(p))
    }

    /// Moves the turn on from `from`, closing streets, running out the
    /// board and settling the hand as needed.
    fn advance(&mut self, from: usize) -> Result<(), GameError> {
        let n = self.seats.len();
        if self.players().filter(|p| p.in_hand()).count() <= 1 {
            return self.award_uncontested();
        }
        if !self.street_complete() {
            self.turn_seat = next_seat(n, from, |s| self.pending(s));
            return Ok(());
        }

        loop {
            self.close_street()?;
            if self.stage == Stage::Showdown {
                return self.settle_showdown();
            }
            if !self.street_complete() {
                let dealer = self.dealer_seat.unwrap_or(0);
                self.turn_seat = first_to_act_postflop(n, dealer, |s| self.pending(s));
                return Ok(());
            }
            // nobody left who can bet: keep dealing
        }
    }

    fn close_street(&mut self) -> Result<(), GameError> {
        for p in self.seats.iter_mut().flatten() {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.min_raise_increment = self.config.big_blind;
        self.full_raise_count = 0;
        self.last_aggressor_seat = None;
        self.turn_seat = None;

        let next = self.stage.next();
        if next != Stage::Showdown {
            self.deck.burn_card();
            for _ in 0..next.community_cards() {
                let card = self.deck.draw()?;
                self.community.push(card);
            }
        }
        self.stage = next;
        info!(stage = %self.stage, pot = self.pot, board = ?self.community, "street closed");
        Ok(())
    }

    fn award_uncontested(&mut self) -> Result<(), GameError> {
        let winner = self
            .players()
            .find(|p| p.in_hand())
            .map(Player::seat)
            .ok_or(GameError::NotEnoughPlayers(0))?;
        let amount = self.pot;
        self.player_mut(winner)?.add_chips(amount)?;
        let name = self.player(winner).map(|p| p.name().to_string()).unwrap_or_default();
        self.pot = 0;
        self.finish(vec![WinnerInfo::new(winner, &name, amount, None)]);
        self.reveal_eligible.insert(winner);
        info!(winner, amount, "pot awarded without showdown");
        Ok(())
    }

    fn settle_showdown(&mut self) -> Result<(), GameError> {
        let dealer = self.dealer_seat.unwrap_or(0);
        let players: Vec<&Player> = self.players().collect();
        let payouts = showdown::resolve(&players, &self.community, dealer, self.seats.len())?;

        let mut winners = Vec::with_capacity(payouts.len());
        for payout in payouts {
            let p = self.player_mut(payout.seat)?;
            p.add_chips(payout.amount)?;
            winners.push(WinnerInfo::new(payout.seat, p.name(), payout.amount, payout.hand));
        }
        self.pot = 0;

        let contenders: Vec<&Player> = self.players().filter(|p| p.in_hand()).collect();
        // betting closed by all-ins: every contender's cards are tabled
        let all_in = contenders.iter().filter(|p| !p.is_all_in()).count() <= 1;
        let contenders: Vec<usize> = contenders.into_iter().map(Player::seat).collect();
        for seat in contenders {
            if all_in || winners.iter().any(|w| w.seat == seat && w.hand.is_some()) {
                self.revealed.insert(seat);
            } else {
                self.reveal_eligible.insert(seat);
            }
        }
        info!(
            winners = ?winners.iter().map(|w| (w.seat, w.amount)).collect::<Vec<_>>(),
            "showdown settled"
        );
        self.finish(winners);
        Ok(())
    }

    fn finish(&mut self, winners: Vec<WinnerInfo>) {
        self.stage = Stage::Showdown;
        self.turn_seat = None;
        self.current_bet = 0;
        if let Some(rec) = self.record.as_mut() {
            rec.board = self.community.clone();
            rec.winners = winners.clone();
        }
        self.last_winners = winners;
    }
}
