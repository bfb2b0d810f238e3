use serde::Serialize;

use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// Inclusive range of legal totals for a bet or raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmountRange {
    pub min: u32,
    pub max: u32,
}

impl AmountRange {
    pub fn contains(&self, amount: u32) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

/// What the seat to act may do right now.
///
/// `call` carries the chips the call would add (already capped at the stack).
/// `bet` is a bet size; `raise` is a range of raise-to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalActions {
    pub fold: bool,
    pub check: bool,
    pub call: Option<u32>,
    pub bet: Option<AmountRange>,
    pub raise: Option<AmountRange>,
}

/// The betting facts about one seat that decide its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub stack: u32,
    pub contributed: u32,
    pub current_bet: u32,
    pub min_raise_increment: u32,
    pub big_blind: u32,
    /// False once the seat has acted and no full raise has come since.
    pub may_raise: bool,
}

impl SeatView {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.contributed)
    }
}

/// Chips movement an accepted action produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added to match the current bet (short when all-in).
    Call(u32),
    /// Opening bet size.
    Bet(u32),
    /// New street total and the chips it adds.
    Raise { to: u32, add: u32 },
}

/// Computes the legal action set for a seat.
///
/// # Examples
///
/// ```
/// use riverbed_engine::rules::{legal_actions, SeatView};
///
/// // small blind facing the big blind preflop
/// let view = SeatView {
///     stack: 99,
///     contributed: 1,
///     current_bet: 2,
///     min_raise_increment: 2,
///     big_blind: 2,
///     may_raise: true,
/// };
/// let legal = legal_actions(&view);
/// assert!(!legal.check);
/// assert_eq!(legal.call, Some(1));
/// assert_eq!(legal.raise.map(|r| (r.min, r.max)), Some((4, 100)));
/// ```
pub fn legal_actions(view: &SeatView) -> LegalActions {
    let to_call = view.to_call();
    let max_total = view.contributed + view.stack;

    let call = (to_call > 0).then(|| to_call.min(view.stack));
    let bet = (view.current_bet == 0 && view.stack > 0).then(|| AmountRange {
        min: view.big_blind.min(view.stack),
        max: view.stack,
    });
    let raise = (view.current_bet > 0 && view.may_raise && max_total > view.current_bet).then(
        || AmountRange {
            // short stacks may still go all-in for less than a full raise
            min: (view.current_bet + view.min_raise_increment).min(max_total),
            max: max_total,
        },
    );

    LegalActions {
        fold: true,
        check: to_call == 0,
        call,
        bet,
        raise,
    }
}

/// Validates `action` for `seat` against [`legal_actions`].
///
/// # Errors
///
/// - [`GameError::ActionNotAvailable`] for a kind outside the legal set
/// - [`GameError::InsufficientStack`] when a bet or raise exceeds the stack
/// - [`GameError::IllegalAmount`] when it is below the minimum
///
/// ```
/// use riverbed_engine::errors::GameError;
/// use riverbed_engine::player::PlayerAction;
/// use riverbed_engine::rules::{validate_action, SeatView, ValidatedAction};
///
/// let view = SeatView {
///     stack: 1000,
///     contributed: 0,
///     current_bet: 50,
///     min_raise_increment: 50,
///     big_blind: 50,
///     may_raise: true,
/// };
/// assert_eq!(
///     validate_action(0, &view, PlayerAction::Call),
///     Ok(ValidatedAction::Call(50))
/// );
/// assert!(matches!(
///     validate_action(0, &view, PlayerAction::Raise(80)),
///     Err(GameError::IllegalAmount { amount: 80, minimum: 100 })
/// ));
/// ```
pub fn validate_action(seat: usize, view: &SeatView, action: A) -> Result<ValidatedAction, GameError> {
    let legal = legal_actions(view);
    let unavailable = || GameError::ActionNotAvailable {
        seat,
        action: action.name(),
    };
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if legal.check {
                Ok(ValidatedAction::Check)
            } else {
                Err(unavailable())
            }
        }
        A::Call => legal.call.map(ValidatedAction::Call).ok_or_else(unavailable),
        A::Bet(amount) => {
            let range = legal.bet.ok_or_else(unavailable)?;
            if amount > view.stack {
                return Err(GameError::InsufficientStack {
                    amount,
                    stack: view.stack,
                });
            }
            if amount < range.min {
                return Err(GameError::IllegalAmount {
                    amount,
                    minimum: range.min,
                });
            }
            Ok(ValidatedAction::Bet(amount))
        }
        A::Raise(to) => {
            let range = legal.raise.ok_or_else(unavailable)?;
            if to > range.max {
                return Err(GameError::InsufficientStack {
                    amount: to.saturating_sub(view.contributed),
                    stack: view.stack,
                });
            }
            if to < range.min {
                return Err(GameError::IllegalAmount {
                    amount: to,
                    minimum: range.min,
                });
            }
            Ok(ValidatedAction::Raise {
                to,
                add: to - view.contributed,
            })
        }
    }
}
