//! Seat rotation around a table of `n` seats.
//!
//! Seats are plain indices `0..n`; callers pass a predicate describing which
//! seats count (occupied, still in the hand, able to act, ...).

/// Seats in clockwise order starting just after `start` and ending with
/// `start` itself.
pub fn clockwise_from(n: usize, start: usize) -> impl Iterator<Item = usize> {
    (1..=n).map(move |k| (start + k) % n)
}

/// First seat strictly after `from` (wrapping, `from` checked last) matching `pred`.
pub fn next_seat<F>(n: usize, from: usize, pred: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    if n == 0 {
        return None;
    }
    clockwise_from(n, from).find(|&s| pred(s))
}

/// Moves the button to the next eligible seat. With no previous button the
/// first eligible seat from 0 gets it.
pub fn next_dealer<F>(n: usize, current: Option<usize>, eligible: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    match current {
        Some(d) => next_seat(n, d, eligible),
        None => (0..n).find(|&s| eligible(s)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindSeats {
    pub small: usize,
    pub big: usize,
}

/// Blind positions for a given button. Heads-up the button posts the small
/// blind and the other player the big blind.
pub fn blind_seats<F>(n: usize, dealer: usize, eligible: F) -> Option<BlindSeats>
where
    F: Fn(usize) -> bool,
{
    let count = (0..n).filter(|&s| eligible(s)).count();
    if count < 2 {
        return None;
    }
    if count == 2 {
        let big = next_seat(n, dealer, &eligible)?;
        return Some(BlindSeats { small: dealer, big });
    }
    let small = next_seat(n, dealer, &eligible)?;
    let big = next_seat(n, small, &eligible)?;
    Some(BlindSeats { small, big })
}

/// Opens preflop betting: the first seat left of the big blind that still
/// has a decision. Heads-up this is the button.
pub fn first_to_act_preflop<F>(n: usize, blinds: BlindSeats, pending: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    next_seat(n, blinds.big, pending)
}

/// Opens betting on the flop, turn and river: first pending seat left of
/// the button.
pub fn first_to_act_postflop<F>(n: usize, dealer: usize, pending: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    next_seat(n, dealer, pending)
}
