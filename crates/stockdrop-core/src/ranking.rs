//! Selection of the extreme daily mover from a quote batch.

use crate::domain::Quote;

/// Which end of the signed `change_percent` scale to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Largest signed percent move; in an all-declining batch this is
    /// the smallest loss, not a gain.
    MaxGain,
    /// Smallest signed percent move.
    MaxDecline,
}

/// Pick the extreme mover by signed `change_percent`.
///
/// Ties resolve to the earliest candidate in input order; an empty batch
/// yields `None`. Comparison is strict, so a later equal value never
/// displaces an earlier winner.
pub fn select_extreme(quotes: &[Quote], direction: Direction) -> Option<&Quote> {
    let mut winner: Option<&Quote> = None;

    for quote in quotes {
        let current = match winner {
            Some(current) => current,
            None => {
                winner = Some(quote);
                continue;
            }
        };

        let beats = match direction {
            Direction::MaxGain => quote.change_percent > current.change_percent,
            Direction::MaxDecline => quote.change_percent < current.change_percent,
        };
        if beats {
            winner = Some(quote);
        }
    }

    winner
}
