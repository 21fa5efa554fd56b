use rent_core::models::{Bid, RoomOutcome};
use rust_decimal::Decimal;
use thiserror::Error;

/// The ways a room can fail to resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Without bids there is neither a winner nor an average
    #[error("the room received no bids")]
    NoBids,
}

/// Determine the winner and fair share of a room from its bids.
///
/// The winner is the highest bid. When several bids share the highest
/// amount, the earliest submission wins and the outcome is marked as tied.
/// The fair share is the exact mean of every bid; nothing is rounded here.
pub fn resolve(bids: &[Bid]) -> Result<RoomOutcome, ResolveError> {
    let (first, rest) = bids.split_first().ok_or(ResolveError::NoBids)?;

    // A strict comparison keeps the earliest of equal bids
    let winner = rest
        .iter()
        .fold(first, |best, bid| if bid.amount > best.amount { bid } else { best });

    let tied = bids
        .iter()
        .filter(|bid| bid.amount == winner.amount)
        .count()
        > 1;

    let total = bids
        .iter()
        .map(|bid| Decimal::from(bid.amount))
        .sum::<Decimal>();
    let fair_share = total / Decimal::from(bids.len());

    Ok(RoomOutcome {
        winner: *winner,
        fair_share,
        tied,
        bid_count: bids.len(),
    })
}
