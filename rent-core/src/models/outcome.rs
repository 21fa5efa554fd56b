use super::{Bid, Map, RoomId};
use rust_decimal::Decimal;

/// The resolution of a single room: who won it and what it is worth.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomOutcome {
    /// The highest bid, the earliest one if several share the highest amount
    pub winner: Bid,
    /// The mean of every bid on the room, at full precision
    pub fair_share: Decimal,
    /// Whether another bid matched the winning amount
    pub tied: bool,
    /// How many bids the room received
    pub bid_count: usize,
}

/// Raised when scaling a room's fair share up to the total rent leaves its
/// winner owing more than they bid. This is informational; the auction still
/// completes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceedsWinningBid {
    /// The affected room
    pub room: RoomId,
    /// The scaled price, at reporting precision
    pub adjusted_price: Decimal,
    /// What the winner actually bid
    pub winning_bid: u64,
}

/// A room's fair share after the multiplier has been applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomAdjustment {
    /// The room's fair share before scaling
    pub fair_share: Decimal,
    /// The fair share times the multiplier, at full precision
    pub adjusted_price: Decimal,
    /// Present when the adjusted price exceeds the winning bid
    pub warning: Option<ExceedsWinningBid>,
}

/// The result of reconciling the rooms' fair shares against the total rent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciliation {
    /// The rent the rooms must add up to
    pub total_rent: u64,
    /// The sum of every room's fair share
    pub sum_of_prices: Decimal,
    /// The factor applied to every fair share, at full precision
    pub multiplier: Decimal,
    /// `total_rent - sum_of_prices`: positive when the bids fell short of the
    /// rent, negative when they collected more than needed
    pub shortfall_or_excess: Decimal,
    /// The adjusted price of each room
    pub rooms: Map<RoomId, RoomAdjustment>,
}

impl Reconciliation {
    /// Every room whose adjusted price exceeds its winning bid
    pub fn warnings(&self) -> impl Iterator<Item = &ExceedsWinningBid> {
        self.rooms
            .values()
            .filter_map(|adjustment| adjustment.warning.as_ref())
    }

    /// The sum of the adjusted prices, which equals the total rent up to the
    /// precision of the multiplier
    pub fn adjusted_total(&self) -> Decimal {
        self.rooms
            .values()
            .map(|adjustment| adjustment.adjusted_price)
            .sum()
    }
}
