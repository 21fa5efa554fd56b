use super::{BidderName, ExceedsWinningBid, RoomId, RoomLabel};
use rust_decimal::Decimal;

/// The results of an auction, rounded for presentation.
///
/// Amounts are rounded but never formatted; rendering is left to whichever
/// front end consumes the report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionReport {
    /// The rent for the house
    pub total_rent: u64,
    /// The sum of the rooms' fair shares
    pub sum_of_prices: Decimal,
    /// The multiplier applied to every fair share
    pub multiplier: Decimal,
    /// Positive when the bids fell short of the rent, negative when they exceeded it
    pub shortfall_or_excess: Decimal,
    /// The result for each room, in registration order
    pub rooms: Vec<RoomReport>,
}

/// The result for one room.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomReport {
    /// The room's id
    pub room: RoomId,
    /// The name the room is presented under
    pub nickname: String,
    /// The label the room was registered with
    pub label: RoomLabel,
    /// Who won the room
    pub winner: BidderName,
    /// What the winner bid
    pub winning_bid: u64,
    /// Whether the winning amount was matched by another bidder
    pub tied: bool,
    /// The average of every bid on the room
    pub fair_share: Decimal,
    /// The fair share scaled so the rooms add up to the rent
    pub adjusted_price: Decimal,
    /// Present when the winner now owes more than they bid
    pub warning: Option<ExceedsWinningBid>,
}

impl AuctionReport {
    /// Every room whose adjusted price exceeds its winning bid
    pub fn warnings(&self) -> impl Iterator<Item = &ExceedsWinningBid> {
        self.rooms.iter().filter_map(|room| room.warning.as_ref())
    }

    /// The sum of the rounded adjusted prices
    pub fn adjusted_total(&self) -> Decimal {
        self.rooms.iter().map(|room| room.adjusted_price).sum()
    }
}
