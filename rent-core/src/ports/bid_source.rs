use crate::models::{BidError, Bidder, Room};

/// The collaborator that bids are collected from, typically a terminal that
/// the roommates take turns at.
///
/// The auction drives the source bidder by bidder: `begin_turn`, then one
/// `bid` per room, then `end_turn`. Keeping the bids secret from the other
/// roommates (clearing the screen, asking the next person to sit down) is the
/// source's responsibility; the auction only guarantees the order of calls.
pub trait BidSource {
    /// The error type for failures of the source itself, such as closed input
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called before a bidder places any bids.
    fn begin_turn(&mut self, bidder: &Bidder) -> Result<(), Self::Error> {
        let _ = bidder;
        Ok(())
    }

    /// Ask the bidder for their bid on a room.
    ///
    /// The amount is returned as given; the auction validates it.
    fn bid(&mut self, bidder: &Bidder, room: &Room) -> Result<i64, Self::Error>;

    /// Called when a bid was refused. The auction asks for the same bid again
    /// afterwards.
    fn rejected(
        &mut self,
        bidder: &Bidder,
        room: &Room,
        error: &BidError,
    ) -> Result<(), Self::Error> {
        let _ = (bidder, room, error);
        Ok(())
    }

    /// Called after a bidder has bid on every room, with the bidder who is up
    /// next, if any.
    fn end_turn(&mut self, bidder: &Bidder, next: Option<&Bidder>) -> Result<(), Self::Error> {
        let _ = (bidder, next);
        Ok(())
    }
}
