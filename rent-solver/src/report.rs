use crate::Precision;
use rent_core::models::{AuctionReport, Bidder, Reconciliation, Room, RoomReport};

/// Assemble the presented report from the resolved rooms and the
/// reconciliation, rounding every amount to the given precision.
///
/// Rooms that were never resolved, or that the reconciliation does not
/// cover, are left out.
pub fn build_report(
    rooms: &[Room],
    bidders: &[Bidder],
    reconciliation: &Reconciliation,
    precision: &Precision,
) -> AuctionReport {
    let rooms = rooms
        .iter()
        .filter_map(|room| {
            let outcome = room.outcome()?;
            let adjustment = reconciliation.rooms.get(&room.id())?;
            let winner = bidders.get(outcome.winner.bidder.index())?;

            Some(RoomReport {
                room: room.id(),
                nickname: room.nickname(),
                label: room.label().clone(),
                winner: winner.name.clone(),
                winning_bid: outcome.winner.amount,
                tied: outcome.tied,
                fair_share: precision.price(outcome.fair_share),
                adjusted_price: precision.price(adjustment.adjusted_price),
                warning: adjustment.warning.clone(),
            })
        })
        .collect();

    AuctionReport {
        total_rent: reconciliation.total_rent,
        sum_of_prices: precision.price(reconciliation.sum_of_prices),
        multiplier: precision.multiplier(reconciliation.multiplier),
        shortfall_or_excess: precision.price(reconciliation.shortfall_or_excess),
        rooms,
    }
}
