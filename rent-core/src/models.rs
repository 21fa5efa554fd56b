mod bid;
mod bidder;
mod ids;
mod map;
mod outcome;
mod report;
mod room;
mod setup;
mod stage;

pub use bid::{Bid, BidError, BidLedger, parse_amount};
pub use bidder::{Bidder, BidderName};
pub use ids::{BidderId, RoomId};
pub use map::Map;
pub use outcome::{ExceedsWinningBid, Reconciliation, RoomAdjustment, RoomOutcome};
pub use report::{AuctionReport, RoomReport};
pub use room::{Room, RoomLabel};
pub use setup::{AuctionSetup, SetupError, validate_total_rent};
pub use stage::Stage;
