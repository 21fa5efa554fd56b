use rent_core::{
    models::{AuctionReport, AuctionSetup, BidError, Bidder, Room},
    ports::BidSource,
};
use rent_solver::{Auction, Precision};
use serde::Deserialize;
use thiserror::Error;
use tracing::{Level, event};

/// An auction whose bids are known up front, as read from a JSON file.
///
/// Each entry of `bids` names one bidder and lists their amounts in room
/// order, so rooms that share a label are still told apart.
#[derive(Debug, Deserialize)]
pub struct BatchInput {
    #[serde(flatten)]
    pub setup: AuctionSetup,
    pub bids: Vec<BatchBids>,
}

/// One bidder's sealed bids, one amount per room in the order the rooms were listed
#[derive(Debug, Clone, Deserialize)]
pub struct BatchBids {
    pub bidder: String,
    pub amounts: Vec<i64>,
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("bids were given for {0}, who is not one of the bidders")]
    UnknownBidder(String),
    #[error("bids were given more than once for {0}")]
    DuplicateBidder(String),
    #[error("{bidder} gave {given} amounts for {rooms} rooms")]
    WrongBidCount {
        bidder: String,
        given: usize,
        rooms: usize,
    },
    #[error("{bidder} has no bid for {room}")]
    MissingBid { bidder: String, room: String },
    #[error("the bid of {bidder} for {room} was refused: {source}")]
    Refused {
        bidder: String,
        room: String,
        source: BidError,
    },
}

impl BatchInput {
    /// Run the auction to completion and report the results
    pub fn solve(self, precision: Precision) -> anyhow::Result<AuctionReport> {
        let mut auction = Auction::from_setup(self.setup).with_precision(precision);
        let rooms = auction.rooms().len();

        let mut seen = Vec::with_capacity(self.bids.len());
        for entry in &self.bids {
            let name = entry.bidder.trim();
            let Some(bidder) = auction.bidder_named(name) else {
                return Err(BatchError::UnknownBidder(entry.bidder.clone()).into());
            };
            if seen.contains(&bidder.id) {
                return Err(BatchError::DuplicateBidder(name.to_owned()).into());
            }
            seen.push(bidder.id);
            if entry.amounts.len() != rooms {
                return Err(BatchError::WrongBidCount {
                    bidder: name.to_owned(),
                    given: entry.amounts.len(),
                    rooms,
                }
                .into());
            }
        }

        event!(Level::INFO, bidders = self.bids.len(), "settling batch auction");
        let report = auction.run(&mut BatchSource { bids: &self.bids })?;
        Ok(report)
    }
}

// Replays the bids from the file. There is nobody to ask again, so a refused
// bid ends the run.
struct BatchSource<'a> {
    bids: &'a [BatchBids],
}

impl BatchSource<'_> {
    fn lookup(&self, bidder: &Bidder, room: &Room) -> Option<i64> {
        self.bids
            .iter()
            .find(|entry| entry.bidder.trim() == bidder.name.as_str())?
            .amounts
            .get(room.id().index())
            .copied()
    }
}

impl BidSource for BatchSource<'_> {
    type Error = BatchError;

    fn bid(&mut self, bidder: &Bidder, room: &Room) -> Result<i64, Self::Error> {
        self.lookup(bidder, room)
            .ok_or_else(|| BatchError::MissingBid {
                bidder: bidder.name.to_string(),
                room: room.nickname(),
            })
    }

    fn rejected(
        &mut self,
        bidder: &Bidder,
        room: &Room,
        error: &BidError,
    ) -> Result<(), Self::Error> {
        Err(BatchError::Refused {
            bidder: bidder.name.to_string(),
            room: room.nickname(),
            source: error.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> BatchInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_solves_from_json() {
        let batch = input(
            r#"{
                "total_rent": 3000,
                "rooms": ["A", "B"],
                "bidders": ["Alice", "Bob"],
                "bids": [
                    { "bidder": "Bob", "amounts": [800, 1400] },
                    { "bidder": "Alice", "amounts": [1000, 1200] }
                ]
            }"#,
        );
        let report = batch.solve(Precision::default()).unwrap();
        assert_eq!(report.rooms[0].winner.as_str(), "Alice");
        assert_eq!(report.rooms[1].winner.as_str(), "Bob");
        assert_eq!(report.warnings().count(), 2);
    }

    #[test]
    fn test_rooms_sharing_a_label_keep_their_own_bids() {
        let batch = input(
            r#"{
                "total_rent": 2700,
                "rooms": ["Room", "Room"],
                "bidders": ["Alice", "Bob"],
                "bids": [
                    { "bidder": "Alice", "amounts": [1500, 100] },
                    { "bidder": "Bob", "amounts": [200, 900] }
                ]
            }"#,
        );
        let report = batch.solve(Precision::default()).unwrap();
        assert_eq!(report.rooms[0].winner.as_str(), "Alice");
        assert_eq!(report.rooms[0].winning_bid, 1500);
        assert_eq!(report.rooms[1].winner.as_str(), "Bob");
        assert_eq!(report.rooms[1].winning_bid, 900);
    }

    #[test]
    fn test_bidder_given_twice() {
        let batch = input(
            r#"{
                "total_rent": 1000,
                "rooms": ["A"],
                "bidders": ["Alice"],
                "bids": [
                    { "bidder": "Alice", "amounts": [900] },
                    { "bidder": " Alice", "amounts": [1] }
                ]
            }"#,
        );
        let err = batch.solve(Precision::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::DuplicateBidder(name)) if name == "Alice"
        ));
    }

    #[test]
    fn test_wrong_number_of_amounts() {
        let batch = input(
            r#"{
                "total_rent": 1000,
                "rooms": ["A", "B"],
                "bidders": ["Alice"],
                "bids": [{ "bidder": "Alice", "amounts": [900, 100, 5] }]
            }"#,
        );
        let err = batch.solve(Precision::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::WrongBidCount { given: 3, rooms: 2, .. })
        ));
    }

    #[test]
    fn test_missing_bid() {
        let batch = input(
            r#"{
                "total_rent": 1000,
                "rooms": ["A"],
                "bidders": ["Alice", "Bob"],
                "bids": [{ "bidder": "Alice", "amounts": [800] }]
            }"#,
        );
        let err = batch.solve(Precision::default()).unwrap_err();
        assert!(err.to_string().contains("Bob has no bid"));
    }

    #[test]
    fn test_refused_bid_does_not_loop() {
        let batch = input(
            r#"{
                "total_rent": 1000,
                "rooms": ["A"],
                "bidders": ["Alice"],
                "bids": [{ "bidder": "Alice", "amounts": [-1] }]
            }"#,
        );
        let err = batch.solve(Precision::default()).unwrap_err();
        assert!(err.to_string().contains("was refused"));
    }

    #[test]
    fn test_unknown_bidder() {
        let batch = input(
            r#"{
                "total_rent": 1000,
                "rooms": ["A"],
                "bidders": ["Alice"],
                "bids": [
                    { "bidder": "Alice", "amounts": [1] },
                    { "bidder": "Mallory", "amounts": [2] }
                ]
            }"#,
        );
        let err = batch.solve(Precision::default()).unwrap_err();
        assert!(err.to_string().contains("not one of the bidders"));
    }
}
