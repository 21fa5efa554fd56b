use super::{BidderId, RoomId, Stage};
use thiserror::Error;

/// A sealed bid on a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bid {
    /// Who placed the bid
    pub bidder: BidderId,
    /// How much they bid, in whole currency units
    pub amount: u64,
}

/// The ways a single bid submission can be refused.
///
/// All of these are recoverable: the caller should ask for that one bid again
/// rather than abandon the auction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    /// The amount was not a whole, non-negative number
    #[error("invalid bid amount {0:?}: please enter a whole number with no decimals")]
    InvalidAmount(String),
    /// The bidder already has a bid on this room
    #[error("{bidder} has already bid {existing} on this room")]
    DuplicateBid {
        /// The bidder who tried to bid twice
        bidder: BidderId,
        /// The amount already on the ledger
        existing: u64,
    },
    /// No bidder is registered under this id
    #[error("{0} is not registered in this auction")]
    UnknownBidder(BidderId),
    /// No room is registered under this id
    #[error("{0} is not registered in this auction")]
    UnknownRoom(RoomId),
    /// Bids are only accepted while the auction is collecting them
    #[error("bids are not accepted while the auction is in the {0} stage")]
    Closed(Stage),
}

/// Parse a typed-in bid amount.
///
/// Only whole numbers are accepted; anything else (decimals, words, an empty
/// line) is an `InvalidAmount`. Negative numbers parse, and are refused when
/// they are submitted to a ledger.
pub fn parse_amount(input: &str) -> Result<i64, BidError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| BidError::InvalidAmount(trimmed.to_owned()))
}

/// The append-only record of bids placed on a single room.
///
/// Each bidder may bid at most once. Bids are kept in submission order, which
/// is also the order used to break ties on the highest bid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BidLedger(Vec<Bid>);

impl BidLedger {
    /// Append a bid, refusing negative amounts and second bids.
    ///
    /// A refused submission leaves the ledger untouched.
    pub fn submit(&mut self, bidder: BidderId, amount: i64) -> Result<Bid, BidError> {
        let amount =
            u64::try_from(amount).map_err(|_| BidError::InvalidAmount(amount.to_string()))?;

        if let Some(existing) = self.amount_of(bidder) {
            return Err(BidError::DuplicateBid { bidder, existing });
        }

        let bid = Bid { bidder, amount };
        self.0.push(bid);
        Ok(bid)
    }

    /// Every bid submitted so far, in submission order
    pub fn all(&self) -> &[Bid] {
        &self.0
    }

    /// The number of bids submitted
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no bids have been submitted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the bidder has already bid
    pub fn contains(&self, bidder: BidderId) -> bool {
        self.amount_of(bidder).is_some()
    }

    /// The amount the bidder bid, if they have
    pub fn amount_of(&self, bidder: BidderId) -> Option<u64> {
        self.0
            .iter()
            .find(|bid| bid.bidder == bidder)
            .map(|bid| bid.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> BidderId {
        BidderId::from(0)
    }

    fn bob() -> BidderId {
        BidderId::from(1)
    }

    #[test]
    fn test_submission_order_is_kept() {
        let mut ledger = BidLedger::default();
        ledger.submit(bob(), 800).unwrap();
        ledger.submit(alice(), 1000).unwrap();

        let bidders = ledger.all().iter().map(|bid| bid.bidder).collect::<Vec<_>>();
        assert_eq!(bidders, vec![bob(), alice()]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.amount_of(alice()), Some(1000));
    }

    #[test]
    fn test_duplicate_bid_does_not_mutate() {
        let mut ledger = BidLedger::default();
        ledger.submit(alice(), 1000).unwrap();
        let before = ledger.clone();

        let err = ledger.submit(alice(), 5).unwrap_err();
        assert_eq!(
            err,
            BidError::DuplicateBid {
                bidder: alice(),
                existing: 1000
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let mut ledger = BidLedger::default();
        let err = ledger.submit(alice(), -1).unwrap_err();
        assert_eq!(err, BidError::InvalidAmount("-1".to_owned()));
        assert!(ledger.is_empty());
        assert!(!ledger.contains(alice()));
    }

    #[test]
    fn test_zero_is_a_valid_bid() {
        let mut ledger = BidLedger::default();
        let bid = ledger.submit(alice(), 0).unwrap();
        assert_eq!(bid.amount, 0);
        assert!(ledger.contains(alice()));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 950\n"), Ok(950));
        assert_eq!(parse_amount("-5"), Ok(-5));
        assert!(matches!(parse_amount("12.50"), Err(BidError::InvalidAmount(_))));
        assert!(matches!(parse_amount("lots"), Err(BidError::InvalidAmount(_))));
        assert!(matches!(parse_amount(""), Err(BidError::InvalidAmount(_))));
    }
}
